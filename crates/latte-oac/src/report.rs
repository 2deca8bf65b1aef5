//! Classification result: condition → nodes, node → conditions, counts.

use std::collections::BTreeMap;

use serde::Serialize;

use latte_tree::{Node, NodeId, NodeTree, Rect};

use crate::oac::Oac;

/// One line of the JSON-lines report.
#[derive(Debug, Serialize)]
pub struct OacRecord<'a> {
    pub node: &'a Node,
    #[serde(rename = "OACs")]
    pub oacs: &'a [Oac],
}

/// Result of classifying one annotated tree.
#[derive(Debug, Clone)]
pub struct OacReport {
    package: String,
    screen: Option<Rect>,
    by_condition: BTreeMap<Oac, Vec<NodeId>>,
    by_node: BTreeMap<NodeId, Vec<Oac>>,
}

impl OacReport {
    /// A report with every condition present and no node flagged.
    pub fn empty(package: impl Into<String>, screen: Option<Rect>) -> Self {
        Self {
            package: package.into(),
            screen,
            by_condition: Oac::ALL.into_iter().map(|oac| (oac, Vec::new())).collect(),
            by_node: BTreeMap::new(),
        }
    }

    pub(crate) fn record(&mut self, id: NodeId, oacs: Vec<Oac>) {
        if oacs.is_empty() {
            return;
        }
        for oac in &oacs {
            self.by_condition.entry(*oac).or_default().push(id);
        }
        self.by_node.insert(id, oacs);
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Screen rectangle used for classification; `None` for an empty tree.
    pub fn screen(&self) -> Option<Rect> {
        self.screen
    }

    /// Nodes satisfying `oac`, in preorder.
    pub fn nodes_for(&self, oac: Oac) -> &[NodeId] {
        self.by_condition
            .get(&oac)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Conditions triggered by node `id`, in table order.
    pub fn conditions_for(&self, id: NodeId) -> &[Oac] {
        self.by_node
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Flagged node ids in preorder.
    pub fn flagged(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.by_node.keys().copied()
    }

    pub fn flagged_count(&self) -> usize {
        self.by_node.len()
    }

    pub fn is_clean(&self) -> bool {
        self.by_node.is_empty()
    }

    pub fn count(&self, oac: Oac) -> usize {
        self.nodes_for(oac).len()
    }

    /// Count per condition; every condition is present.
    pub fn counts(&self) -> BTreeMap<Oac, usize> {
        Oac::ALL.into_iter().map(|oac| (oac, self.count(oac))).collect()
    }

    /// Count per condition name, as written to the count summary.
    pub fn count_map(&self) -> BTreeMap<String, usize> {
        self.counts()
            .into_iter()
            .map(|(oac, count)| (oac.name().to_string(), count))
            .collect()
    }

    /// Records pairing each flagged node with its conditions.
    pub fn records<'a>(&'a self, tree: &'a NodeTree) -> Vec<OacRecord<'a>> {
        self.by_node
            .iter()
            .filter_map(|(id, oacs)| {
                tree.get(*id).map(|node| OacRecord {
                    node,
                    oacs: oacs.as_slice(),
                })
            })
            .collect()
    }

    /// The JSON-lines report body.
    pub fn to_json_lines(&self, tree: &NodeTree) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for record in self.records(tree) {
            out.push_str(&serde_json::to_string(&record)?);
            out.push('\n');
        }
        Ok(out)
    }
}
