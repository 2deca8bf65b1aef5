//! NodeTree: preorder node arena, queries and serialization.

mod builder;

pub use builder::{BuildOutcome, TreeBuilder, DEFAULT_CONTAINER_CLASSES, MAX_PARSE_ERRORS};

use crate::geometry::Rect;
use crate::node::{Node, NodeId};

/// Nodes of one capture in depth-first preorder.
///
/// A node's id is its position in the list, so the subtree of `id` is the
/// contiguous range `id..subtree_end`.
#[derive(Debug, Clone, Default)]
pub struct NodeTree {
    nodes: Vec<Node>,
}

impl NodeTree {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes in preorder.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// The root's bounds define the on-screen rectangle.
    pub fn screen_bounds(&self) -> Option<Rect> {
        self.root().map(Node::normalized_bounds)
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|child| &self.nodes[*child])
    }

    /// Strict descendants of `id` in preorder.
    pub fn descendants(&self, id: NodeId) -> &[Node] {
        match self.nodes.get(id) {
            Some(node) => &self.nodes[id + 1..node.subtree_end],
            None => &[],
        }
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut current = self.nodes.get(id).and_then(|n| n.parent);
        while let Some(parent) = current {
            let node = &self.nodes[parent];
            out.push(node);
            current = node.parent;
        }
        out
    }

    pub fn find<P>(&self, predicate: P) -> Vec<&Node>
    where
        P: Fn(&Node) -> bool,
    {
        self.nodes.iter().filter(|n| predicate(n)).collect()
    }

    pub fn find_by_xpath(&self, xpath: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.xpath == xpath)
    }

    /// Match either the full resource id or its segment after the last `/`.
    pub fn find_by_resource_id(&self, resource_id: &str) -> Vec<&Node> {
        self.find(|n| {
            !n.resource_id.is_empty()
                && (n.resource_id == resource_id
                    || n.resource_id.rsplit('/').next() == Some(resource_id))
        })
    }

    /// First occurrence of every practically-equal group, in preorder.
    pub fn dedup_practically_equal(&self) -> Vec<&Node> {
        let mut unique: Vec<&Node> = Vec::new();
        for node in &self.nodes {
            if !unique.iter().any(|seen| seen.practically_equal(node)) {
                unique.push(node);
            }
        }
        unique
    }

    /// One serialized node per line.
    pub fn to_json_lines(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for node in &self.nodes {
            out.push_str(&serde_json::to_string(node)?);
            out.push('\n');
        }
        Ok(out)
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Append `node` under `parent` (or as root). Callers must push in preorder.
    pub(crate) fn push(&mut self, mut node: Node, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        node.id = id;
        node.parent = parent;
        node.children.clear();
        node.subtree_end = id + 1;
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        self.nodes.push(node);
        id
    }

    pub(crate) fn close(&mut self, id: NodeId) {
        let end = self.nodes.len();
        self.nodes[id].subtree_end = end;
    }

    /// The node together with mutable access to its direct children.
    pub(crate) fn family_mut(&mut self, id: NodeId) -> (&Node, Vec<&mut Node>) {
        let end = self.nodes[id].subtree_end;
        let (head, tail) = self.nodes.split_at_mut(id + 1);
        let node = &head[id];
        let children = tail[..end - id - 1]
            .iter_mut()
            .filter(|child| child.parent == Some(id))
            .collect();
        (node, children)
    }

    /// Derive the raw-subtree visibility flags, bottom-up.
    pub(crate) fn finish(&mut self, container_classes: &[String]) {
        for id in (0..self.nodes.len()).rev() {
            let visible_below = self.nodes[id].children.iter().any(|child| {
                let c = &self.nodes[*child];
                (c.visible && c.is_valid_bounds()) || c.has_visible_descendant
            });
            let node = &mut self.nodes[id];
            node.has_visible_descendant = visible_below;
            node.empty_container =
                !visible_below && container_classes.iter().any(|c| *c == node.class_name);
        }
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
