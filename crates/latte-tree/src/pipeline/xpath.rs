//! Xpath pass: structural identity from class-name sibling counts.

use std::collections::HashMap;

use super::{AnnotationPass, ChildSlot};
use crate::node::Node;

/// Assigns `{parent}/{class}` to a child whose class is unique among its
/// siblings, else `{parent}/{class}[n]` with `n` the 1-based occurrence of
/// that class so far.
#[derive(Debug, Clone, Copy, Default)]
pub struct XpathPass;

impl AnnotationPass for XpathPass {
    type Extra = ();

    fn name(&self) -> &'static str {
        "xpath"
    }

    fn visit_root(&self, root: &mut Node, _extra: &mut ()) {
        root.xpath = format!("/{}", root.class_name);
    }

    fn visit(&self, node: &Node, _node_extra: &(), children: &mut [ChildSlot<'_, ()>]) {
        let mut totals: HashMap<String, usize> = HashMap::new();
        for slot in children.iter() {
            *totals.entry(slot.node.class_name.clone()).or_default() += 1;
        }

        let mut seen: HashMap<String, usize> = HashMap::new();
        for slot in children.iter_mut() {
            let class = slot.node.class_name.clone();
            let xpath = if totals.get(&class).copied().unwrap_or(0) > 1 {
                let n = seen.entry(class.clone()).or_default();
                *n += 1;
                format!("{}/{}[{}]", node.xpath, class, n)
            } else {
                format!("{}/{}", node.xpath, class)
            };
            slot.node.xpath = xpath;
        }
    }
}
