//! Occlusion pass: which subtrees are hidden behind later-drawn siblings.
//!
//! There is no rendering here, only declared paint order and rectangles:
//!
//! 1. A covered node passes coverage on to every child that is not
//!    practically invisible.
//! 2. Otherwise children are walked topmost first (`drawing_order`
//!    descending, stable). A visible child inside any rectangle covered so
//!    far is covered. An uncovered child inherits its partial overlaps with
//!    those rectangles and then adds its own bounds to the running list,
//!    hiding siblings drawn below it.

use super::{AnnotationPass, ChildSlot};
use crate::geometry::Rect;
use crate::node::Node;

/// Covered rectangles inherited from the ancestor chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoveredExtra {
    pub inherited: Vec<Rect>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CoveredPass;

impl AnnotationPass for CoveredPass {
    type Extra = CoveredExtra;

    fn name(&self) -> &'static str {
        "covered"
    }

    fn visit(
        &self,
        node: &Node,
        node_extra: &CoveredExtra,
        children: &mut [ChildSlot<'_, CoveredExtra>],
    ) {
        if node.covered {
            for slot in children.iter_mut() {
                if !slot.node.practically_invisible() {
                    slot.node.covered = true;
                }
            }
            return;
        }

        let mut order: Vec<usize> = (0..children.len()).collect();
        order.sort_by(|a, b| {
            children[*b]
                .node
                .drawing_order
                .cmp(&children[*a].node.drawing_order)
        });

        let mut covered_so_far = node_extra.inherited.clone();
        for i in order {
            let slot = &mut children[i];
            if slot.node.practically_invisible() {
                continue;
            }

            let bounds = slot.node.normalized_bounds();
            if covered_so_far.iter().any(|rect| rect.contains(&bounds)) {
                slot.node.covered = true;
                continue;
            }

            slot.extra.inherited = covered_so_far
                .iter()
                .filter_map(|rect| rect.intersection(&bounds))
                .collect();
            covered_so_far.push(bounds);
        }
    }
}
