//! Node model: one UI element from a hierarchy dump.
//!
//! Nodes are built from a flat attribute map whose values are either
//! already typed JSON values or the strings found in the dump format.
//! Coercion lives in `node_attrs`; the derived predicates used by the
//! passes and the classifier live on [`Node`] itself.

mod node_attrs;
mod node_types;

pub use node_attrs::{parse_actions, parse_bounds, Attributes};
pub use node_types::{
    Node, NodeId, ACTION_CLICK, ACTION_FOCUS, ACTION_LONG_CLICK,
};

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
