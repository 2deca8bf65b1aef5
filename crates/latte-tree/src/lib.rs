//! UI hierarchy model for Latte.
//!
//! Turns a raw hierarchy dump into a preorder [`NodeTree`] and annotates it
//! with derived visibility and identity attributes:
//!
//! ```text
//! dump ──► TreeBuilder ──► NodeTree ──► AnnotationPipeline ──► annotated NodeTree
//!                                        (xpath → ad → covered)
//! ```
//!
//! The tree is an arena: a node's [`NodeId`] is its preorder position, and
//! parent/child links are ids rather than references.

pub mod error;
pub mod geometry;
pub mod node;
pub mod pipeline;
pub mod tree;

pub use error::NodeError;
pub use geometry::Rect;
pub use node::{Attributes, Node, NodeId, ACTION_CLICK, ACTION_FOCUS, ACTION_LONG_CLICK};
pub use pipeline::{
    is_ad_resource_id, AdPass, AnnotationPass, AnnotationPipeline, ChildSlot, CoveredExtra,
    CoveredPass, XpathPass,
};
pub use tree::{
    BuildOutcome, NodeTree, TreeBuilder, DEFAULT_CONTAINER_CLASSES, MAX_PARSE_ERRORS,
};

/// Build and annotate `dump` with the default builder and the standard passes.
pub fn annotate_dump(dump: &str) -> NodeTree {
    AnnotationPipeline::standard()
        .build(&TreeBuilder::new(), dump)
        .tree
}
