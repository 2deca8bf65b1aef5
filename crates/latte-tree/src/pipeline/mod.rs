//! Annotation pipeline: ordered passes over a built [`NodeTree`].
//!
//! Every pass sees one node at a time together with its direct children,
//! in preorder. A pass may write the derived fields of the children and
//! leave per-child scratch state in [`ChildSlot::extra`]; that state is
//! handed back as `node_extra` when the child's own turn comes.
//!
//! ```text
//! for node in preorder:
//!     for pass in passes:
//!         pass.visit(node, extra[node], children + their extras)
//! ```

mod ad;
mod covered;
mod xpath;

pub use ad::{is_ad_resource_id, AdPass};
pub use covered::{CoveredExtra, CoveredPass};
pub use xpath::XpathPass;

use tracing::debug;

use crate::node::{Node, NodeId};
use crate::tree::{NodeTree, TreeBuilder};

/// A direct child handed to a pass, paired with its scratch state.
pub struct ChildSlot<'a, E> {
    pub node: &'a mut Node,
    pub extra: E,
}

/// One stateless annotation pass.
pub trait AnnotationPass {
    /// Per-node scratch state threaded from parent to child.
    type Extra: Default + 'static;

    fn name(&self) -> &'static str;

    /// Called once for the root before traversal starts.
    fn visit_root(&self, _root: &mut Node, _extra: &mut Self::Extra) {}

    /// Called once per node with its direct children, in source order.
    fn visit(&self, node: &Node, node_extra: &Self::Extra, children: &mut [ChildSlot<'_, Self::Extra>]);
}

/// Object-safe runner holding one pass and its extras for the current run.
trait PassRunner {
    fn name(&self) -> &'static str;
    fn begin(&mut self, tree: &mut NodeTree);
    fn visit(&mut self, tree: &mut NodeTree, id: NodeId);
}

struct Runner<P: AnnotationPass> {
    pass: P,
    extras: Vec<Option<P::Extra>>,
}

impl<P: AnnotationPass> PassRunner for Runner<P> {
    fn name(&self) -> &'static str {
        self.pass.name()
    }

    fn begin(&mut self, tree: &mut NodeTree) {
        self.extras = (0..tree.len()).map(|_| None).collect();
        if let Some(root) = tree.nodes_mut().first_mut() {
            let mut extra = P::Extra::default();
            self.pass.visit_root(root, &mut extra);
            self.extras[0] = Some(extra);
        }
    }

    fn visit(&mut self, tree: &mut NodeTree, id: NodeId) {
        let node_extra = self.extras[id].take().unwrap_or_else(|| {
            panic!(
                "pass '{}' reached node {} before its parent handed over its state",
                self.pass.name(),
                id
            )
        });

        let (node, children) = tree.family_mut(id);
        let mut slots: Vec<ChildSlot<'_, P::Extra>> = children
            .into_iter()
            .map(|child| ChildSlot {
                node: child,
                extra: P::Extra::default(),
            })
            .collect();

        self.pass.visit(node, &node_extra, &mut slots);

        for slot in slots {
            let child_id = slot.node.id();
            assert!(
                self.extras[child_id].is_none(),
                "pass '{}' produced state twice for node {}",
                self.pass.name(),
                child_id
            );
            self.extras[child_id] = Some(slot.extra);
        }
    }
}

/// Ordered list of passes, run in preorder over one tree.
#[derive(Default)]
pub struct AnnotationPipeline {
    passes: Vec<Box<dyn PassRunner>>,
}

impl AnnotationPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Xpath, then ad detection, then occlusion.
    pub fn standard() -> Self {
        Self::new()
            .with_pass(XpathPass)
            .with_pass(AdPass)
            .with_pass(CoveredPass)
    }

    pub fn with_pass<P>(mut self, pass: P) -> Self
    where
        P: AnnotationPass + 'static,
    {
        self.passes.push(Box::new(Runner {
            pass,
            extras: Vec::new(),
        }));
        self
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Run every pass over `tree`.
    pub fn annotate(&mut self, tree: &mut NodeTree) {
        if tree.is_empty() {
            return;
        }

        for pass in &mut self.passes {
            pass.begin(tree);
        }

        // Ids are preorder, so every parent is visited before its children.
        for id in 0..tree.len() {
            for pass in &mut self.passes {
                pass.visit(tree, id);
            }
        }

        debug!(
            "Annotated {} nodes with passes {:?}",
            tree.len(),
            self.pass_names()
        );
    }

    /// Parse `dump` with `builder` and annotate the result.
    pub fn build(&mut self, builder: &TreeBuilder, dump: &str) -> crate::tree::BuildOutcome {
        let mut outcome = builder.build(dump);
        self.annotate(&mut outcome.tree);
        outcome
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
