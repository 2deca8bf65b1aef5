//! OAC classifier over an annotated [`NodeTree`].
//!
//! Conditions are evaluated in two phases: the atomic predicates, then the
//! `A1` aggregate as a fold over [`Oac::P_FAMILY`]. Each family is gated so
//! that decorative and structural nodes stay out of the report:
//!
//! | Conditions | Evaluated for |
//! |---|---|
//! | `P*` | potentially data, not an ad |
//! | `A2`..`A4` | potentially function, not an ad |
//! | `A1` | potentially data or function, not an ad |
//! | `O_ad` | potentially data or function |

use tracing::{debug, info};

use latte_tree::{Node, NodeTree, Rect, ACTION_CLICK};

use crate::oac::{Oac, OacFamily};
use crate::report::OacReport;

/// Default class of a plain text label.
pub const DEFAULT_TEXT_LABEL_CLASS: &str = "android.widget.TextView";

/// Whole-tree scope for the predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenContext {
    /// Package of the app under test.
    pub package: String,
    /// Root bounds; defines on-screen.
    pub screen: Rect,
}

impl ScreenContext {
    /// Context from the tree's root, or `None` for an empty tree.
    pub fn from_tree(tree: &NodeTree, package: &str) -> Option<Self> {
        tree.screen_bounds().map(|screen| Self {
            package: package.to_string(),
            screen,
        })
    }
}

/// Evaluates the OAC table.
#[derive(Debug, Clone)]
pub struct OacClassifier {
    text_label_class: String,
}

impl Default for OacClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl OacClassifier {
    pub fn new() -> Self {
        Self {
            text_label_class: DEFAULT_TEXT_LABEL_CLASS.to_string(),
        }
    }

    pub fn with_text_label_class(mut self, class: impl Into<String>) -> Self {
        self.text_label_class = class.into();
        self
    }

    /// Classify every node of `tree` for the app `package`.
    pub fn classify(&self, tree: &NodeTree, package: &str) -> OacReport {
        let Some(ctx) = ScreenContext::from_tree(tree, package) else {
            debug!("Empty node tree, nothing to classify");
            return OacReport::empty(package, None);
        };

        let mut report = OacReport::empty(package, Some(ctx.screen));
        for node in tree.nodes() {
            report.record(node.id(), self.conditions_for(node, &ctx));
        }

        info!(
            "Classified {} nodes for {}: {} flagged, counts {:?}",
            tree.len(),
            package,
            report.flagged_count(),
            report.count_map()
        );
        report
    }

    /// Conditions triggered by one node, in table order.
    pub fn conditions_for(&self, node: &Node, ctx: &ScreenContext) -> Vec<Oac> {
        let atomic: Vec<Oac> = Oac::ALL
            .into_iter()
            .filter(|oac| !oac.is_aggregate())
            .filter(|oac| self.atomic(*oac, node, ctx))
            .collect();
        let p_invisible = Oac::P_FAMILY.iter().any(|p| atomic.contains(p));

        Oac::ALL
            .into_iter()
            .filter(|oac| gate(*oac, node))
            .filter(|oac| match oac {
                Oac::A1PInvisible => p_invisible,
                other => atomic.contains(other),
            })
            .collect()
    }

    /// Ungated truth value of a non-aggregate condition.
    fn atomic(&self, oac: Oac, node: &Node, ctx: &ScreenContext) -> bool {
        let out_of_bounds = node.is_out_of_bounds(&ctx.screen);
        let zero_area = node.normalized_bounds().area() == 0;

        match oac {
            Oac::P1Belongs => !node.belongs_to(&ctx.package),
            Oac::P2OutOfBounds => out_of_bounds,
            Oac::P3Covered => node.covered && !out_of_bounds,
            Oac::P4ZeroArea => zero_area,
            Oac::P5AInvisible => !node.visible && !out_of_bounds && !zero_area,
            Oac::A2ConditionalDisabled => !node.enabled,
            Oac::A3InconsistentAbilities => node.has_action(ACTION_CLICK) && !node.clickable,
            Oac::A4Camouflaged => {
                node.text.is_empty()
                    && node.content_description.is_empty()
                    && node.class_name == self.text_label_class
                    && node.visible
                    && !out_of_bounds
                    && !zero_area
            }
            Oac::OAd => node.is_ad,
            Oac::A1PInvisible => false,
        }
    }
}

/// Which nodes a condition is evaluated for.
fn gate(oac: Oac, node: &Node) -> bool {
    let data = node.potentially_data();
    let function = node.potentially_function();

    match (oac, oac.family()) {
        (Oac::OAd, _) => data || function,
        (Oac::A1PInvisible, _) => (data || function) && !node.is_ad,
        (_, OacFamily::P) => data && !node.is_ad,
        (_, OacFamily::A) => function && !node.is_ad,
        (_, OacFamily::O) => data || function,
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
