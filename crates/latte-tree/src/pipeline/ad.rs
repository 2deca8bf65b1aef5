//! Ad-detection pass.

use super::{AnnotationPass, ChildSlot};
use crate::node::Node;

const AD_SUFFIXES: &[&str] = &["_ad", "_ads"];
const AD_INFIXES: &[&str] = &["_ad_"];
const AD_PREFIXES: &[&str] = &["ad_", "fl_adp", "ads", "flAds"];

/// Whether the local segment of a resource id (after the last `/`) looks
/// like advertising content.
pub fn is_ad_resource_id(resource_id: &str) -> bool {
    let local = resource_id.rsplit('/').next().unwrap_or(resource_id);
    if local.is_empty() {
        return false;
    }
    AD_SUFFIXES.iter().any(|s| local.ends_with(s))
        || AD_INFIXES.iter().any(|s| local.contains(s))
        || AD_PREFIXES.iter().any(|s| local.starts_with(s))
}

/// Marks ad nodes; the flag is inherited by every descendant.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdPass;

impl AnnotationPass for AdPass {
    type Extra = ();

    fn name(&self) -> &'static str {
        "ad"
    }

    fn visit_root(&self, root: &mut Node, _extra: &mut ()) {
        root.is_ad = is_ad_resource_id(&root.resource_id);
    }

    fn visit(&self, node: &Node, _node_extra: &(), children: &mut [ChildSlot<'_, ()>]) {
        for slot in children.iter_mut() {
            if node.is_ad || is_ad_resource_id(&slot.node.resource_id) {
                slot.node.is_ad = true;
            }
        }
    }
}
