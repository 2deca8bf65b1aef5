//! `latte nodes` handler.

use std::fs;
use std::path::Path;

use tracing::info;

use latte_config::Config;
use latte_tree::{AnnotationPipeline, TreeBuilder};

/// Print the annotated tree as JSON lines, optionally filtered.
pub(crate) fn run(
    config: &Config,
    dump: &Path,
    actionable: bool,
    data: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dump = fs::read_to_string(dump)?;
    let builder = TreeBuilder::new()
        .with_container_classes(config.analysis.extra_container_classes.iter().cloned());
    let outcome = AnnotationPipeline::standard().build(&builder, &dump);
    info!(
        "{} nodes, {} parse error(s), {} skipped element(s)",
        outcome.tree.len(),
        outcome.parse_errors,
        outcome.skipped_elements
    );

    for node in outcome.tree.nodes() {
        if actionable && !node.potentially_function() {
            continue;
        }
        if data && !node.potentially_data() {
            continue;
        }
        println!("{}", serde_json::to_string(node)?);
    }

    Ok(())
}
