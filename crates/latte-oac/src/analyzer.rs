//! One capture, start to finish: build, annotate, classify.

use tracing::{info, warn};

use latte_config::AnalysisConfig;
use latte_tree::{AnnotationPipeline, NodeTree, TreeBuilder};

use crate::classifier::OacClassifier;
use crate::report::OacReport;

/// Everything computed for one dump, before anything is written.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub tree: NodeTree,
    pub report: OacReport,
    pub parse_errors: usize,
    pub skipped_elements: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    builder: TreeBuilder,
    classifier: OacClassifier,
}

impl Analyzer {
    pub fn new(builder: TreeBuilder, classifier: OacClassifier) -> Self {
        Self {
            builder,
            classifier,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        let builder =
            TreeBuilder::new().with_container_classes(config.extra_container_classes.iter().cloned());
        let classifier = match &config.text_label_class {
            Some(class) => OacClassifier::new().with_text_label_class(class.clone()),
            None => OacClassifier::new(),
        };
        Self::new(builder, classifier)
    }

    /// Analyze one dump for the app `package`. Never fails; a garbage dump
    /// gives an empty tree and an all-zero report.
    pub fn analyze(&self, dump: &str, package: &str) -> Analysis {
        let outcome = AnnotationPipeline::standard().build(&self.builder, dump);
        if outcome.tree.is_empty() {
            warn!("Dump produced no nodes ({} parse errors)", outcome.parse_errors);
        }

        let report = self.classifier.classify(&outcome.tree, package);
        info!(
            "Analyzed {} nodes, {} skipped, {} flagged",
            outcome.tree.len(),
            outcome.skipped_elements,
            report.flagged_count()
        );

        Analysis {
            tree: outcome.tree,
            report,
            parse_errors: outcome.parse_errors,
            skipped_elements: outcome.skipped_elements,
        }
    }
}
