//! Overly accessible / inaccessible condition (OAC) analysis for Latte.
//!
//! Classifies an annotated [`latte_tree::NodeTree`] against a fixed table
//! of conditions and writes the findings as a JSON-lines report, a count
//! summary and screenshot overlays.

pub mod analyzer;
pub mod classifier;
pub mod error;
pub mod oac;
pub mod overlay;
pub mod report;
pub mod writer;

use std::path::Path;

use latte_config::Config;

pub use analyzer::{Analysis, Analyzer};
pub use classifier::{OacClassifier, ScreenContext, DEFAULT_TEXT_LABEL_CLASS};
pub use error::ReportError;
pub use oac::{Oac, OacFamily};
pub use overlay::{overlay_path, OverlayPainter, COMBINED_LABEL};
pub use report::{OacRecord, OacReport};
pub use writer::{ReportWriter, WrittenArtifacts};

/// Analyze `dump` and write its artifacts under `out_dir`.
///
/// The analysis is returned even when writing fails.
pub fn analyze_dump(
    dump: &str,
    package: &str,
    screenshot: Option<&Path>,
    out_dir: &Path,
    config: &Config,
) -> (Analysis, Result<WrittenArtifacts, ReportError>) {
    let analysis = Analyzer::from_config(&config.analysis).analyze(dump, package);
    let written = ReportWriter::from_config(&config.output, out_dir).write(
        &analysis.tree,
        &analysis.report,
        screenshot,
    );
    (analysis, written)
}
