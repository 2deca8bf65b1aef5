//! Report artifacts: JSON-lines report, count summary, overlays.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use latte_config::OutputConfig;
use latte_tree::{NodeTree, Rect};

use crate::error::ReportError;
use crate::oac::{Oac, OacFamily};
use crate::overlay::{overlay_path, OverlayPainter, COMBINED_LABEL};
use crate::report::OacReport;

/// Paths of everything written for one capture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenArtifacts {
    pub report: Option<PathBuf>,
    pub counts: Option<PathBuf>,
    pub overlays: Vec<PathBuf>,
}

impl WrittenArtifacts {
    pub fn paths(&self) -> Vec<PathBuf> {
        self.report
            .iter()
            .chain(self.counts.iter())
            .chain(self.overlays.iter())
            .cloned()
            .collect()
    }
}

/// Writes a classified capture to disk.
///
/// Every artifact is attempted even when an earlier one fails; failures are
/// returned together as [`ReportError::Partial`].
#[derive(Debug, Clone)]
pub struct ReportWriter {
    out_dir: PathBuf,
    report_file: String,
    counts_file: String,
    overlays: bool,
    painter: OverlayPainter,
}

impl ReportWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        let defaults = OutputConfig::default();
        Self {
            out_dir: out_dir.into(),
            report_file: defaults.report_file,
            counts_file: defaults.counts_file,
            overlays: defaults.overlays,
            painter: OverlayPainter::default(),
        }
    }

    /// Writer for `config`; the output directory must already be expanded.
    pub fn from_config(config: &OutputConfig, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            report_file: config.report_file.clone(),
            counts_file: config.counts_file.clone(),
            overlays: config.overlays,
            painter: OverlayPainter::from_config(config),
        }
    }

    pub fn with_overlays(mut self, enabled: bool) -> Self {
        self.overlays = enabled;
        self
    }

    pub fn report_path(&self) -> PathBuf {
        self.out_dir.join(&self.report_file)
    }

    pub fn counts_path(&self) -> PathBuf {
        self.out_dir.join(&self.counts_file)
    }

    pub fn write(
        &self,
        tree: &NodeTree,
        report: &OacReport,
        screenshot: Option<&Path>,
    ) -> Result<WrittenArtifacts, ReportError> {
        let mut written = WrittenArtifacts::default();
        let mut failures = Vec::new();

        if let Err(e) = fs::create_dir_all(&self.out_dir) {
            failures.push(ReportError::io(&self.out_dir, e));
        }

        match self.write_report(tree, report) {
            Ok(path) => written.report = Some(path),
            Err(e) => failures.push(e),
        }
        match self.write_counts(report) {
            Ok(path) => written.counts = Some(path),
            Err(e) => failures.push(e),
        }

        match (screenshot, report.screen()) {
            (Some(shot), Some(screen)) if self.overlays => {
                self.write_overlays(tree, report, shot, screen, &mut written, &mut failures)
            }
            (Some(_), None) => debug!("No screen geometry, skipping overlays"),
            _ => {}
        }

        if failures.is_empty() {
            info!(
                "Wrote {} artifact(s) to {}",
                written.paths().len(),
                self.out_dir.display()
            );
            Ok(written)
        } else {
            for failure in &failures {
                warn!("Failed to write artifact: {}", failure);
            }
            Err(ReportError::Partial {
                written: written.paths(),
                failures,
            })
        }
    }

    fn write_report(&self, tree: &NodeTree, report: &OacReport) -> Result<PathBuf, ReportError> {
        let path = self.report_path();
        let body = report.to_json_lines(tree)?;
        fs::write(&path, body).map_err(|e| ReportError::io(&path, e))?;
        debug!("Wrote {}", path.display());
        Ok(path)
    }

    fn write_counts(&self, report: &OacReport) -> Result<PathBuf, ReportError> {
        let path = self.counts_path();
        let body = serde_json::to_string_pretty(&report.count_map())?;
        fs::write(&path, body).map_err(|e| ReportError::io(&path, e))?;
        debug!("Wrote {}", path.display());
        Ok(path)
    }

    fn write_overlays(
        &self,
        tree: &NodeTree,
        report: &OacReport,
        screenshot: &Path,
        screen: Rect,
        written: &mut WrittenArtifacts,
        failures: &mut Vec<ReportError>,
    ) {
        let base = match self.painter.load(screenshot) {
            Ok(img) => img,
            Err(e) => {
                failures.push(e);
                return;
            }
        };

        let boxes_for = |oac: Oac| -> Vec<(Rect, OacFamily)> {
            report
                .nodes_for(oac)
                .iter()
                .filter_map(|id| tree.get(*id))
                .map(|node| (node.bounds, oac.family()))
                .collect()
        };

        let mut all = Vec::new();
        let mut overlays: Vec<(&str, Vec<(Rect, OacFamily)>)> = Vec::new();
        for oac in Oac::ALL {
            let boxes = boxes_for(oac);
            all.extend(boxes.iter().copied());
            overlays.push((oac.name(), boxes));
        }
        overlays.push((COMBINED_LABEL, all));

        for (label, boxes) in overlays {
            let path = overlay_path(screenshot, label, !boxes.is_empty());
            let img = if boxes.is_empty() {
                base.clone()
            } else {
                self.painter.paint(&base, screen, &boxes)
            };
            match self.painter.save(&img, &path) {
                Ok(()) => {
                    debug!("Wrote {}", path.display());
                    written.overlays.push(path);
                }
                Err(e) => failures.push(e),
            }
        }
    }
}
