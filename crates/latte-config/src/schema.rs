//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Node-model and classifier tunables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Overrides the plain text label class used by the camouflage check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_label_class: Option<String>,

    /// Container classes added to the built-in set; a container counts as
    /// invisible when nothing inside it is visible.
    #[serde(default)]
    pub extra_container_classes: Vec<String>,
}

/// Report and overlay output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the JSON-lines report and the count summary.
    #[serde(default = "default_output_dir")]
    pub dir: String,

    #[serde(default = "default_report_file")]
    pub report_file: String,

    #[serde(default = "default_counts_file")]
    pub counts_file: String,

    /// Write annotated screenshots next to the source screenshot.
    #[serde(default = "default_true")]
    pub overlays: bool,

    /// Outline thickness in pixels.
    #[serde(default = "default_line_thickness")]
    pub line_thickness: u32,

    #[serde(default)]
    pub colors: OverlayColors,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            report_file: default_report_file(),
            counts_file: default_counts_file(),
            overlays: true,
            line_thickness: default_line_thickness(),
            colors: OverlayColors::default(),
        }
    }
}

fn default_output_dir() -> String {
    "latte-out".to_string()
}

fn default_report_file() -> String {
    "oacs.jsonl".to_string()
}

fn default_counts_file() -> String {
    "oac_counts.json".to_string()
}

fn default_true() -> bool {
    true
}

fn default_line_thickness() -> u32 {
    3
}

/// Outline colors per condition family, as RGB.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayColors {
    #[serde(default = "default_p_color")]
    pub p: [u8; 3],

    #[serde(default = "default_a_color")]
    pub a: [u8; 3],

    #[serde(default = "default_o_color")]
    pub o: [u8; 3],
}

impl Default for OverlayColors {
    fn default() -> Self {
        Self {
            p: default_p_color(),
            a: default_a_color(),
            o: default_o_color(),
        }
    }
}

fn default_p_color() -> [u8; 3] {
    [255, 0, 0]
}

fn default_a_color() -> [u8; 3] {
    [0, 0, 255]
}

fn default_o_color() -> [u8; 3] {
    [0, 160, 0]
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for rotated log files (tilde is expanded).
    #[serde(default = "default_log_dir")]
    pub dir: String,

    #[serde(default = "default_log_prefix")]
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: default_log_dir(),
            file_prefix: default_log_prefix(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "~/.latte/logs".to_string()
}

fn default_log_prefix() -> String {
    "latte".to_string()
}
