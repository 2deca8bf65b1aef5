//! Report writing errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while writing report artifacts. The classification result
/// itself is never affected by these.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image error on {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Some artifacts were written, others failed.
    #[error("{} artifact(s) failed, first: {}", .failures.len(), first_failure(.failures))]
    Partial {
        written: Vec<PathBuf>,
        failures: Vec<ReportError>,
    },
}

fn first_failure(failures: &[ReportError]) -> String {
    failures
        .first()
        .map(|e| e.to_string())
        .unwrap_or_default()
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        ReportError::Image {
            path: path.into(),
            source,
        }
    }
}
