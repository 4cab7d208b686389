//! Error types for iqa-eval operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for iqa-eval operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during image quality assessment.
///
/// Variants fall into two tiers. Request-level errors (`InvalidInput`,
/// `Config`, `Io`, ...) abort the whole request before any metric is
/// computed. Per-metric errors (`UnknownMetric`, `MissingReference`,
/// `Computation`, `Resource`, ...) are caught by the dispatcher and
/// reported in the response's error map, keyed by metric name, so that
/// one failing metric never suppresses its siblings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Malformed request: missing field, count mismatch, bad path.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested metric name is not in the catalog.
    #[error("Unknown metric: {name}")]
    UnknownMetric {
        /// The name that failed to resolve.
        name: String,
    },

    /// A full-reference metric was requested without a reference image.
    #[error("Reference image required for metric: {metric}")]
    MissingReference {
        /// The full-reference metric that was requested.
        metric: String,
    },

    /// The scoring provider failed to compute a metric.
    #[error("Metric computation failed: {metric}: {reason}")]
    Computation {
        /// Name of the metric that failed.
        metric: String,
        /// Reason for the failure.
        reason: String,
    },

    /// A resource the scoring provider depends on is unavailable.
    #[error("Resource error: {0}")]
    Resource(String),

    /// Failed to load an image file.
    #[error("Image load failed: {path}: {reason}")]
    ImageLoad {
        /// Path to the image that failed to load.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// Image dimensions don't match between test and reference images.
    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height).
        expected: (usize, usize),
        /// Actual dimensions (width, height).
        actual: (usize, usize),
    },

    /// Unsupported image format.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Configuration file or value error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error wrapper.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Whether this error is recoverable at the per-metric level.
    ///
    /// Per-metric errors are folded into the response's error map;
    /// everything else aborts the request before computation starts.
    #[must_use]
    pub fn is_per_metric(&self) -> bool {
        matches!(
            self,
            Self::UnknownMetric { .. }
                | Self::MissingReference { .. }
                | Self::Computation { .. }
                | Self::Resource(_)
                | Self::ImageLoad { .. }
                | Self::DimensionMismatch { .. }
                | Self::UnsupportedFormat(_)
        )
    }
}
