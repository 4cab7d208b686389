//! Scoring provider seam.
//!
//! The orchestration layer never computes metric scores itself; it calls
//! into a [`ScoreProvider`], an external collaborator supplied at session
//! construction. The library ships one implementation
//! ([`NativeProvider`](crate::scoring::NativeProvider)) for the
//! pixel-domain metrics it can compute in-process; deployments backed by
//! model-based scorers implement this trait over their own runtime.

use std::path::Path;

use crate::catalog::Metric;
use crate::error::Result;

/// An opaque scoring function for catalog metrics.
///
/// Implementations must be thread-safe: the batch coordinator invokes
/// `compute` from many worker threads at once. A call receives the
/// reference path only when the metric requires one.
///
/// Failures of any kind (I/O, unsupported input, internal faults) are
/// returned as errors; the dispatcher records them per metric and never
/// lets them abort sibling computations.
pub trait ScoreProvider: Send + Sync {
    /// Compute the raw score for `metric` on `image`.
    fn compute(&self, metric: Metric, image: &Path, reference: Option<&Path>) -> Result<f64>;

    /// Identifier used in logs and error messages.
    fn name(&self) -> &'static str {
        "provider"
    }
}
