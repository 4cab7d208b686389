//! # iqa-eval
//!
//! Image quality assessment orchestration library.
//!
//! Given a set of metric names and one or two image paths, this library
//! decides which metrics are computable (full-reference vs no-reference),
//! resolves each one through a bounded TTL/LRU score cache and a
//! pluggable scoring provider, and aggregates per-metric successes and
//! failures into a single response — one failing metric never aborts its
//! siblings. Batches fan out over a bounded worker pool with
//! input-order-preserving collection and per-image failure isolation.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use iqa_eval::{AssessmentSession, AssessRequest, SessionConfig, NativeProvider};
//!
//! let session = AssessmentSession::new(
//!     SessionConfig::default(),
//!     Arc::new(NativeProvider::new()),
//! )?;
//!
//! let request = AssessRequest::new("photo.jpg")
//!     .with_reference("original.jpg")
//!     .with_metrics(vec!["psnr".into(), "ssim".into()]);
//!
//! let assessment = session.assess(&request)?;
//! for (metric, score) in &assessment.scores {
//!     println!("{metric}: {score:.4}");
//! }
//! for (metric, error) in &assessment.errors {
//!     eprintln!("{metric} failed: {error}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types for the library
//! - [`catalog`]: Metric classification and score interpretation
//! - [`cache`]: Bounded, time-limited score cache
//! - [`dispatch`]: Cache-aware per-metric score resolution
//! - [`assess`]: Session, batch coordinator and response types
//! - [`perf`]: Wall-clock instrumentation for named operations
//! - [`provider`]: The scoring-provider seam
//! - [`scoring`]: Built-in pixel-domain scoring provider
//! - [`decode`]: Image file decoding for the native provider
//! - [`validate`]: Request validation

pub mod assess;
pub mod cache;
pub mod catalog;
pub mod decode;
pub mod dispatch;
pub mod error;
pub mod perf;
pub mod provider;
pub mod scoring;
pub mod validate;

// Re-export commonly used types
pub use assess::report::{
    list_metrics, metric_info, AssessRequest, Assessment, AssessmentMetadata, AssessmentReport,
    BandInfo, BatchRequest, MetricInfo, MetricsListing, ASSESSMENT_ERROR_KEY,
};
pub use assess::session::{AssessmentSession, SessionConfig, SessionConfigBuilder};
pub use cache::{CacheKey, ScoreCache};
pub use catalog::{
    classify, default_metrics, interpret, Classification, Metric, MetricDescriptor, ScoreBand,
};
pub use dispatch::{Dispatcher, ScoreRequest};
pub use error::{Error, Result};
pub use perf::{OperationStats, PerformanceMonitor};
pub use provider::ScoreProvider;
pub use scoring::{ImageData, NativeProvider};
