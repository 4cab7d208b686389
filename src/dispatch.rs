//! Per-metric score resolution.
//!
//! [`Dispatcher::resolve`] turns one [`ScoreRequest`] into a score or a
//! per-metric error: it validates the metric against the catalog, checks
//! the reference requirement, consults the score cache, and only then
//! invokes the scoring provider — exactly once per unique
//! (metric, image, reference) combination within the cache's TTL window.
//!
//! Every failure is returned as an `Err` carrying the metric name; the
//! caller folds it into the response's error map, so one failing metric
//! never aborts its siblings.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::{CacheKey, ScoreCache};
use crate::catalog::Metric;
use crate::error::{Error, Result};
use crate::perf::PerformanceMonitor;
use crate::provider::ScoreProvider;

/// One evaluation unit: a metric name applied to an image, with an
/// optional reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRequest {
    /// Requested metric name (catalog membership checked at resolve time).
    pub metric_name: String,
    /// Test image path.
    pub image_path: PathBuf,
    /// Reference image path, if the caller has one.
    pub reference_path: Option<PathBuf>,
}

impl ScoreRequest {
    /// Build a request without a reference image.
    #[must_use]
    pub fn new(metric_name: impl Into<String>, image_path: impl Into<PathBuf>) -> Self {
        Self {
            metric_name: metric_name.into(),
            image_path: image_path.into(),
            reference_path: None,
        }
    }

    /// Attach a reference image path.
    #[must_use]
    pub fn with_reference(mut self, reference_path: impl Into<PathBuf>) -> Self {
        self.reference_path = Some(reference_path.into());
        self
    }
}

/// Cache-aware, error-isolating score resolver.
pub struct Dispatcher {
    cache: ScoreCache,
    provider: Arc<dyn ScoreProvider>,
    monitor: Arc<PerformanceMonitor>,
}

impl Dispatcher {
    /// Create a dispatcher over the given cache, provider and monitor.
    #[must_use]
    pub fn new(
        cache: ScoreCache,
        provider: Arc<dyn ScoreProvider>,
        monitor: Arc<PerformanceMonitor>,
    ) -> Self {
        Self {
            cache,
            provider,
            monitor,
        }
    }

    /// The cache backing this dispatcher.
    #[must_use]
    pub fn cache(&self) -> &ScoreCache {
        &self.cache
    }

    /// Resolve one score request.
    ///
    /// On a cache hit the provider is not invoked. On a miss the provider
    /// runs outside any lock; a successful score is stored before being
    /// returned, a failure is returned as a per-metric error and nothing
    /// is cached (the next request retries the provider).
    pub fn resolve(&self, request: &ScoreRequest) -> Result<f64> {
        self.monitor
            .track("resolve_metric", || self.resolve_uncounted(request))
    }

    fn resolve_uncounted(&self, request: &ScoreRequest) -> Result<f64> {
        let metric = Metric::from_name(&request.metric_name)?;

        if metric.requires_reference() && request.reference_path.is_none() {
            return Err(Error::MissingReference {
                metric: metric.name().to_string(),
            });
        }

        // A reference contributes to identity (and reaches the provider)
        // only when the metric actually uses one.
        let reference: Option<&Path> = if metric.requires_reference() {
            request.reference_path.as_deref()
        } else {
            None
        };

        let key = CacheKey::new(metric, &request.image_path, reference);
        if let Some(score) = self.cache.get(&key) {
            tracing::debug!(metric = %metric, image = %request.image_path.display(), "cache hit");
            return Ok(score);
        }

        tracing::debug!(
            metric = %metric,
            image = %request.image_path.display(),
            provider = self.provider.name(),
            "cache miss, invoking provider"
        );
        let score = self
            .provider
            .compute(metric, &request.image_path, reference)?;

        self.cache.put(key, score);
        Ok(score)
    }
}
