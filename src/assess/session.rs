//! Assessment session: configuration, single-image resolution and the
//! batch coordinator.
//!
//! [`AssessmentSession`] is the main entry point. It owns the score
//! cache, the scoring provider, the performance monitor and a bounded
//! rayon pool sized to the configured worker budget. Batches fan out one
//! unit of work per image; within an image, per-metric resolutions run
//! on the same pool. Output order always matches input order.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assess::report::{AssessRequest, Assessment, AssessmentMetadata, BatchRequest};
use crate::cache::{ScoreCache, DEFAULT_CACHE_SIZE, DEFAULT_CACHE_TTL};
use crate::catalog::{self, Metric};
use crate::dispatch::{Dispatcher, ScoreRequest};
use crate::error::{Error, Result};
use crate::perf::PerformanceMonitor;
use crate::provider::ScoreProvider;
use crate::validate;

/// Default bounded worker budget for batch fan-out.
pub const DEFAULT_MAX_WORKERS: usize = 10;

/// Configuration for an assessment session.
///
/// All fields have defaults; values can come from a JSON file
/// ([`from_file`](Self::from_file)) with `IQA_`-prefixed environment
/// variables taking precedence ([`apply_env`](Self::apply_env)).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum number of cached scores.
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,

    /// Cached-score time-to-live in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Worker budget bounding concurrent per-image and per-metric work.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
}

fn default_cache_size() -> usize {
    DEFAULT_CACHE_SIZE
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL.as_secs()
}

fn default_max_workers() -> usize {
    DEFAULT_MAX_WORKERS
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cache_size: default_cache_size(),
            cache_ttl_secs: default_cache_ttl_secs(),
            max_workers: default_max_workers(),
        }
    }
}

impl SessionConfig {
    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Apply `IQA_`-prefixed environment overrides:
    /// `IQA_CACHE_SIZE`, `IQA_CACHE_TTL_SECS`, `IQA_MAX_WORKERS`.
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_env_from(std::env::vars())
    }

    fn apply_env_from(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        for (key, value) in vars {
            match key.as_str() {
                "IQA_CACHE_SIZE" => set_parsed(&mut self.cache_size, &key, &value),
                "IQA_CACHE_TTL_SECS" => set_parsed(&mut self.cache_ttl_secs, &key, &value),
                "IQA_MAX_WORKERS" => set_parsed(&mut self.max_workers, &key, &value),
                _ => {}
            }
        }
        self
    }

    /// Cache TTL as a [`Duration`].
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

fn set_parsed<T: FromStr>(slot: &mut T, key: &str, value: &str) {
    match value.parse() {
        Ok(parsed) => *slot = parsed,
        Err(_) => tracing::warn!(key, value, "ignoring unparseable environment override"),
    }
}

/// Builder for [`SessionConfig`].
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
    cache_size: Option<usize>,
    cache_ttl: Option<Duration>,
    max_workers: Option<usize>,
}

impl SessionConfigBuilder {
    /// Set the maximum number of cached scores.
    #[must_use]
    pub fn cache_size(mut self, size: usize) -> Self {
        self.cache_size = Some(size);
        self
    }

    /// Set the cached-score time-to-live.
    #[must_use]
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    /// Set the bounded worker budget.
    #[must_use]
    pub fn max_workers(mut self, workers: usize) -> Self {
        self.max_workers = Some(workers);
        self
    }

    /// Build the configuration, filling unset fields with defaults.
    #[must_use]
    pub fn build(self) -> SessionConfig {
        SessionConfig {
            cache_size: self.cache_size.unwrap_or_else(default_cache_size),
            cache_ttl_secs: self
                .cache_ttl
                .map_or_else(default_cache_ttl_secs, |ttl| ttl.as_secs()),
            max_workers: self.max_workers.unwrap_or_else(default_max_workers),
        }
    }
}

/// Quality assessment session.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use iqa_eval::{AssessmentSession, AssessRequest, SessionConfig, NativeProvider};
///
/// let session = AssessmentSession::new(
///     SessionConfig::default(),
///     Arc::new(NativeProvider::new()),
/// )?;
///
/// let request = AssessRequest::new("photo.jpg")
///     .with_reference("original.jpg")
///     .with_metrics(vec!["psnr".into(), "ssim".into()]);
/// let assessment = session.assess(&request)?;
/// ```
pub struct AssessmentSession {
    config: SessionConfig,
    dispatcher: Dispatcher,
    monitor: Arc<PerformanceMonitor>,
    pool: rayon::ThreadPool,
}

impl AssessmentSession {
    /// Create a session with a fresh performance monitor.
    pub fn new(config: SessionConfig, provider: Arc<dyn ScoreProvider>) -> Result<Self> {
        Self::with_monitor(config, provider, Arc::new(PerformanceMonitor::new()))
    }

    /// Create a session recording timings into the given monitor.
    pub fn with_monitor(
        config: SessionConfig,
        provider: Arc<dyn ScoreProvider>,
        monitor: Arc<PerformanceMonitor>,
    ) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.max_workers.max(1))
            .build()
            .map_err(|e| Error::Config(format!("failed to build worker pool: {e}")))?;

        let cache = ScoreCache::new(config.cache_size, config.cache_ttl());
        let dispatcher = Dispatcher::new(cache, provider, Arc::clone(&monitor));

        Ok(Self {
            config,
            dispatcher,
            monitor,
            pool,
        })
    }

    /// This session's configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The performance monitor recording this session's timings.
    #[must_use]
    pub fn monitor(&self) -> &Arc<PerformanceMonitor> {
        &self.monitor
    }

    /// The score cache backing this session.
    #[must_use]
    pub fn cache(&self) -> &ScoreCache {
        self.dispatcher.cache()
    }

    /// Assess a single image.
    ///
    /// Fails only on request-level validation (bad paths, empty metric
    /// list); every per-metric failure is reported in the returned
    /// [`Assessment`]'s error map instead.
    pub fn assess(&self, request: &AssessRequest) -> Result<Assessment> {
        self.monitor
            .track("assess_image", || self.assess_validated(request))
    }

    fn assess_validated(&self, request: &AssessRequest) -> Result<Assessment> {
        validate::validate_image_path(&request.image_path)?;
        if let Some(reference) = &request.reference_path {
            validate::validate_image_path(reference)?;
        }

        let names: Vec<String> = match &request.metrics {
            Some(names) => {
                validate::validate_metric_names(names)?;
                names.clone()
            }
            None => catalog::default_metrics(request.reference_path.is_some())
                .iter()
                .map(|m| m.name().to_string())
                .collect(),
        };

        let classification = catalog::classify(&names);

        let mut errors = BTreeMap::new();
        for name in &classification.unknown {
            let error = Error::UnknownMetric { name: name.clone() };
            errors.insert(name.clone(), error.to_string());
        }

        let known: Vec<Metric> = classification
            .reference_free
            .iter()
            .chain(classification.reference_required.iter())
            .copied()
            .collect();

        tracing::debug!(
            image = %request.image_path.display(),
            metrics = known.len(),
            unknown = classification.unknown.len(),
            "assessing image"
        );

        // Per-metric resolutions are independent; run them on the pool.
        let outcomes: Vec<(Metric, Result<f64>)> = self.pool.install(|| {
            known
                .par_iter()
                .map(|&metric| {
                    let mut score_request =
                        ScoreRequest::new(metric.name(), request.image_path.clone());
                    if let Some(reference) = &request.reference_path {
                        score_request = score_request.with_reference(reference.clone());
                    }
                    (metric, self.dispatcher.resolve(&score_request))
                })
                .collect()
        });

        let mut scores = BTreeMap::new();
        for (metric, outcome) in outcomes {
            match outcome {
                Ok(score) => {
                    scores.insert(metric.name().to_string(), score);
                }
                Err(error) => {
                    errors.insert(metric.name().to_string(), error.to_string());
                }
            }
        }

        Ok(Assessment {
            metadata: AssessmentMetadata {
                image_path: request.image_path.clone(),
                reference_path: request.reference_path.clone(),
                metrics_computed: scores.keys().cloned().collect(),
                failed_metrics: errors.keys().cloned().collect(),
            },
            scores,
            errors,
        })
    }

    /// Assess a batch of images.
    ///
    /// The output has exactly one entry per input image, in input order,
    /// regardless of completion order. An image that fails wholesale
    /// keeps its slot with a single reserved
    /// [`assessment_error`](crate::assess::report::ASSESSMENT_ERROR_KEY)
    /// entry.
    pub fn assess_batch(&self, request: &BatchRequest) -> Result<Vec<Assessment>> {
        self.assess_batch_with_deadline(request, None)
    }

    /// Assess a batch under an external deadline.
    ///
    /// A unit of work that cannot start before the deadline reports a
    /// per-image timeout instead of running; completed siblings are
    /// unaffected. In-flight work is not interrupted (the provider is
    /// opaque and offers no cancellation point).
    pub fn assess_batch_with_deadline(
        &self,
        request: &BatchRequest,
        deadline: Option<Instant>,
    ) -> Result<Vec<Assessment>> {
        self.monitor
            .track("batch_assessment", || self.batch_validated(request, deadline))
    }

    fn batch_validated(
        &self,
        request: &BatchRequest,
        deadline: Option<Instant>,
    ) -> Result<Vec<Assessment>> {
        validate::validate_batch_shape(
            request.image_paths.len(),
            request.reference_paths.as_ref().map(Vec::len),
        )?;

        tracing::info!(
            images = request.image_paths.len(),
            workers = self.config.max_workers,
            "starting batch assessment"
        );

        let items: Vec<Assessment> = self.pool.install(|| {
            (0..request.image_paths.len())
                .into_par_iter()
                .map(|i| self.assess_batch_item(request, i, deadline))
                .collect()
        });

        Ok(items)
    }

    fn assess_batch_item(
        &self,
        request: &BatchRequest,
        index: usize,
        deadline: Option<Instant>,
    ) -> Assessment {
        let image_path: &PathBuf = &request.image_paths[index];
        let reference_path = request
            .reference_paths
            .as_ref()
            .map(|refs| refs[index].clone());

        if let Some(deadline) = deadline {
            if Instant::now() > deadline {
                tracing::warn!(image = %image_path.display(), "deadline exceeded before assessment started");
                return Assessment::failed(
                    image_path,
                    reference_path.as_deref(),
                    "deadline exceeded before assessment started",
                );
            }
        }

        let single = AssessRequest {
            image_path: image_path.clone(),
            reference_path,
            metrics: request.metrics.clone(),
        };

        match self.assess(&single) {
            Ok(assessment) => assessment,
            Err(error) => {
                tracing::warn!(
                    image = %single.image_path.display(),
                    error = %error,
                    "image assessment failed"
                );
                Assessment::failed(
                    &single.image_path,
                    single.reference_path.as_deref(),
                    &error.to_string(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Metric;
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubProvider {
        scores: HashMap<Metric, f64>,
        failing: Option<Metric>,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn new(scores: &[(Metric, f64)]) -> Self {
            Self {
                scores: scores.iter().copied().collect(),
                failing: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing_on(mut self, metric: Metric) -> Self {
            self.failing = Some(metric);
            self
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ScoreProvider for StubProvider {
        fn compute(&self, metric: Metric, _image: &Path, _reference: Option<&Path>) -> Result<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing == Some(metric) {
                return Err(Error::Computation {
                    metric: metric.name().to_string(),
                    reason: "stub failure".to_string(),
                });
            }
            self.scores
                .get(&metric)
                .copied()
                .ok_or_else(|| Error::Computation {
                    metric: metric.name().to_string(),
                    reason: "no stub score".to_string(),
                })
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    fn touch_image(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"pixels").unwrap();
        path
    }

    fn session_with(provider: Arc<StubProvider>) -> AssessmentSession {
        AssessmentSession::new(
            SessionConfig::builder().max_workers(4).build(),
            provider,
        )
        .unwrap()
    }

    fn metric_names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_no_reference_metrics_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let image = touch_image(dir.path(), "a.jpg");
        let provider = Arc::new(StubProvider::new(&[
            (Metric::Brisque, 18.0),
            (Metric::Niqe, 3.1),
        ]));
        let session = session_with(Arc::clone(&provider));

        let request =
            AssessRequest::new(&image).with_metrics(metric_names(&["brisque", "niqe"]));
        let assessment = session.assess(&request).unwrap();

        assert_eq!(assessment.scores.len(), 2);
        assert!(assessment.errors.is_empty());
        assert_eq!(assessment.metadata.metrics_computed.len(), 2);
        assert!(assessment.metadata.failed_metrics.is_empty());
    }

    #[test]
    fn test_reference_required_without_reference_all_error() {
        let dir = tempfile::tempdir().unwrap();
        let image = touch_image(dir.path(), "a.jpg");
        let provider = Arc::new(StubProvider::new(&[
            (Metric::Psnr, 40.0),
            (Metric::Ssim, 0.99),
        ]));
        let session = session_with(Arc::clone(&provider));

        let request = AssessRequest::new(&image).with_metrics(metric_names(&["psnr", "ssim"]));
        let assessment = session.assess(&request).unwrap();

        assert!(assessment.scores.is_empty());
        assert_eq!(assessment.errors.len(), 2);
        for message in assessment.errors.values() {
            assert!(message.contains("Reference image required"));
        }
        // The provider must never have been consulted.
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_one_failing_metric_does_not_abort_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let image = touch_image(dir.path(), "a.jpg");
        let provider = Arc::new(
            StubProvider::new(&[(Metric::Niqe, 3.1)]).failing_on(Metric::Brisque),
        );
        let session = session_with(provider);

        let request =
            AssessRequest::new(&image).with_metrics(metric_names(&["brisque", "niqe"]));
        let assessment = session.assess(&request).unwrap();

        assert_eq!(assessment.scores.len(), 1);
        assert!(assessment.scores.contains_key("niqe"));
        assert_eq!(assessment.errors.len(), 1);
        assert!(assessment.errors["brisque"].contains("stub failure"));
    }

    #[test]
    fn test_unknown_metric_reported_not_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let image = touch_image(dir.path(), "a.jpg");
        let provider = Arc::new(StubProvider::new(&[(Metric::Niqe, 3.1)]));
        let session = session_with(provider);

        let request =
            AssessRequest::new(&image).with_metrics(metric_names(&["niqe", "not_a_metric"]));
        let assessment = session.assess(&request).unwrap();

        assert_eq!(assessment.scores.len(), 1);
        assert!(assessment.errors["not_a_metric"].contains("Unknown metric"));
    }

    #[test]
    fn test_default_metrics_selected_by_reference_presence() {
        let dir = tempfile::tempdir().unwrap();
        let image = touch_image(dir.path(), "a.jpg");
        let reference = touch_image(dir.path(), "r.jpg");
        let provider = Arc::new(StubProvider::new(&[
            (Metric::Psnr, 40.0),
            (Metric::Ssim, 0.99),
            (Metric::Lpips, 0.05),
            (Metric::Niqe, 3.1),
            (Metric::Brisque, 18.0),
        ]));
        let session = session_with(provider);

        let without = session.assess(&AssessRequest::new(&image)).unwrap();
        let mut keys: Vec<&str> = without.scores.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["brisque", "niqe"]);

        let with = session
            .assess(&AssessRequest::new(&image).with_reference(&reference))
            .unwrap();
        let mut keys: Vec<&str> = with.scores.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["lpips", "psnr", "ssim"]);
    }

    #[test]
    fn test_invalid_image_path_aborts_request() {
        let provider = Arc::new(StubProvider::new(&[(Metric::Niqe, 3.1)]));
        let session = session_with(Arc::clone(&provider));

        let request = AssessRequest::new("/nonexistent/a.jpg");
        let err = session.assess(&request).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_repeat_request_reuses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let image = touch_image(dir.path(), "a.jpg");
        let provider = Arc::new(StubProvider::new(&[
            (Metric::Brisque, 18.0),
            (Metric::Niqe, 3.1),
        ]));
        let session = session_with(Arc::clone(&provider));

        let request =
            AssessRequest::new(&image).with_metrics(metric_names(&["brisque", "niqe"]));
        session.assess(&request).unwrap();
        let first_round_calls = provider.call_count();

        let again = session.assess(&request).unwrap();
        assert_eq!(again.scores.len(), 2);
        // Second pass served entirely from cache.
        assert_eq!(provider.call_count(), first_round_calls);
    }

    #[test]
    fn test_batch_preserves_input_order_and_length() {
        let dir = tempfile::tempdir().unwrap();
        let images: Vec<PathBuf> = (0..12)
            .map(|i| touch_image(dir.path(), &format!("img_{i:02}.jpg")))
            .collect();
        let provider = Arc::new(StubProvider::new(&[(Metric::Niqe, 3.1)]));
        let session = session_with(provider);

        let request = BatchRequest {
            image_paths: images.clone(),
            reference_paths: None,
            metrics: Some(metric_names(&["niqe"])),
        };
        let items = session.assess_batch(&request).unwrap();

        assert_eq!(items.len(), images.len());
        for (item, expected) in items.iter().zip(images.iter()) {
            assert_eq!(&item.metadata.image_path, expected);
        }
    }

    #[test]
    fn test_batch_isolates_whole_image_failure() {
        let dir = tempfile::tempdir().unwrap();
        let good_one = touch_image(dir.path(), "one.jpg");
        let missing = dir.path().join("missing.jpg");
        let good_two = touch_image(dir.path(), "two.jpg");
        let provider = Arc::new(StubProvider::new(&[(Metric::Niqe, 3.1)]));
        let session = session_with(provider);

        let request = BatchRequest {
            image_paths: vec![good_one, missing.clone(), good_two],
            reference_paths: None,
            metrics: Some(metric_names(&["niqe"])),
        };
        let items = session.assess_batch(&request).unwrap();

        assert_eq!(items.len(), 3);
        assert!(!items[0].is_total_failure());
        assert!(!items[2].is_total_failure());
        assert!(items[1].is_total_failure());
        assert_eq!(items[1].metadata.image_path, missing);
        assert_eq!(items[0].scores["niqe"], 3.1);
        assert_eq!(items[2].scores["niqe"], 3.1);
    }

    #[test]
    fn test_batch_reference_count_mismatch_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch_image(dir.path(), "a.jpg");
        let b = touch_image(dir.path(), "b.jpg");
        let r = touch_image(dir.path(), "r.jpg");
        let provider = Arc::new(StubProvider::new(&[(Metric::Psnr, 40.0)]));
        let session = session_with(provider);

        let request = BatchRequest {
            image_paths: vec![a, b],
            reference_paths: Some(vec![r]),
            metrics: None,
        };
        let err = session.assess_batch(&request).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_batch_expired_deadline_reports_timeouts() {
        let dir = tempfile::tempdir().unwrap();
        let images: Vec<PathBuf> = (0..3)
            .map(|i| touch_image(dir.path(), &format!("img_{i}.jpg")))
            .collect();
        let provider = Arc::new(StubProvider::new(&[(Metric::Niqe, 3.1)]));
        let session = session_with(Arc::clone(&provider));

        let deadline = Instant::now() - Duration::from_millis(10);
        let request = BatchRequest {
            image_paths: images,
            reference_paths: None,
            metrics: Some(metric_names(&["niqe"])),
        };
        let items = session
            .assess_batch_with_deadline(&request, Some(deadline))
            .unwrap();

        assert_eq!(items.len(), 3);
        for item in &items {
            assert!(item.is_total_failure());
            assert!(item.errors["assessment_error"].contains("deadline"));
        }
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_session_timings_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let image = touch_image(dir.path(), "a.jpg");
        let provider = Arc::new(StubProvider::new(&[(Metric::Niqe, 3.1)]));
        let session = session_with(provider);

        session
            .assess(&AssessRequest::new(&image).with_metrics(metric_names(&["niqe"])))
            .unwrap();

        let snapshot = session.monitor().snapshot();
        assert!(snapshot.contains_key("assess_image"));
        assert!(snapshot.contains_key("resolve_metric"));
    }

    #[test]
    fn test_config_builder_and_defaults() {
        let config = SessionConfig::builder()
            .cache_size(50)
            .cache_ttl(Duration::from_secs(120))
            .build();
        assert_eq!(config.cache_size, 50);
        assert_eq!(config.cache_ttl(), Duration::from_secs(120));
        assert_eq!(config.max_workers, DEFAULT_MAX_WORKERS);
    }

    #[test]
    fn test_config_from_file_with_partial_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"cache_size": 25}"#).unwrap();

        let config = SessionConfig::from_file(&path).unwrap();
        assert_eq!(config.cache_size, 25);
        assert_eq!(config.max_workers, DEFAULT_MAX_WORKERS);

        assert!(SessionConfig::from_file(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn test_config_env_overrides() {
        let config = SessionConfig::default().apply_env_from(vec![
            ("IQA_CACHE_SIZE".to_string(), "7".to_string()),
            ("IQA_MAX_WORKERS".to_string(), "3".to_string()),
            ("IQA_CACHE_TTL_SECS".to_string(), "not-a-number".to_string()),
            ("UNRELATED".to_string(), "9".to_string()),
        ]);
        assert_eq!(config.cache_size, 7);
        assert_eq!(config.max_workers, 3);
        // Unparseable overrides are ignored, not fatal.
        assert_eq!(config.cache_ttl_secs, default_cache_ttl_secs());
    }
}
