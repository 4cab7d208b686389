//! Request, response and report types for quality assessment.
//!
//! These serde types are the external interface boundary: whatever
//! surface fronts the library (CLI, service glue) exchanges exactly
//! these shapes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::{self, Metric};
use crate::error::Result;

/// Reserved error-map key marking a whole-image failure.
///
/// A batch slot whose image could not be processed at all carries this
/// single entry instead of per-metric errors; the slot itself is never
/// omitted.
pub const ASSESSMENT_ERROR_KEY: &str = "assessment_error";

/// Request to assess a single image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessRequest {
    /// Path to the test image.
    pub image_path: PathBuf,

    /// Path to the reference image, required for full-reference metrics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_path: Option<PathBuf>,

    /// Metrics to compute; `None` selects the catalog defaults for the
    /// request shape (FR defaults with a reference, NR defaults without).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<String>>,
}

impl AssessRequest {
    /// Build a request for one image with default metrics.
    #[must_use]
    pub fn new(image_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
            reference_path: None,
            metrics: None,
        }
    }

    /// Attach a reference image.
    #[must_use]
    pub fn with_reference(mut self, reference_path: impl Into<PathBuf>) -> Self {
        self.reference_path = Some(reference_path.into());
        self
    }

    /// Request specific metrics by name.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Vec<String>) -> Self {
        self.metrics = Some(metrics);
        self
    }
}

/// Request to assess several images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Test image paths; the response has one entry per path, in order.
    pub image_paths: Vec<PathBuf>,

    /// Reference paths, one per image, required for full-reference
    /// metrics. When present the length must match `image_paths`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_paths: Option<Vec<PathBuf>>,

    /// Metrics to compute; `None` selects the catalog defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<String>>,
}

/// Outcome of assessing one image.
///
/// Every requested metric appears exactly once: in `scores` if it
/// computed, in `errors` (keyed by metric name) if it did not. One
/// failing metric never suppresses the others.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// Computed scores by metric name.
    pub scores: BTreeMap<String, f64>,

    /// Failure messages by metric name (or [`ASSESSMENT_ERROR_KEY`] for a
    /// whole-image failure).
    pub errors: BTreeMap<String, String>,

    /// Echo of the request plus computed/failed metric lists.
    pub metadata: AssessmentMetadata,
}

impl Assessment {
    /// Build the assessment for an image that could not be processed at
    /// all (load failure, timeout). The output-slot invariant holds: the
    /// image keeps its position in batch output with a single reserved
    /// error entry.
    #[must_use]
    pub fn failed(image_path: &Path, reference_path: Option<&Path>, message: &str) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(ASSESSMENT_ERROR_KEY.to_string(), message.to_string());
        Self {
            scores: BTreeMap::new(),
            errors,
            metadata: AssessmentMetadata {
                image_path: image_path.to_path_buf(),
                reference_path: reference_path.map(Path::to_path_buf),
                metrics_computed: Vec::new(),
                failed_metrics: vec!["all".to_string()],
            },
        }
    }

    /// Whether the image failed wholesale rather than per metric.
    #[must_use]
    pub fn is_total_failure(&self) -> bool {
        self.errors.contains_key(ASSESSMENT_ERROR_KEY)
    }
}

/// Request echo and summary lists attached to every [`Assessment`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentMetadata {
    /// The assessed image.
    pub image_path: PathBuf,

    /// The reference image, `null` when none was supplied.
    pub reference_path: Option<PathBuf>,

    /// Names of metrics that produced a score.
    pub metrics_computed: Vec<String>,

    /// Names of metrics that produced an error.
    pub failed_metrics: Vec<String>,
}

/// One interpretation band in a [`MetricInfo`] response.
///
/// `end` is `None` for unbounded terminal bands (JSON cannot carry
/// infinity).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandInfo {
    /// Inclusive lower bound.
    pub start: f64,
    /// Exclusive upper bound, absent when unbounded.
    pub end: Option<f64>,
    /// Interpretation label.
    pub label: String,
}

/// Response to a metric-interpretation query.
#[derive(Debug, Clone, Serialize)]
pub struct MetricInfo {
    /// Wire name.
    pub name: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Whether a reference image is required.
    pub requires_reference: bool,
    /// `"higher"` or `"lower"` — which direction means better quality.
    pub better_direction: &'static str,
    /// Native value range, if bounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_range: Option<(f64, f64)>,
    /// Interpretation bands in ascending order.
    pub ranges: Vec<BandInfo>,
    /// The queried score, echoed when one was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Band label for the queried score; present only with a score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<&'static str>,
}

/// Look up interpretation metadata for a metric, optionally interpreting
/// a concrete score.
///
/// # Errors
///
/// Returns [`Error::UnknownMetric`](crate::Error::UnknownMetric) for
/// names outside the catalog.
pub fn metric_info(name: &str, score: Option<f64>) -> Result<MetricInfo> {
    let metric = Metric::from_name(name)?;
    let descriptor = metric.descriptor();
    Ok(MetricInfo {
        name: descriptor.name,
        title: descriptor.title,
        description: descriptor.description,
        requires_reference: descriptor.requires_reference,
        better_direction: if descriptor.lower_is_better {
            "lower"
        } else {
            "higher"
        },
        value_range: descriptor.value_range,
        ranges: descriptor
            .bands
            .iter()
            .map(|band| BandInfo {
                start: band.start,
                end: band.end.is_finite().then_some(band.end),
                label: band.label.to_string(),
            })
            .collect(),
        score,
        interpretation: score.map(|s| catalog::interpret(metric, s)),
    })
}

/// Catalog listing: metric names grouped by kind, plus the defaults.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsListing {
    /// Full-reference metric names.
    pub fr_metrics: Vec<&'static str>,
    /// No-reference metric names.
    pub nr_metrics: Vec<&'static str>,
    /// Every catalog metric name.
    pub all_metrics: Vec<&'static str>,
    /// Defaults applied when a request with a reference names no metrics.
    pub default_fr: Vec<&'static str>,
    /// Defaults applied when a request without a reference names no metrics.
    pub default_nr: Vec<&'static str>,
}

/// List every catalog metric with the default selections.
#[must_use]
pub fn list_metrics() -> MetricsListing {
    MetricsListing {
        fr_metrics: Metric::fr_metrics().iter().map(|m| m.name()).collect(),
        nr_metrics: Metric::nr_metrics().iter().map(|m| m.name()).collect(),
        all_metrics: Metric::ALL.iter().map(|m| m.name()).collect(),
        default_fr: Metric::DEFAULT_FR.iter().map(|m| m.name()).collect(),
        default_nr: Metric::DEFAULT_NR.iter().map(|m| m.name()).collect(),
    }
}

/// A set of assessments with a generation timestamp, writable as JSON or
/// CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// When this report was generated.
    pub generated_at: chrono::DateTime<chrono::Utc>,

    /// One entry per assessed image, in request order.
    pub items: Vec<Assessment>,
}

impl AssessmentReport {
    /// Wrap assessments in a timestamped report.
    #[must_use]
    pub fn new(items: Vec<Assessment>) -> Self {
        Self {
            generated_at: chrono::Utc::now(),
            items,
        }
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Write a flat CSV summary: one row per (image, metric) outcome.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(["image", "metric", "score", "interpretation", "error"])?;

        for item in &self.items {
            let image = item.metadata.image_path.display().to_string();
            for (name, score) in &item.scores {
                let interpretation = Metric::from_name(name)
                    .map(|m| catalog::interpret(m, *score))
                    .unwrap_or("");
                let score = format!("{score:.6}");
                wtr.write_record([
                    image.as_str(),
                    name.as_str(),
                    score.as_str(),
                    interpretation,
                    "",
                ])?;
            }
            for (name, message) in &item.errors {
                wtr.write_record([
                    image.as_str(),
                    name.as_str(),
                    "",
                    "",
                    message.as_str(),
                ])?;
            }
        }

        wtr.flush()?;
        Ok(())
    }
}
