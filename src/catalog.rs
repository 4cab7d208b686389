//! Metric catalog: classification and score-interpretation metadata.
//!
//! The catalog is a fixed, enumerable set of known metric identifiers,
//! resolved at compile time. Each metric carries a [`MetricDescriptor`]
//! describing whether it needs a reference image, which direction is
//! better, and how to interpret raw scores.
//!
//! Full-reference (FR) metrics compare a test image against a reference;
//! no-reference (NR) metrics score the test image alone.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Label returned by [`interpret`] when a score falls outside every band.
///
/// Out-of-band scores are a valid (if unusual) outcome of a metric
/// computation, so this is a fallback label rather than an error.
pub const OUT_OF_RANGE_LABEL: &str = "Score out of expected range";

/// Known quality metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Peak Signal-to-Noise Ratio (FR, higher is better).
    Psnr,
    /// Structural Similarity Index (FR, higher is better).
    Ssim,
    /// Mean Squared Error (FR, lower is better).
    Mse,
    /// Learned Perceptual Image Patch Similarity (FR, lower is better).
    Lpips,
    /// Structural dissimilarity (FR, lower is better, 0 = identical).
    Dssim,
    /// Blind/Referenceless Image Spatial Quality Evaluator (NR, lower is better).
    Brisque,
    /// Natural Image Quality Evaluator (NR, lower is better).
    Niqe,
    /// Multi-scale Image Quality Transformer (NR, higher is better).
    Musiq,
}

impl Metric {
    /// Every metric in the catalog.
    pub const ALL: [Self; 8] = [
        Self::Psnr,
        Self::Ssim,
        Self::Mse,
        Self::Lpips,
        Self::Dssim,
        Self::Brisque,
        Self::Niqe,
        Self::Musiq,
    ];

    /// Default full-reference metrics used when a request names none
    /// and supplies a reference image.
    pub const DEFAULT_FR: [Self; 3] = [Self::Psnr, Self::Ssim, Self::Lpips];

    /// Default no-reference metrics used when a request names none
    /// and supplies no reference image.
    pub const DEFAULT_NR: [Self; 2] = [Self::Niqe, Self::Brisque];

    /// The wire name of this metric.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Resolve a metric by its wire name (exact, lowercase).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMetric`] if the name is not in the catalog.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == name)
            .ok_or_else(|| Error::UnknownMetric {
                name: name.to_string(),
            })
    }

    /// Whether this metric needs a reference image.
    #[must_use]
    pub fn requires_reference(self) -> bool {
        self.descriptor().requires_reference
    }

    /// Static descriptor for this metric.
    #[must_use]
    pub fn descriptor(self) -> &'static MetricDescriptor {
        match self {
            Self::Psnr => &PSNR,
            Self::Ssim => &SSIM,
            Self::Mse => &MSE,
            Self::Lpips => &LPIPS,
            Self::Dssim => &DSSIM,
            Self::Brisque => &BRISQUE,
            Self::Niqe => &NIQE,
            Self::Musiq => &MUSIQ,
        }
    }

    /// All full-reference metrics.
    #[must_use]
    pub fn fr_metrics() -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|m| m.requires_reference())
            .collect()
    }

    /// All no-reference metrics.
    #[must_use]
    pub fn nr_metrics() -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|m| !m.requires_reference())
            .collect()
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A half-open score interval `[start, end)` with its interpretation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBand {
    /// Inclusive lower bound.
    pub start: f64,
    /// Exclusive upper bound.
    pub end: f64,
    /// Human-readable interpretation for scores in this band.
    pub label: &'static str,
}

impl ScoreBand {
    const fn new(start: f64, end: f64, label: &'static str) -> Self {
        Self { start, end, label }
    }

    /// Whether `score` falls in `[start, end)`.
    #[must_use]
    pub fn contains(&self, score: f64) -> bool {
        score >= self.start && score < self.end
    }
}

/// Immutable metadata describing one catalog metric.
#[derive(Debug, Clone)]
pub struct MetricDescriptor {
    /// Wire name (lowercase, as used in requests and cache keys).
    pub name: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Whether a reference image is required.
    pub requires_reference: bool,
    /// Whether lower scores indicate better quality.
    pub lower_is_better: bool,
    /// Native value range, if bounded.
    pub value_range: Option<(f64, f64)>,
    /// Interpretation bands in ascending order of `start`.
    pub bands: &'static [ScoreBand],
}

static PSNR: MetricDescriptor = MetricDescriptor {
    name: "psnr",
    title: "PSNR",
    description: "Peak Signal-to-Noise Ratio measures image fidelity",
    requires_reference: true,
    lower_is_better: false,
    value_range: None,
    bands: &[
        ScoreBand::new(0.0, 10.0, "Very poor quality (severe degradation)"),
        ScoreBand::new(10.0, 20.0, "Poor quality (significant degradation)"),
        ScoreBand::new(20.0, 30.0, "Fair quality (noticeable degradation)"),
        ScoreBand::new(30.0, 40.0, "Good quality (minor imperfections)"),
        ScoreBand::new(40.0, f64::INFINITY, "Excellent quality (near perfect)"),
    ],
};

static SSIM: MetricDescriptor = MetricDescriptor {
    name: "ssim",
    title: "SSIM",
    description: "Structural Similarity Index measures structural similarity",
    requires_reference: true,
    lower_is_better: false,
    value_range: Some((0.0, 1.0)),
    bands: &[
        ScoreBand::new(0.0, 0.70, "Very poor structural similarity"),
        ScoreBand::new(0.70, 0.80, "Poor structural similarity"),
        ScoreBand::new(0.80, 0.88, "Fair structural similarity"),
        ScoreBand::new(0.88, 0.95, "Good structural similarity"),
        ScoreBand::new(0.95, f64::INFINITY, "Excellent structural similarity"),
    ],
};

static MSE: MetricDescriptor = MetricDescriptor {
    name: "mse",
    title: "MSE",
    description: "Mean Squared Error between test and reference pixels",
    requires_reference: true,
    lower_is_better: true,
    value_range: None,
    // No established interpretation table; scores always report the
    // out-of-range fallback label.
    bands: &[],
};

static LPIPS: MetricDescriptor = MetricDescriptor {
    name: "lpips",
    title: "LPIPS",
    description: "Learned Perceptual Image Patch Similarity",
    requires_reference: true,
    lower_is_better: true,
    value_range: Some((0.0, 1.0)),
    bands: &[
        ScoreBand::new(0.0, 0.2, "Very similar images (minimal perceptual difference)"),
        ScoreBand::new(0.2, 0.4, "Similar images (minor perceptual differences)"),
        ScoreBand::new(0.4, 0.6, "Moderate perceptual differences"),
        ScoreBand::new(0.6, 0.8, "Significant perceptual differences"),
        ScoreBand::new(0.8, f64::INFINITY, "Very different images (major perceptual differences)"),
    ],
};

static DSSIM: MetricDescriptor = MetricDescriptor {
    name: "dssim",
    title: "DSSIM",
    description: "Structural dissimilarity (0 = identical images)",
    requires_reference: true,
    lower_is_better: true,
    value_range: None,
    bands: &[
        ScoreBand::new(0.0, 0.0003, "Imperceptible difference (visually identical)"),
        ScoreBand::new(0.0003, 0.0007, "Marginal difference (only A/B comparison reveals)"),
        ScoreBand::new(0.0007, 0.0015, "Subtle difference (barely noticeable)"),
        ScoreBand::new(0.0015, 0.003, "Noticeable difference (visible on inspection)"),
        ScoreBand::new(0.003, f64::INFINITY, "Degraded (clearly visible artifacts)"),
    ],
};

static BRISQUE: MetricDescriptor = MetricDescriptor {
    name: "brisque",
    title: "BRISQUE",
    description: "Blind/Referenceless Image Spatial Quality Evaluator",
    requires_reference: false,
    lower_is_better: true,
    value_range: Some((0.0, 100.0)),
    bands: &[
        ScoreBand::new(0.0, 20.0, "Excellent quality (highly natural images)"),
        ScoreBand::new(20.0, 40.0, "Good quality (natural images)"),
        ScoreBand::new(40.0, 60.0, "Fair quality (mildly distorted images)"),
        ScoreBand::new(60.0, 80.0, "Poor quality (distorted images)"),
        ScoreBand::new(80.0, 100.0, "Very poor quality (heavily distorted images)"),
    ],
};

static NIQE: MetricDescriptor = MetricDescriptor {
    name: "niqe",
    title: "NIQE",
    description: "Natural Image Quality Evaluator",
    requires_reference: false,
    lower_is_better: true,
    value_range: None,
    bands: &[
        ScoreBand::new(0.0, 2.0, "Excellent quality (highly natural)"),
        ScoreBand::new(2.0, 4.0, "Good quality (natural)"),
        ScoreBand::new(4.0, 6.0, "Fair quality (mildly unnatural)"),
        ScoreBand::new(6.0, 8.0, "Poor quality (unnatural)"),
        ScoreBand::new(8.0, f64::INFINITY, "Very poor quality (highly unnatural)"),
    ],
};

static MUSIQ: MetricDescriptor = MetricDescriptor {
    name: "musiq",
    title: "MUSIQ",
    description: "Multi-scale Image Quality Transformer",
    requires_reference: false,
    lower_is_better: false,
    value_range: Some((0.0, 10.0)),
    bands: &[
        ScoreBand::new(0.0, 2.0, "Very poor quality (worst predicted MOS)"),
        ScoreBand::new(2.0, 4.0, "Poor quality"),
        ScoreBand::new(4.0, 6.0, "Fair quality"),
        ScoreBand::new(6.0, 8.0, "Good quality"),
        ScoreBand::new(8.0, f64::INFINITY, "Excellent quality (best predicted MOS)"),
    ],
};

/// Result of partitioning requested metric names.
///
/// Unknown names are reported separately so the caller can record a
/// per-metric error for each; they are never silently dropped.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Metrics computable from the test image alone.
    pub reference_free: Vec<Metric>,
    /// Metrics that need a reference image.
    pub reference_required: Vec<Metric>,
    /// Requested names absent from the catalog, in request order.
    pub unknown: Vec<String>,
}

/// Partition requested metric names into NR / FR / unknown sets.
///
/// Request order is preserved within each set; duplicates are kept so the
/// caller sees exactly what was asked for.
pub fn classify<S: AsRef<str>>(names: &[S]) -> Classification {
    let mut out = Classification::default();
    for name in names {
        match Metric::from_name(name.as_ref()) {
            Ok(metric) if metric.requires_reference() => out.reference_required.push(metric),
            Ok(metric) => out.reference_free.push(metric),
            Err(_) => out.unknown.push(name.as_ref().to_string()),
        }
    }
    out
}

/// Default metric set when a request names no metrics.
///
/// With a reference image the full-reference defaults apply, otherwise
/// the no-reference defaults.
#[must_use]
pub fn default_metrics(has_reference: bool) -> Vec<Metric> {
    if has_reference {
        Metric::DEFAULT_FR.to_vec()
    } else {
        Metric::DEFAULT_NR.to_vec()
    }
}

/// Interpret a raw score against a metric's bands.
///
/// Bands are walked in ascending order and the first whose `[start, end)`
/// interval contains the score wins. Scores outside every band get
/// [`OUT_OF_RANGE_LABEL`].
#[must_use]
pub fn interpret(metric: Metric, score: f64) -> &'static str {
    metric
        .descriptor()
        .bands
        .iter()
        .find(|band| band.contains(score))
        .map_or(OUT_OF_RANGE_LABEL, |band| band.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_known() {
        assert_eq!(Metric::from_name("psnr").unwrap(), Metric::Psnr);
        assert_eq!(Metric::from_name("brisque").unwrap(), Metric::Brisque);
    }

    #[test]
    fn test_from_name_is_exact() {
        let err = Metric::from_name("vmaf").unwrap_err();
        assert!(matches!(err, Error::UnknownMetric { name } if name == "vmaf"));
        // Wire names are lowercase; no case folding.
        assert!(Metric::from_name("BRISQUE").is_err());
    }

    #[test]
    fn test_classify_partitions() {
        let names = ["psnr", "niqe", "ssim", "brisque", "bogus"];
        let c = classify(&names);
        assert_eq!(c.reference_required, vec![Metric::Psnr, Metric::Ssim]);
        assert_eq!(c.reference_free, vec![Metric::Niqe, Metric::Brisque]);
        assert_eq!(c.unknown, vec!["bogus".to_string()]);
    }

    #[test]
    fn test_classify_never_drops_unknown() {
        let names = ["nope", "also_nope"];
        let c = classify(&names);
        assert!(c.reference_free.is_empty());
        assert!(c.reference_required.is_empty());
        assert_eq!(c.unknown.len(), 2);
    }

    #[test]
    fn test_default_metrics() {
        assert_eq!(default_metrics(true), vec![Metric::Psnr, Metric::Ssim, Metric::Lpips]);
        assert_eq!(default_metrics(false), vec![Metric::Niqe, Metric::Brisque]);
    }

    #[test]
    fn test_interpret_psnr_bands() {
        assert_eq!(interpret(Metric::Psnr, 35.0), "Good quality (minor imperfections)");
        assert_eq!(interpret(Metric::Psnr, 45.0), "Excellent quality (near perfect)");
        assert_eq!(interpret(Metric::Psnr, 5.0), "Very poor quality (severe degradation)");
    }

    #[test]
    fn test_interpret_band_boundaries_are_half_open() {
        // 40.0 belongs to [40, inf), not [30, 40)
        assert_eq!(interpret(Metric::Psnr, 40.0), "Excellent quality (near perfect)");
        assert_eq!(interpret(Metric::Psnr, 39.999), "Good quality (minor imperfections)");
    }

    #[test]
    fn test_interpret_ssim_perfect_score() {
        // SSIM of exactly 1.0 (identical images) must not fall through
        // to the sentinel.
        assert_eq!(interpret(Metric::Ssim, 1.0), "Excellent structural similarity");
    }

    #[test]
    fn test_interpret_out_of_range_sentinel() {
        assert_eq!(interpret(Metric::Brisque, 150.0), OUT_OF_RANGE_LABEL);
        assert_eq!(interpret(Metric::Ssim, -0.5), OUT_OF_RANGE_LABEL);
    }

    #[test]
    fn test_interpret_bandless_metric() {
        assert_eq!(interpret(Metric::Mse, 12.0), OUT_OF_RANGE_LABEL);
    }

    #[test]
    fn test_bands_ascending() {
        for metric in Metric::ALL {
            let bands = metric.descriptor().bands;
            for pair in bands.windows(2) {
                assert!(
                    pair[0].start <= pair[1].start,
                    "{} bands out of order",
                    metric
                );
            }
        }
    }

    #[test]
    fn test_fr_nr_split() {
        assert!(Metric::Psnr.requires_reference());
        assert!(Metric::Dssim.requires_reference());
        assert!(!Metric::Niqe.requires_reference());
        assert_eq!(Metric::fr_metrics().len() + Metric::nr_metrics().len(), Metric::ALL.len());
    }

    #[test]
    fn test_serde_wire_names() {
        let json = serde_json::to_string(&Metric::Psnr).unwrap();
        assert_eq!(json, "\"psnr\"");
        let back: Metric = serde_json::from_str("\"brisque\"").unwrap();
        assert_eq!(back, Metric::Brisque);
    }
}
