//! Built-in scoring provider for pixel-domain metrics.
//!
//! [`NativeProvider`] computes the catalog metrics that need no trained
//! model: `psnr`, `mse`, `ssim` and `dssim`. The model-backed metrics
//! (`lpips`, `brisque`, `niqe`, `musiq`) are reported as per-metric
//! computation failures; deployments that need them plug in their own
//! [`ScoreProvider`] implementation.

pub mod dssim;
pub mod psnr;
pub mod ssim;

use std::path::Path;

use crate::catalog::Metric;
use crate::decode;
use crate::error::{Error, Result};
use crate::provider::ScoreProvider;

pub use dssim::{calculate_dssim, rgb8_to_dssim_image};
pub use psnr::{calculate_mse, calculate_psnr};
pub use ssim::calculate_ssim;

/// Decoded RGB8 image.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Pixel data in row-major order, 3 bytes per pixel.
    pub data: Vec<u8>,
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
}

impl ImageData {
    /// Wrap an RGB8 pixel buffer.
    #[must_use]
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), width * height * 3);
        Self {
            data,
            width,
            height,
        }
    }

    /// Image dimensions as (width, height).
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// In-process scoring provider for pixel-domain metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeProvider;

impl NativeProvider {
    /// Create the provider.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn compute_full_reference(
        metric: Metric,
        reference: &ImageData,
        test: &ImageData,
    ) -> Result<f64> {
        if reference.dimensions() != test.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: reference.dimensions(),
                actual: test.dimensions(),
            });
        }

        let (width, height) = test.dimensions();
        match metric {
            Metric::Psnr => Ok(calculate_psnr(&reference.data, &test.data, width, height)),
            Metric::Mse => Ok(calculate_mse(&reference.data, &test.data)),
            Metric::Ssim => Ok(calculate_ssim(&reference.data, &test.data, width, height)),
            Metric::Dssim => calculate_dssim(
                &rgb8_to_dssim_image(&reference.data, width, height),
                &rgb8_to_dssim_image(&test.data, width, height),
            ),
            other => Err(unsupported(other)),
        }
    }
}

fn unsupported(metric: Metric) -> Error {
    Error::Computation {
        metric: metric.name().to_string(),
        reason: "not implemented by the native provider (requires a model-backed ScoreProvider)"
            .to_string(),
    }
}

impl ScoreProvider for NativeProvider {
    fn compute(&self, metric: Metric, image: &Path, reference: Option<&Path>) -> Result<f64> {
        match metric {
            Metric::Psnr | Metric::Mse | Metric::Ssim | Metric::Dssim => {
                let reference_path = reference.ok_or_else(|| Error::MissingReference {
                    metric: metric.name().to_string(),
                })?;
                let test = decode::load_image(image)?;
                let reference = decode::load_image(reference_path)?;
                Self::compute_full_reference(metric, &reference, &test)
            }
            Metric::Lpips | Metric::Brisque | Metric::Niqe | Metric::Musiq => {
                Err(unsupported(metric))
            }
        }
    }

    fn name(&self) -> &'static str {
        "native"
    }
}
