//! DSSIM (Structural Dissimilarity) metric calculation.
//!
//! Wraps the `dssim-core` crate for perceptual image comparison.

use dssim_core::Dssim;
use imgref::ImgVec;
use rgb::RGBA;

use crate::error::{Error, Result};

/// Calculate DSSIM between two images.
///
/// # Arguments
///
/// * `reference` - Reference image as RGBA f32 values (0.0-1.0).
/// * `test` - Test image as RGBA f32 values (0.0-1.0).
///
/// # Returns
///
/// DSSIM value where 0 = identical, higher = more different.
///
/// # Errors
///
/// Returns an error if the images have different dimensions or if DSSIM
/// calculation fails.
pub fn calculate_dssim(reference: &ImgVec<RGBA<f32>>, test: &ImgVec<RGBA<f32>>) -> Result<f64> {
    if reference.width() != test.width() || reference.height() != test.height() {
        return Err(Error::DimensionMismatch {
            expected: (reference.width(), reference.height()),
            actual: (test.width(), test.height()),
        });
    }

    let dssim = Dssim::new();

    let ref_image = dssim
        .create_image(reference)
        .ok_or_else(|| Error::Computation {
            metric: "dssim".to_string(),
            reason: "Failed to create reference image".to_string(),
        })?;

    let test_image = dssim
        .create_image(test)
        .ok_or_else(|| Error::Computation {
            metric: "dssim".to_string(),
            reason: "Failed to create test image".to_string(),
        })?;

    let (dssim_val, _ssim_maps) = dssim.compare(&ref_image, test_image);

    Ok(f64::from(dssim_val))
}

/// Convert RGB8 image data to the format needed for DSSIM calculation.
#[must_use]
pub fn rgb8_to_dssim_image(data: &[u8], width: usize, height: usize) -> ImgVec<RGBA<f32>> {
    let pixels: Vec<RGBA<f32>> = data
        .chunks_exact(3)
        .map(|rgb| RGBA {
            r: f32::from(rgb[0]) / 255.0,
            g: f32::from(rgb[1]) / 255.0,
            b: f32::from(rgb[2]) / 255.0,
            a: 1.0,
        })
        .collect();

    ImgVec::new(pixels, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_image(level: f32, width: usize, height: usize) -> ImgVec<RGBA<f32>> {
        let pixels: Vec<RGBA<f32>> = (0..width * height)
            .map(|_| RGBA {
                r: level,
                g: level,
                b: level,
                a: 1.0,
            })
            .collect();
        ImgVec::new(pixels, width, height)
    }

    #[test]
    fn test_identical_images() {
        let img = flat_image(0.5, 100, 100);
        let dssim = calculate_dssim(&img, &img).unwrap();
        assert!(dssim < 0.0001, "Identical images should have near-zero DSSIM");
    }

    #[test]
    fn test_different_images() {
        let reference = flat_image(0.3, 100, 100);
        let test = flat_image(0.7, 100, 100);
        let dssim = calculate_dssim(&reference, &test).unwrap();
        assert!(dssim > 0.0, "Different images should have non-zero DSSIM");
    }

    #[test]
    fn test_dimension_mismatch() {
        let small = flat_image(0.5, 50, 50);
        let large = flat_image(0.5, 100, 100);
        let result = calculate_dssim(&small, &large);
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_rgb8_conversion() {
        let rgb_data = vec![255u8, 0, 0, 0, 255, 0]; // Red, Green pixels
        let img = rgb8_to_dssim_image(&rgb_data, 2, 1);

        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 1);
        let pixels: Vec<_> = img.pixels().collect();
        assert!((pixels[0].r - 1.0).abs() < 0.001);
        assert!((pixels[1].g - 1.0).abs() < 0.001);
    }
}
