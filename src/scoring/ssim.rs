//! SSIM (Structural Similarity Index) calculation.
//!
//! Global single-window SSIM over the luma plane with the standard
//! stabilizing constants (k1 = 0.01, k2 = 0.03, L = 255). Scores fall in
//! [0, 1] for natural images; 1.0 means structurally identical.

const K1: f64 = 0.01;
const K2: f64 = 0.03;
const DYNAMIC_RANGE: f64 = 255.0;

/// Calculate SSIM between two images.
///
/// # Arguments
///
/// * `reference` - Reference image pixel data (RGB8, row-major).
/// * `test` - Test image pixel data (RGB8, row-major).
/// * `width` - Image width in pixels.
/// * `height` - Image height in pixels.
///
/// # Returns
///
/// SSIM value where 1.0 = structurally identical. Higher is better.
#[must_use]
pub fn calculate_ssim(reference: &[u8], test: &[u8], width: usize, height: usize) -> f64 {
    assert_eq!(reference.len(), test.len());
    assert_eq!(reference.len(), width * height * 3);

    let ref_luma = luma_plane(reference);
    let test_luma = luma_plane(test);
    let n = ref_luma.len() as f64;

    let mean_ref = ref_luma.iter().sum::<f64>() / n;
    let mean_test = test_luma.iter().sum::<f64>() / n;

    let mut var_ref = 0.0;
    let mut var_test = 0.0;
    let mut covariance = 0.0;
    for (r, t) in ref_luma.iter().zip(test_luma.iter()) {
        let dr = r - mean_ref;
        let dt = t - mean_test;
        var_ref += dr * dr;
        var_test += dt * dt;
        covariance += dr * dt;
    }
    var_ref /= n;
    var_test /= n;
    covariance /= n;

    let c1 = (K1 * DYNAMIC_RANGE).powi(2);
    let c2 = (K2 * DYNAMIC_RANGE).powi(2);

    ((2.0 * mean_ref * mean_test + c1) * (2.0 * covariance + c2))
        / ((mean_ref * mean_ref + mean_test * mean_test + c1) * (var_ref + var_test + c2))
}

/// Rec. 601 luma for each RGB8 pixel.
fn luma_plane(rgb: &[u8]) -> Vec<f64> {
    rgb.chunks_exact(3)
        .map(|px| {
            0.299 * f64::from(px[0]) + 0.587 * f64::from(px[1]) + 0.114 * f64::from(px[2])
        })
        .collect()
}
