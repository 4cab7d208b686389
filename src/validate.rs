//! Request validation.
//!
//! Validation failures are request-level [`Error::InvalidInput`] errors:
//! they abort the whole request before any metric computation begins,
//! unlike per-metric errors which are reported as response data.

use std::path::Path;

use crate::error::{Error, Result};

/// File extensions accepted as image inputs (lowercase, without dot).
pub const SUPPORTED_FORMATS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "tiff", "webp"];

/// Largest accepted batch.
pub const MAX_BATCH_SIZE: usize = 100;

/// Check that `path` names an existing file with a supported image
/// extension.
///
/// Whether the file actually decodes is the scoring provider's concern;
/// a corrupt file surfaces later as a per-image failure, not here.
pub fn validate_image_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::InvalidInput(format!(
            "Image file not found: {}",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(Error::InvalidInput(format!(
            "Not a regular file: {}",
            path.display()
        )));
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if SUPPORTED_FORMATS.contains(&ext.to_ascii_lowercase().as_str()) => Ok(()),
        Some(ext) => Err(Error::InvalidInput(format!(
            "Unsupported image format: .{ext}"
        ))),
        None => Err(Error::InvalidInput(format!(
            "Missing image file extension: {}",
            path.display()
        ))),
    }
}

/// Check an explicitly supplied metric list.
///
/// Only emptiness is rejected here; unknown names are classified later
/// and reported per metric, never as a request-level failure.
pub fn validate_metric_names<S: AsRef<str>>(names: &[S]) -> Result<()> {
    if names.is_empty() {
        return Err(Error::InvalidInput("No metrics specified".to_string()));
    }
    Ok(())
}

/// Check the shape of a batch request.
///
/// When reference paths are present there must be exactly one per image;
/// a mismatch is rejected rather than silently zipped short.
pub fn validate_batch_shape(image_count: usize, reference_count: Option<usize>) -> Result<()> {
    if image_count == 0 {
        return Err(Error::InvalidInput("No images specified".to_string()));
    }
    if image_count > MAX_BATCH_SIZE {
        return Err(Error::InvalidInput(format!(
            "Batch size {image_count} exceeds maximum of {MAX_BATCH_SIZE}"
        )));
    }
    if let Some(reference_count) = reference_count {
        if reference_count != image_count {
            return Err(Error::InvalidInput(format!(
                "Number of reference images ({reference_count}) must match number of test images ({image_count})"
            )));
        }
    }
    Ok(())
}
