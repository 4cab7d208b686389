//! Image file decoding for the native scoring provider.
//!
//! Only JPEG decoding is built in (behind the `jpeg-decode` feature);
//! other formats pass request validation but fail at load time with a
//! per-image error. Deployments needing broader format support supply
//! their own [`ScoreProvider`](crate::provider::ScoreProvider).

use std::path::Path;

use crate::error::{Error, Result};
use crate::scoring::ImageData;

/// Load and decode an image file into RGB8 pixels.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] for extensions without a built-in
/// decoder and [`Error::ImageLoad`] when reading or decoding fails.
pub fn load_image(path: &Path) -> Result<ImageData> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => decode_jpeg_file(path),
        other => Err(Error::UnsupportedFormat(format!(
            "no built-in decoder for .{other} files"
        ))),
    }
}

#[cfg(feature = "jpeg-decode")]
fn decode_jpeg_file(path: &Path) -> Result<ImageData> {
    let data = std::fs::read(path).map_err(|e| Error::ImageLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    decode_jpeg(&data).map_err(|reason| Error::ImageLoad {
        path: path.to_path_buf(),
        reason,
    })
}

#[cfg(not(feature = "jpeg-decode"))]
fn decode_jpeg_file(_path: &Path) -> Result<ImageData> {
    Err(Error::UnsupportedFormat(
        "JPEG support disabled (jpeg-decode feature is off)".to_string(),
    ))
}

/// Decode JPEG data to RGB8 pixels.
///
/// Grayscale images are expanded to RGB; CMYK JPEGs are rejected.
#[cfg(feature = "jpeg-decode")]
fn decode_jpeg(data: &[u8]) -> std::result::Result<ImageData, String> {
    use std::io::Cursor;

    let mut decoder = jpeg_decoder::Decoder::new(Cursor::new(data));
    let pixels = decoder.decode().map_err(|e| e.to_string())?;

    let info = decoder
        .info()
        .ok_or_else(|| "Missing JPEG info after decode".to_string())?;

    let width = info.width as usize;
    let height = info.height as usize;

    let rgb = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => pixels,
        jpeg_decoder::PixelFormat::L8 => {
            // Grayscale to RGB
            pixels.iter().flat_map(|&g| [g, g, g]).collect()
        }
        jpeg_decoder::PixelFormat::L16 => {
            // 16-bit grayscale - take high byte and convert to RGB
            pixels
                .chunks_exact(2)
                .flat_map(|c| {
                    let g = c[0];
                    [g, g, g]
                })
                .collect()
        }
        jpeg_decoder::PixelFormat::CMYK32 => {
            return Err("CMYK JPEGs are not currently supported".to_string());
        }
    };

    Ok(ImageData::new(rgb, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension() {
        let err = load_image(Path::new("image.webp")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_extension() {
        assert!(load_image(Path::new("image")).is_err());
    }

    #[cfg(feature = "jpeg-decode")]
    #[test]
    fn test_unreadable_jpeg_is_image_load_error() {
        let err = load_image(Path::new("/nonexistent/image.jpg")).unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
    }

    #[cfg(feature = "jpeg-decode")]
    #[test]
    fn test_corrupt_jpeg_is_image_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
    }
}
