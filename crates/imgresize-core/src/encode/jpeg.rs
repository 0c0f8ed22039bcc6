//! JPEG encoding.
//!
//! Uses the `image` crate's baseline JPEG encoder. Quality is clamped to
//! 1-100; the caller resolves the configured default beforehand.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate_pixels, EncodeError};

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate_pixels(pixels, width, height, 3)?;

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: "JPEG",
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
