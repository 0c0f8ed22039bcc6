//! WebP encoding.
//!
//! The `image` crate only ships a lossless WebP encoder, so the quality
//! setting is carried through but does not change the output.

use image::codecs::webp::WebPEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate_pixels, EncodeError};

/// Encode RGBA pixel data to lossless WebP bytes.
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate_pixels(pixels, width, height, 4)?;
    log::trace!("WebP quality {} ignored by lossless encoder", quality);

    let mut buffer = Cursor::new(Vec::new());
    WebPEncoder::new_lossless(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: "WebP",
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}
