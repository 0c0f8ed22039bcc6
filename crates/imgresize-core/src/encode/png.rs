//! PNG encoding.

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate_pixels, EncodeError};

/// Pixel layout of a PNG input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngLayout {
    /// 4 bytes per pixel.
    Rgba8,
    /// 2 bytes per pixel, for canvases built from non-truecolor sources.
    LumaAlpha8,
}

impl PngLayout {
    fn bytes_per_pixel(self) -> usize {
        match self {
            PngLayout::Rgba8 => 4,
            PngLayout::LumaAlpha8 => 2,
        }
    }

    fn color_type(self) -> ExtendedColorType {
        match self {
            PngLayout::Rgba8 => ExtendedColorType::Rgba8,
            PngLayout::LumaAlpha8 => ExtendedColorType::La8,
        }
    }
}

/// Map a zlib-style 0-9 level onto the encoder's compression presets.
fn compression_for_level(level: u8) -> CompressionType {
    match level {
        0..=3 => CompressionType::Fast,
        4..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

/// Encode pixel data to PNG bytes.
///
/// `level` is a 0-9 compression level; values above 9 compress like 9.
pub fn encode_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PngLayout,
    level: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate_pixels(pixels, width, height, layout.bytes_per_pixel())?;

    let mut buffer = Cursor::new(Vec::new());
    let encoder = PngEncoder::new_with_quality(
        &mut buffer,
        compression_for_level(level),
        FilterType::Adaptive,
    );

    encoder
        .write_image(pixels, width, height, layout.color_type())
        .map_err(|e| EncodeError::EncodingFailed {
            format: "PNG",
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}
