//! Image encoding for imgresize.
//!
//! This module provides functionality for:
//! - Encoding to JPEG with configurable quality
//! - Encoding to PNG with a 0-9 compression level
//! - Encoding to lossless WebP
//! - Encoding to GIF
//!
//! All encoders take raw pixel buffers in row-major order and return the
//! encoded bytes. [`encode_image`] picks the encoder for an [`OutputFormat`].
//!
//! # Examples
//!
//! ```ignore
//! use imgresize_core::encode::encode_jpeg;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 90).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod gif;
mod jpeg;
mod png;
mod webp;

pub use gif::encode_gif;
pub use jpeg::encode_jpeg;
pub use png::{encode_png, PngLayout};
pub use webp::encode_webp;

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::SourceFormat;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The requested output format cannot be written
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// The encoder reported a failure
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: &'static str,
        message: String,
    },
}

/// Formats that can be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Gif,
    Jpeg,
    Png,
    WebP,
}

impl OutputFormat {
    /// Output format matching an input format. BMP cannot be written.
    pub fn from_source(format: SourceFormat) -> Result<Self, EncodeError> {
        match format {
            SourceFormat::Gif => Ok(OutputFormat::Gif),
            SourceFormat::Jpeg => Ok(OutputFormat::Jpeg),
            SourceFormat::Png => Ok(OutputFormat::Png),
            SourceFormat::WebP => Ok(OutputFormat::WebP),
            SourceFormat::Bmp => Err(EncodeError::UnsupportedFormat("bmp".to_string())),
        }
    }

    /// Parse a format name or file extension, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "gif" => Some(OutputFormat::Gif),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "png" => Some(OutputFormat::Png),
            "webp" => Some(OutputFormat::WebP),
            _ => None,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Gif => "image/gif",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::WebP => "image/webp",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Gif => "gif",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
        }
    }

    /// Whether resampled pixels are alpha-blended onto the canvas background.
    ///
    /// PNG and WebP canvases keep the source alpha instead.
    pub fn blends_alpha(self) -> bool {
        matches!(self, OutputFormat::Gif | OutputFormat::Jpeg)
    }
}

/// Encode a canvas image in `format`.
///
/// `quality` is the already resolved format-specific value: 0-100 for
/// JPEG and WebP, a 0-9 compression level for PNG, ignored for GIF.
/// `interlace` is accepted for every format, but the encoders always
/// write non-interlaced output.
pub fn encode_image(
    image: &DynamicImage,
    format: OutputFormat,
    quality: u8,
    interlace: bool,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width(), image.height());
    log::debug!(
        "Encoding {}x{} {:?} (quality {}, interlace {})",
        width,
        height,
        format,
        quality,
        interlace
    );

    match format {
        OutputFormat::Jpeg => encode_jpeg(image.to_rgb8().as_raw(), width, height, quality),
        OutputFormat::Png => match image {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageLumaA8(_) => encode_png(
                image.to_luma_alpha8().as_raw(),
                width,
                height,
                PngLayout::LumaAlpha8,
                quality,
            ),
            _ => encode_png(image.to_rgba8().as_raw(), width, height, PngLayout::Rgba8, quality),
        },
        OutputFormat::WebP => encode_webp(image.to_rgba8().as_raw(), width, height, quality),
        OutputFormat::Gif => encode_gif(image.to_rgba8().as_raw(), width, height),
    }
}

/// Check dimensions and buffer length for `bytes_per_pixel`-sized pixels.
pub(crate) fn validate_pixels(
    pixels: &[u8],
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * bytes_per_pixel;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, LumaA, Rgba, RgbaImage};

    #[test]
    fn test_output_format_from_source() {
        assert_eq!(
            OutputFormat::from_source(SourceFormat::Jpeg).unwrap(),
            OutputFormat::Jpeg
        );
        assert_eq!(
            OutputFormat::from_source(SourceFormat::WebP).unwrap(),
            OutputFormat::WebP
        );
        assert!(matches!(
            OutputFormat::from_source(SourceFormat::Bmp),
            Err(EncodeError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("JPG"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::parse(".png"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::parse("webp"), Some(OutputFormat::WebP));
        assert_eq!(OutputFormat::parse("gif"), Some(OutputFormat::Gif));
        assert_eq!(OutputFormat::parse("bmp"), None);
    }

    #[test]
    fn test_mime_and_extension() {
        assert_eq!(OutputFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(OutputFormat::WebP.mime_type(), "image/webp");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::Png.extension(), "png");
    }

    #[test]
    fn test_encode_image_every_format() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 6, Rgba([10, 200, 30, 255])));

        for format in [
            OutputFormat::Jpeg,
            OutputFormat::Png,
            OutputFormat::WebP,
            OutputFormat::Gif,
        ] {
            let bytes = encode_image(&img, format, 6, true).unwrap();
            let decoded = image::load_from_memory(&bytes).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (8, 6), "{format:?}");
        }
    }

    #[test]
    fn test_interlace_flag_does_not_change_output() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 6, Rgba([10, 200, 30, 255])));
        for format in [OutputFormat::Png, OutputFormat::Jpeg] {
            let interlaced = encode_image(&img, format, 6, true).unwrap();
            let plain = encode_image(&img, format, 6, false).unwrap();
            assert_eq!(interlaced, plain, "{format:?}");
        }
    }

    #[test]
    fn test_encode_grayscale_png_stays_grayscale() {
        let img = DynamicImage::ImageLumaA8(GrayAlphaImage::from_pixel(4, 4, LumaA([90, 255])));
        let bytes = encode_image(&img, OutputFormat::Png, 6, false).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert!(matches!(decoded, DynamicImage::ImageLumaA8(_)));
    }

    #[test]
    fn test_validate_pixels() {
        assert!(validate_pixels(&[0; 12], 2, 2, 3).is_ok());
        assert!(matches!(
            validate_pixels(&[0; 11], 2, 2, 3),
            Err(EncodeError::InvalidPixelData {
                expected: 12,
                actual: 11
            })
        ));
        assert!(matches!(
            validate_pixels(&[], 0, 2, 3),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }
}
