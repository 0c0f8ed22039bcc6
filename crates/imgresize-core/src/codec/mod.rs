//! The bitmap codec collaborator.
//!
//! The session never touches pixels itself. Decoding, the orientation
//! primitives, canvas preparation, resampling, gamma correction, encoding
//! and writing all go through [`BitmapCodec`]. [`ImageCodec`] implements
//! it with the `image` crate; tests substitute failing codecs to exercise
//! the error paths.

mod canvas;
mod image_codec;

pub use canvas::{Canvas, ColorMode};
pub use image_codec::ImageCodec;

use std::path::Path;

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{DecodedBitmap, FlipAxis, LoadError, Rotation};
use crate::encode::{EncodeError, OutputFormat};
use crate::geometry::PixelPlan;

/// Failure of a codec primitive, with a message naming the primitive.
#[derive(Debug, Error, PartialEq)]
#[error("{0}")]
pub struct CodecError(pub String);

/// Filter type for resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Catmull-Rom bicubic interpolation.
    CatmullRom,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::CatmullRom => image::imageops::FilterType::CatmullRom,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Primitives the session needs from a bitmap codec.
pub trait BitmapCodec {
    /// Decode image bytes, reporting the EXIF orientation without applying it.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedBitmap, LoadError>;

    /// Rotate counter-clockwise.
    fn rotate(&self, bitmap: DynamicImage, rotation: Rotation) -> Result<DynamicImage, CodecError>;

    fn flip(&self, bitmap: DynamicImage, axis: FlipAxis) -> Result<DynamicImage, CodecError>;

    /// Allocate an output canvas filled with the format's background.
    fn allocate_canvas(
        &self,
        width: u32,
        height: u32,
        format: OutputFormat,
        color_mode: ColorMode,
    ) -> Result<Canvas, CodecError>;

    /// Resample `plan.source` of `source` into the canvas at the planned destination.
    fn resample(
        &self,
        canvas: &mut Canvas,
        source: &DynamicImage,
        plan: &PixelPlan,
        filter: FilterType,
    ) -> Result<(), CodecError>;

    /// Apply `value = 255 * (value / 255) ^ (input / output)` to the colour channels.
    fn apply_gamma(
        &self,
        bitmap: &mut DynamicImage,
        input: f64,
        output: f64,
    ) -> Result<(), CodecError>;

    fn encode(
        &self,
        canvas: &Canvas,
        quality: u8,
        interlace: bool,
    ) -> Result<Vec<u8>, EncodeError>;

    /// Write encoded bytes to `path`, then apply unix `permissions` if given.
    fn write(&self, bytes: &[u8], path: &Path, permissions: Option<u32>) -> std::io::Result<()>;
}
