//! [`BitmapCodec`] backed by the `image` crate.

use std::fs;
use std::path::Path;

use image::{imageops, DynamicImage, GenericImageView};

use super::{BitmapCodec, Canvas, CodecError, ColorMode, FilterType};
use crate::decode::{decode_bitmap, DecodedBitmap, FlipAxis, LoadError, Rotation};
use crate::encode::{encode_image, EncodeError, OutputFormat};
use crate::geometry::PixelPlan;

/// Codec implementation using the `image` crate for every primitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl ImageCodec {
    pub fn new() -> Self {
        Self
    }
}

/// Lookup table for `255 * (v / 255) ^ (input / output)`.
fn gamma_lut(input: f64, output: f64) -> [u8; 256] {
    let exponent = input / output;
    let mut lut = [0u8; 256];
    for (i, slot) in lut.iter_mut().enumerate() {
        let value = (i as f64 / 255.0).powf(exponent) * 255.0;
        *slot = value.round().clamp(0.0, 255.0) as u8;
    }
    lut
}

impl BitmapCodec for ImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedBitmap, LoadError> {
        decode_bitmap(bytes)
    }

    fn rotate(&self, bitmap: DynamicImage, rotation: Rotation) -> Result<DynamicImage, CodecError> {
        // The image crate rotates clockwise.
        Ok(match rotation {
            Rotation::None => bitmap,
            Rotation::Ccw90 => bitmap.rotate270(),
            Rotation::Ccw180 => bitmap.rotate180(),
            Rotation::Ccw270 => bitmap.rotate90(),
        })
    }

    fn flip(&self, bitmap: DynamicImage, axis: FlipAxis) -> Result<DynamicImage, CodecError> {
        Ok(match axis {
            FlipAxis::Horizontal => bitmap.fliph(),
            FlipAxis::Vertical => bitmap.flipv(),
        })
    }

    fn allocate_canvas(
        &self,
        width: u32,
        height: u32,
        format: OutputFormat,
        color_mode: ColorMode,
    ) -> Result<Canvas, CodecError> {
        if width == 0 || height == 0 {
            return Err(CodecError(format!(
                "Error creating {} canvas: {}x{} is empty",
                format.mime_type(),
                width,
                height
            )));
        }

        let bytes_per_pixel = match color_mode {
            ColorMode::TrueColor => 4usize,
            ColorMode::Grayscale => 2usize,
        };
        let size = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(bytes_per_pixel))
            .filter(|&bytes| bytes <= isize::MAX as usize);
        if size.is_none() {
            return Err(CodecError(format!(
                "Error creating {} canvas: {}x{} is too large",
                format.mime_type(),
                width,
                height
            )));
        }

        Ok(Canvas::new(width, height, format, color_mode))
    }

    fn resample(
        &self,
        canvas: &mut Canvas,
        source: &DynamicImage,
        plan: &PixelPlan,
        filter: FilterType,
    ) -> Result<(), CodecError> {
        let src = plan.source;
        let (source_width, source_height) = source.dimensions();
        if src.width == 0
            || src.height == 0
            || src.x as u64 + src.width as u64 > source_width as u64
            || src.y as u64 + src.height as u64 > source_height as u64
        {
            return Err(CodecError(format!(
                "Resample image failed: source ({}, {}) {}x{} outside {}x{} bitmap",
                src.x, src.y, src.width, src.height, source_width, source_height
            )));
        }

        let region = source.crop_imm(src.x, src.y, src.width, src.height);
        let resized = if (src.width, src.height) == (plan.dest_width, plan.dest_height) {
            region
        } else {
            region.resize_exact(plan.dest_width, plan.dest_height, filter.to_image_filter())
        };

        if canvas.format.blends_alpha() {
            imageops::overlay(&mut canvas.image, &resized, plan.dest_x, plan.dest_y);
        } else {
            imageops::replace(&mut canvas.image, &resized, plan.dest_x, plan.dest_y);
        }
        Ok(())
    }

    fn apply_gamma(
        &self,
        bitmap: &mut DynamicImage,
        input: f64,
        output: f64,
    ) -> Result<(), CodecError> {
        if !(input.is_finite() && output.is_finite()) || input <= 0.0 || output <= 0.0 {
            return Err(CodecError(format!(
                "Gamma correction {} -> {} failed: gamma values must be positive",
                input, output
            )));
        }

        let lut = gamma_lut(input, output);
        match bitmap {
            DynamicImage::ImageLuma8(img) => {
                for p in img.pixels_mut() {
                    p.0[0] = lut[p.0[0] as usize];
                }
            }
            DynamicImage::ImageLumaA8(img) => {
                for p in img.pixels_mut() {
                    p.0[0] = lut[p.0[0] as usize];
                }
            }
            DynamicImage::ImageRgb8(img) => {
                for p in img.pixels_mut() {
                    for c in p.0.iter_mut() {
                        *c = lut[*c as usize];
                    }
                }
            }
            DynamicImage::ImageRgba8(img) => {
                for p in img.pixels_mut() {
                    for c in p.0[..3].iter_mut() {
                        *c = lut[*c as usize];
                    }
                }
            }
            other => {
                let mut rgba = other.to_rgba8();
                for p in rgba.pixels_mut() {
                    for c in p.0[..3].iter_mut() {
                        *c = lut[*c as usize];
                    }
                }
                *other = DynamicImage::ImageRgba8(rgba);
            }
        }
        Ok(())
    }

    fn encode(
        &self,
        canvas: &Canvas,
        quality: u8,
        interlace: bool,
    ) -> Result<Vec<u8>, EncodeError> {
        encode_image(&canvas.image, canvas.format, quality, interlace)
    }

    fn write(&self, bytes: &[u8], path: &Path, permissions: Option<u32>) -> std::io::Result<()> {
        fs::write(path, bytes)?;

        if let Some(mode) = permissions {
            set_mode(path, mode)?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    log::debug!(
        "Ignoring permissions {:o} for {}: not supported on this platform",
        mode,
        path.display()
    );
    Ok(())
}
