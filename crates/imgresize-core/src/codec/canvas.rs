//! Output canvas preparation.

use image::{DynamicImage, GrayAlphaImage, LumaA, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::encode::OutputFormat;

/// Pixel storage of an output canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    /// RGBA, 8 bits per channel.
    #[default]
    TrueColor,
    /// Gray + alpha. Only chosen for PNG output of a non-truecolor source
    /// when truecolor output is disabled. This stands in for a palette
    /// canvas: color sources always stay truecolor.
    Grayscale,
}

/// The destination bitmap a plan is resampled into.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub image: DynamicImage,
    pub format: OutputFormat,
    pub color_mode: ColorMode,
}

impl Canvas {
    /// Allocate a canvas filled with the background of `format`.
    ///
    /// GIF and PNG canvases start transparent white, JPEG and WebP opaque white.
    pub fn new(width: u32, height: u32, format: OutputFormat, color_mode: ColorMode) -> Self {
        let background = Self::background(format);
        let image = match color_mode {
            ColorMode::TrueColor => {
                DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, background))
            }
            ColorMode::Grayscale => DynamicImage::ImageLumaA8(GrayAlphaImage::from_pixel(
                width,
                height,
                LumaA([background[0], background[3]]),
            )),
        };

        Self {
            image,
            format,
            color_mode,
        }
    }

    /// Background colour for a fresh canvas of `format`.
    pub fn background(format: OutputFormat) -> Rgba<u8> {
        match format {
            OutputFormat::Gif | OutputFormat::Png => Rgba([255, 255, 255, 0]),
            OutputFormat::Jpeg | OutputFormat::WebP => Rgba([255, 255, 255, 255]),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    #[test]
    fn test_jpeg_canvas_is_opaque_white() {
        let canvas = Canvas::new(4, 3, OutputFormat::Jpeg, ColorMode::TrueColor);
        assert_eq!((canvas.width(), canvas.height()), (4, 3));
        assert_eq!(canvas.image.get_pixel(2, 1), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_png_canvas_is_transparent() {
        let canvas = Canvas::new(4, 3, OutputFormat::Png, ColorMode::TrueColor);
        assert_eq!(canvas.image.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_gif_canvas_is_transparent() {
        let canvas = Canvas::new(2, 2, OutputFormat::Gif, ColorMode::TrueColor);
        assert_eq!(canvas.image.get_pixel(1, 1)[3], 0);
    }

    #[test]
    fn test_grayscale_canvas() {
        let canvas = Canvas::new(5, 5, OutputFormat::Png, ColorMode::Grayscale);
        assert!(matches!(canvas.image, DynamicImage::ImageLumaA8(_)));
        assert_eq!(canvas.color_mode, ColorMode::Grayscale);
    }
}
