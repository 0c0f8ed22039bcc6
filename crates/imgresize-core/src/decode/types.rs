//! Core types for image loading and orientation correction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// An empty path was given.
    #[error("No filename given")]
    NoFilename,

    /// The path does not point to a regular file.
    #[error("Not a file: {0}")]
    NotAFile(String),

    /// The in-memory image data is empty.
    #[error("Image data must not be empty")]
    EmptyData,

    /// The file could not be read.
    #[error("Could not read file: {0}")]
    Io(String),

    /// The container is not one of the accepted input formats.
    #[error("Unsupported image type")]
    UnsupportedFormat,

    /// The image file is corrupted or incomplete.
    #[error("Could not load image: {0}")]
    CorruptedFile(String),
}

/// Accepted input container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Gif,
    Jpeg,
    Png,
    WebP,
    Bmp,
}

impl SourceFormat {
    /// Map the `image` crate's detected format onto an accepted input format.
    pub fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Gif => Some(SourceFormat::Gif),
            image::ImageFormat::Jpeg => Some(SourceFormat::Jpeg),
            image::ImageFormat::Png => Some(SourceFormat::Png),
            image::ImageFormat::WebP => Some(SourceFormat::WebP),
            image::ImageFormat::Bmp => Some(SourceFormat::Bmp),
            _ => None,
        }
    }

    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            SourceFormat::Gif => image::ImageFormat::Gif,
            SourceFormat::Jpeg => image::ImageFormat::Jpeg,
            SourceFormat::Png => image::ImageFormat::Png,
            SourceFormat::WebP => image::ImageFormat::WebP,
            SourceFormat::Bmp => image::ImageFormat::Bmp,
        }
    }
}

/// Rotation applied during orientation correction, counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    None,
    Ccw90,
    Ccw180,
    Ccw270,
}

impl Rotation {
    /// Counter-clockwise angle in degrees.
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Ccw90 => 90,
            Rotation::Ccw180 => 180,
            Rotation::Ccw270 => 270,
        }
    }

    /// Returns true for quarter turns, which swap width and height.
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Rotation::Ccw90 | Rotation::Ccw270)
    }
}

/// Mirror axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipAxis {
    Horizontal,
    Vertical,
}

/// The correction that makes an EXIF-oriented bitmap upright.
///
/// The rotation is applied first, then the flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrientationCorrection {
    pub rotation: Rotation,
    pub flip: Option<FlipAxis>,
}

impl OrientationCorrection {
    /// Returns true if the correction leaves the bitmap untouched.
    pub fn is_identity(self) -> bool {
        self.rotation == Rotation::None && self.flip.is_none()
    }

    /// Dimensions of a `width` x `height` bitmap after the correction.
    pub fn corrected_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        if self.rotation.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Parse an EXIF orientation tag. Values outside 1-8 yield `None`.
    pub fn from_exif(value: u32) -> Option<Self> {
        match value {
            1 => Some(Orientation::Normal),
            2 => Some(Orientation::FlipHorizontal),
            3 => Some(Orientation::Rotate180),
            4 => Some(Orientation::FlipVertical),
            5 => Some(Orientation::Transpose),
            6 => Some(Orientation::Rotate90CW),
            7 => Some(Orientation::Transverse),
            8 => Some(Orientation::Rotate270CW),
            _ => None,
        }
    }

    /// Rotation and flip that bring the bitmap upright.
    pub fn correction(self) -> OrientationCorrection {
        let rotation = match self {
            Orientation::Normal | Orientation::FlipHorizontal => Rotation::None,
            Orientation::Rotate180 | Orientation::FlipVertical => Rotation::Ccw180,
            Orientation::Transpose | Orientation::Rotate90CW => Rotation::Ccw270,
            Orientation::Transverse | Orientation::Rotate270CW => Rotation::Ccw90,
        };
        let flip = match self {
            Orientation::FlipHorizontal
            | Orientation::FlipVertical
            | Orientation::Transpose
            | Orientation::Transverse => Some(FlipAxis::Horizontal),
            _ => None,
        };
        OrientationCorrection { rotation, flip }
    }
}
