//! Image loading for imgresize.
//!
//! This module provides functionality for:
//! - Detecting the container format (GIF, JPEG, PNG, WebP, BMP)
//! - Decoding a bitmap with the `image` crate
//! - Reading the EXIF orientation of JPEG input
//! - Resolving an orientation tag into a rotation and flip
//!
//! Orientation is only resolved here; the rotate and flip primitives are
//! applied by the codec (see [`crate::codec::BitmapCodec`]) when a session
//! loads an image.

mod exif;
mod load;
mod types;

pub use exif::read_orientation;
pub use load::{decode_bitmap, detect_format, DecodedBitmap};
pub use types::{
    FlipAxis, LoadError, Orientation, OrientationCorrection, Rotation, SourceFormat,
};

#[cfg(test)]
pub(crate) use exif::with_orientation_tag;
