//! Crop anchor resolution.
//!
//! When a crop trims one axis, the anchor decides which part of the excess
//! is discarded. The resolver returns the offset of the crop window into the
//! source axis.

use serde::{Deserialize, Serialize};

/// Named reference point for placing the crop window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CropAnchor {
    /// Keep the top of the image.
    Top,
    /// Keep the bottom of the image.
    Bottom,
    /// Keep the left edge of the image.
    Left,
    /// Keep the right edge of the image.
    Right,
    /// Trim evenly from both ends.
    #[default]
    Center,
    /// Slightly above center: a quarter of the excess is trimmed from the start.
    CenterTop,
}

impl CropAnchor {
    /// Offset of the crop window for the given excess dimension.
    ///
    /// `excess` is measured in source pixels along the trimmed axis.
    pub fn offset(self, excess: f64) -> f64 {
        match self {
            CropAnchor::Bottom | CropAnchor::Right => excess,
            CropAnchor::Center => excess / 2.0,
            CropAnchor::CenterTop => excess / 4.0,
            CropAnchor::Top | CropAnchor::Left => 0.0,
        }
    }

    /// Parse an anchor name.
    ///
    /// Unrecognized names resolve to [`CropAnchor::Top`], which keeps the
    /// window at offset zero.
    pub fn parse(name: &str) -> CropAnchor {
        match name.trim().to_ascii_lowercase().as_str() {
            "bottom" => CropAnchor::Bottom,
            "left" => CropAnchor::Left,
            "right" => CropAnchor::Right,
            "center" | "centre" => CropAnchor::Center,
            "center-top" | "top-center" | "centre-top" | "top-centre" => CropAnchor::CenterTop,
            _ => CropAnchor::Top,
        }
    }
}

impl From<&str> for CropAnchor {
    fn from(name: &str) -> Self {
        CropAnchor::parse(name)
    }
}
