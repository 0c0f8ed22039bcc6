//! Resize geometry: the plan model, the planner operations and crop anchors.
//!
//! A [`ResizePlan`] holds the original image dimensions plus one
//! source-rectangle/destination-rectangle pair. Every planner operation
//! overwrites that pair (the last call wins); nothing composes across calls
//! except the original dimensions.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - All planner math is `f64`; rectangles may be fractional
//! - [`ResizePlan::quantize`] is the only place floats become pixels
//!
//! # Example
//!
//! ```ignore
//! use imgresize_core::geometry::{CropAnchor, ResizePlan};
//!
//! let mut plan = ResizePlan::new(4000, 3000);
//! plan.crop(800, 800, false, CropAnchor::Center);
//! assert_eq!(plan.dest_width(), 800.0);
//! ```

mod anchor;
mod planner;

pub use anchor::CropAnchor;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a plan cannot be turned into pixel rectangles.
#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    /// Destination width or height is not a positive finite number.
    #[error("Invalid destination size: {width}x{height}")]
    InvalidDestination { width: f64, height: f64 },

    /// Source rectangle contains a non-finite coordinate.
    #[error("Invalid source rectangle: ({x}, {y}) {width}x{height}")]
    InvalidSource {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

/// Axis-aligned rectangle with fractional coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }
}

/// The dimension model for one loaded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizePlan {
    original_width: u32,
    original_height: u32,
    source: Rect,
    dest: Rect,
}

impl ResizePlan {
    /// Create a plan that maps the whole image onto an equally sized canvas.
    pub fn new(original_width: u32, original_height: u32) -> Self {
        let full = Rect::sized(original_width as f64, original_height as f64);
        Self {
            original_width,
            original_height,
            source: full,
            dest: full,
        }
    }

    /// Width of the upright original image.
    pub fn original_width(&self) -> u32 {
        self.original_width
    }

    /// Height of the upright original image.
    pub fn original_height(&self) -> u32 {
        self.original_height
    }

    /// Region of the original bitmap read by the next resample.
    pub fn source(&self) -> Rect {
        self.source
    }

    /// Region of the output canvas written by the next resample.
    pub fn dest(&self) -> Rect {
        self.dest
    }

    pub fn dest_width(&self) -> f64 {
        self.dest.width
    }

    pub fn dest_height(&self) -> f64 {
        self.dest.height
    }

    /// Copy of this plan with the destination moved to `(x, y)`.
    ///
    /// Used to center the resampled image inside an exact-size canvas.
    pub fn with_dest_origin(&self, x: f64, y: f64) -> ResizePlan {
        let mut plan = self.clone();
        plan.dest.x = x;
        plan.dest.y = y;
        plan
    }

    /// Round the plan to integer pixel rectangles.
    ///
    /// The source rectangle is clamped into the original bitmap and both
    /// rectangles are at least 1x1. Destination offsets may be negative when
    /// an exact-size canvas is smaller than the planned destination.
    pub fn quantize(&self) -> Result<PixelPlan, PlanError> {
        let dest = self.dest;
        if !(dest.width.is_finite() && dest.height.is_finite())
            || dest.width <= 0.0
            || dest.height <= 0.0
            || !dest.x.is_finite()
            || !dest.y.is_finite()
        {
            return Err(PlanError::InvalidDestination {
                width: dest.width,
                height: dest.height,
            });
        }

        let src = self.source;
        if !(src.x.is_finite() && src.y.is_finite() && src.width.is_finite() && src.height.is_finite())
        {
            return Err(PlanError::InvalidSource {
                x: src.x,
                y: src.y,
                width: src.width,
                height: src.height,
            });
        }

        let (source_x, source_width) = quantize_span(src.x, src.width, self.original_width);
        let (source_y, source_height) = quantize_span(src.y, src.height, self.original_height);

        let plan = PixelPlan {
            source: PixelRect {
                x: source_x,
                y: source_y,
                width: source_width,
                height: source_height,
            },
            dest_x: dest.x.round() as i64,
            dest_y: dest.y.round() as i64,
            dest_width: (dest.width.round() as u32).max(1),
            dest_height: (dest.height.round() as u32).max(1),
        };

        log::debug!(
            "Quantized plan: source ({}, {}) {}x{} -> dest ({}, {}) {}x{}",
            plan.source.x,
            plan.source.y,
            plan.source.width,
            plan.source.height,
            plan.dest_x,
            plan.dest_y,
            plan.dest_width,
            plan.dest_height
        );

        Ok(plan)
    }
}

/// Clamp a fractional `(offset, length)` span into `0..limit` and round it.
fn quantize_span(offset: f64, length: f64, limit: u32) -> (u32, u32) {
    let limit = limit.max(1);
    let start = (offset.round().max(0.0) as u32).min(limit - 1);
    let length = (length.round().max(1.0) as u32).min(limit - start);
    (start, length.max(1))
}

/// Integer pixel rectangle inside the source bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A plan rounded to integer pixels, ready for the resampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPlan {
    pub source: PixelRect,
    pub dest_x: i64,
    pub dest_y: i64,
    pub dest_width: u32,
    pub dest_height: u32,
}
