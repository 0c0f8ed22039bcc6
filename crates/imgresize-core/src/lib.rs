//! imgresize Core - Image resize and crop library
//!
//! This crate plans resize, fit, scale and crop operations on raster images
//! and renders them through a bitmap codec. It covers:
//!
//! - Loading GIF, JPEG, PNG, WebP and BMP input, with EXIF orientation
//!   correction for JPEG
//! - The resize plan (source and destination rectangles) and its planner
//!   operations
//! - Canvas preparation, resampling, pixel filters and encoding to GIF,
//!   JPEG, PNG or WebP
//!
//! [`ImageResize`] ties these together for one image.

pub mod codec;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod session;

pub use codec::{BitmapCodec, Canvas, ColorMode, FilterType, ImageCodec};
pub use config::{OutputConfig, SaveOptions};
pub use decode::{LoadError, Orientation, SourceFormat};
pub use encode::{EncodeError, OutputFormat};
pub use error::ImageResizeError;
pub use filter::{FilterError, FilterKind, ImageFilter, PixelFilter};
pub use geometry::{CropAnchor, PixelPlan, PixelRect, PlanError, Rect, ResizePlan};
pub use session::ImageResize;
