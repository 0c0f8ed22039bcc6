//! Pixel filters applied to the destination canvas after resampling.
//!
//! Filters run in registration order, each with the [`FilterKind`] it was
//! registered with. The first failing filter aborts the save.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::{Canvas, ColorMode};

/// What a filter should do to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    /// Invert the colour channels.
    #[default]
    Negate,
    /// Convert to gray, keeping the canvas colour mode.
    Grayscale,
    /// Add a constant to every colour channel.
    Brightness(i32),
    /// Contrast adjustment; positive values increase contrast.
    Contrast(f32),
    /// Gaussian blur with the given sigma.
    GaussianBlur(f32),
}

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Filter {kind:?} failed: {message}")]
    Failed { kind: FilterKind, message: String },

    #[error("Filter {0:?} is not supported by this filter")]
    Unsupported(FilterKind),
}

/// A pixel transform run on the prepared canvas.
pub trait PixelFilter: Send {
    fn apply(&self, canvas: &mut Canvas, kind: FilterKind) -> Result<(), FilterError>;
}

impl<F> PixelFilter for F
where
    F: Fn(&mut Canvas, FilterKind) -> Result<(), FilterError> + Send,
{
    fn apply(&self, canvas: &mut Canvas, kind: FilterKind) -> Result<(), FilterError> {
        self(canvas, kind)
    }
}

/// Built-in filter mapping every [`FilterKind`] onto `image::imageops`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFilter;

impl PixelFilter for ImageFilter {
    fn apply(&self, canvas: &mut Canvas, kind: FilterKind) -> Result<(), FilterError> {
        match kind {
            FilterKind::Negate => canvas.image.invert(),
            FilterKind::Grayscale => {
                let gray = canvas.image.grayscale();
                canvas.image = match canvas.color_mode {
                    ColorMode::TrueColor => image::DynamicImage::ImageRgba8(gray.to_rgba8()),
                    ColorMode::Grayscale => image::DynamicImage::ImageLumaA8(gray.to_luma_alpha8()),
                };
            }
            FilterKind::Brightness(value) => canvas.image = canvas.image.brighten(value),
            FilterKind::Contrast(value) => canvas.image = canvas.image.adjust_contrast(value),
            FilterKind::GaussianBlur(sigma) => {
                if !(sigma.is_finite() && sigma > 0.0) {
                    return Err(FilterError::Failed {
                        kind,
                        message: format!("blur sigma must be positive, got {sigma}"),
                    });
                }
                canvas.image = canvas.image.blur(sigma);
            }
        }
        Ok(())
    }
}

/// Ordered list of registered filters.
#[derive(Default)]
pub struct FilterPipeline {
    entries: Vec<(Box<dyn PixelFilter>, FilterKind)>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `filter` to run with `kind`.
    pub fn push(&mut self, filter: impl PixelFilter + 'static, kind: FilterKind) {
        self.entries.push((Box::new(filter), kind));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run every filter in registration order, stopping at the first failure.
    pub fn apply(&self, canvas: &mut Canvas) -> Result<(), FilterError> {
        for (filter, kind) in &self.entries {
            log::debug!("Applying filter {:?}", kind);
            filter.apply(canvas, *kind)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for FilterPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterPipeline")
            .field(
                "kinds",
                &self.entries.iter().map(|(_, kind)| kind).collect::<Vec<_>>(),
            )
            .finish()
    }
}
