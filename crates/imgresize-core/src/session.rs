//! Resize sessions.
//!
//! An [`ImageResize`] owns one upright bitmap, its [`ResizePlan`], the
//! registered filters and the output configuration. Planner calls only
//! touch the plan; pixels are produced when the session is saved or
//! exported.
//!
//! # Example
//!
//! ```ignore
//! use imgresize_core::{CropAnchor, ImageResize, SaveOptions};
//!
//! let mut image = ImageResize::open("photo.jpg")?;
//! image.crop(300, 200, false, CropAnchor::CenterTop);
//! image.save("thumb.jpg", &SaveOptions::new().quality(80))?;
//! ```

use std::path::Path;

use image::DynamicImage;

use crate::codec::{BitmapCodec, ColorMode, ImageCodec};
use crate::config::{OutputConfig, SaveOptions};
use crate::decode::{LoadError, OrientationCorrection, SourceFormat};
use crate::encode::OutputFormat;
use crate::error::{ImageResizeError, Result};
use crate::filter::{FilterKind, FilterPipeline, PixelFilter};
use crate::geometry::{CropAnchor, PixelPlan, PixelRect, ResizePlan};

/// Gamma of the encoded source assumed when resampling in linear light.
const SOURCE_GAMMA: f64 = 2.2;
const LINEAR_GAMMA: f64 = 1.0;

/// A loaded image plus the plan for its next output.
pub struct ImageResize<C: BitmapCodec = ImageCodec> {
    codec: C,
    bitmap: DynamicImage,
    source_format: SourceFormat,
    plan: ResizePlan,
    filters: FilterPipeline,
    config: OutputConfig,
}

impl ImageResize<ImageCodec> {
    /// Load an image file.
    ///
    /// # Errors
    ///
    /// `LoadError::NoFilename` for an empty path, `LoadError::NotAFile` if
    /// the path is not a regular file, `LoadError::Io` if it cannot be read,
    /// plus everything [`from_bytes`](Self::from_bytes) reports.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_codec(path, ImageCodec::new())
    }

    /// Load an image from encoded bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_codec(data, ImageCodec::new())
    }
}

impl<C: BitmapCodec> ImageResize<C> {
    pub fn open_with_codec(path: impl AsRef<Path>, codec: C) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(LoadError::NoFilename.into());
        }
        if !path.is_file() {
            return Err(LoadError::NotAFile(path.display().to_string()).into());
        }

        let data = std::fs::read(path)
            .map_err(|e| LoadError::Io(format!("{}: {}", path.display(), e)))?;
        log::debug!("Read {} bytes from {}", data.len(), path.display());

        Self::from_bytes_with_codec(&data, codec)
    }

    /// Decode `data` with `codec` and bring the bitmap upright.
    pub fn from_bytes_with_codec(data: &[u8], codec: C) -> Result<Self> {
        if data.is_empty() {
            return Err(LoadError::EmptyData.into());
        }

        let decoded = codec.decode(data)?;
        let correction = decoded
            .orientation
            .map(|orientation| orientation.correction())
            .unwrap_or_default();
        let bitmap = correct_orientation(&codec, decoded.image, correction)?;

        // Dimensions are re-read from the corrected bitmap.
        let plan = ResizePlan::new(bitmap.width(), bitmap.height());
        log::debug!(
            "Loaded {:?} image {}x{}",
            decoded.format,
            plan.original_width(),
            plan.original_height()
        );

        Ok(Self {
            codec,
            bitmap,
            source_format: decoded.format,
            plan,
            filters: FilterPipeline::new(),
            config: OutputConfig::default(),
        })
    }

    /// Replace the output configuration.
    pub fn with_config(mut self, config: OutputConfig) -> Self {
        self.config = config;
        self
    }

    // Planner

    pub fn resize(
        &mut self,
        width: impl Into<f64>,
        height: impl Into<f64>,
        allow_enlarge: bool,
    ) -> &mut Self {
        self.plan.resize(width, height, allow_enlarge);
        self
    }

    pub fn resize_to_width(&mut self, width: impl Into<f64>, allow_enlarge: bool) -> &mut Self {
        self.plan.resize_to_width(width, allow_enlarge);
        self
    }

    pub fn resize_to_height(&mut self, height: impl Into<f64>, allow_enlarge: bool) -> &mut Self {
        self.plan.resize_to_height(height, allow_enlarge);
        self
    }

    pub fn resize_to_short_side(
        &mut self,
        max_short: impl Into<f64>,
        allow_enlarge: bool,
    ) -> &mut Self {
        self.plan.resize_to_short_side(max_short, allow_enlarge);
        self
    }

    pub fn resize_to_long_side(
        &mut self,
        max_long: impl Into<f64>,
        allow_enlarge: bool,
    ) -> &mut Self {
        self.plan.resize_to_long_side(max_long, allow_enlarge);
        self
    }

    pub fn resize_to_best_fit(
        &mut self,
        max_width: impl Into<f64>,
        max_height: impl Into<f64>,
        allow_enlarge: bool,
    ) -> &mut Self {
        self.plan
            .resize_to_best_fit(max_width, max_height, allow_enlarge);
        self
    }

    pub fn scale(&mut self, percent: impl Into<f64>) -> &mut Self {
        self.plan.scale(percent);
        self
    }

    pub fn crop(
        &mut self,
        width: impl Into<f64>,
        height: impl Into<f64>,
        allow_enlarge: bool,
        anchor: CropAnchor,
    ) -> &mut Self {
        self.plan.crop(width, height, allow_enlarge, anchor);
        self
    }

    pub fn freecrop(
        &mut self,
        width: impl Into<f64>,
        height: impl Into<f64>,
        x: Option<f64>,
        y: Option<f64>,
    ) -> &mut Self {
        self.plan.freecrop(width, height, x, y);
        self
    }

    // Getters

    pub fn original_width(&self) -> u32 {
        self.plan.original_width()
    }

    pub fn original_height(&self) -> u32 {
        self.plan.original_height()
    }

    pub fn dest_width(&self) -> f64 {
        self.plan.dest_width()
    }

    pub fn dest_height(&self) -> f64 {
        self.plan.dest_height()
    }

    pub fn source_format(&self) -> SourceFormat {
        self.source_format
    }

    pub fn plan(&self) -> &ResizePlan {
        &self.plan
    }

    /// The upright source bitmap.
    pub fn bitmap(&self) -> &DynamicImage {
        &self.bitmap
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut OutputConfig {
        &mut self.config
    }

    // Filters and settings

    /// Register a filter that runs with the default [`FilterKind`].
    pub fn add_filter(&mut self, filter: impl PixelFilter + 'static) -> &mut Self {
        self.filters.push(filter, FilterKind::default());
        self
    }

    pub fn add_filter_with_kind(
        &mut self,
        filter: impl PixelFilter + 'static,
        kind: FilterKind,
    ) -> &mut Self {
        self.filters.push(filter, kind);
        self
    }

    pub fn gamma(&mut self, enable: bool) -> &mut Self {
        self.config.gamma_correction = enable;
        self
    }

    /// Set the JPEG quality. Zero keeps the current value.
    pub fn set_quality_jpeg(&mut self, quality: u8) -> &mut Self {
        if quality != 0 {
            self.config.quality_jpg = quality;
        }
        self
    }

    /// Set the PNG compression level. Zero keeps the current value.
    pub fn set_quality_png(&mut self, level: u8) -> &mut Self {
        if level != 0 {
            self.config.quality_png = level;
        }
        self
    }

    /// Set the WebP quality. Zero keeps the current value.
    pub fn set_quality_webp(&mut self, quality: u8) -> &mut Self {
        if quality != 0 {
            self.config.quality_webp = quality;
        }
        self
    }

    // Output

    /// Render the plan and write it to `path`.
    pub fn save(&self, path: impl AsRef<Path>, options: &SaveOptions) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.render(options)?;

        self.codec
            .write(&bytes, path, options.permissions)
            .map_err(|source| ImageResizeError::Write {
                path: path.to_path_buf(),
                source,
            })?;

        log::debug!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    /// Render the plan and return the encoded bytes.
    pub fn to_bytes(&self, options: &SaveOptions) -> Result<Vec<u8>> {
        self.render(options)
    }

    fn render(&self, options: &SaveOptions) -> Result<Vec<u8>> {
        let format = match options.format {
            Some(format) => format,
            None => OutputFormat::from_source(self.source_format)?,
        };
        let quality = self.config.resolve_quality(format, options.quality);

        let pixels = match options.exact_size {
            Some((width, height)) => self.centered_plan(width, height).quantize()?,
            None => self.plan.quantize()?,
        };
        let (canvas_width, canvas_height) = options
            .exact_size
            .unwrap_or((pixels.dest_width, pixels.dest_height));

        let color_mode = if format == OutputFormat::Png
            && !self.config.quality_truecolor
            && !self.bitmap.color().has_color()
        {
            ColorMode::Grayscale
        } else {
            ColorMode::TrueColor
        };

        let mut canvas = self
            .codec
            .allocate_canvas(canvas_width, canvas_height, format, color_mode)
            .map_err(|e| ImageResizeError::Canvas(e.0))?;

        if self.config.gamma_correction {
            let region = self.linear_region(&pixels)?;
            let region_plan = PixelPlan {
                source: PixelRect {
                    x: 0,
                    y: 0,
                    width: region.width(),
                    height: region.height(),
                },
                ..pixels
            };
            self.codec
                .resample(&mut canvas, &region, &region_plan, self.config.filter)
                .map_err(|e| ImageResizeError::Resample(e.0))?;
            self.codec
                .apply_gamma(&mut canvas.image, LINEAR_GAMMA, SOURCE_GAMMA)
                .map_err(|e| ImageResizeError::Resample(e.0))?;
        } else {
            self.codec
                .resample(&mut canvas, &self.bitmap, &pixels, self.config.filter)
                .map_err(|e| ImageResizeError::Resample(e.0))?;
        }

        self.filters.apply(&mut canvas)?;

        let bytes = self
            .codec
            .encode(&canvas, quality, self.config.interlace)?;
        log::debug!(
            "Rendered {}x{} {:?} ({} bytes)",
            canvas_width,
            canvas_height,
            format,
            bytes.len()
        );
        Ok(bytes)
    }

    /// Plan copy centered inside a `width` x `height` canvas.
    fn centered_plan(&self, width: u32, height: u32) -> ResizePlan {
        let source = self.plan.source();
        if source.height < source.width {
            let y = (height as f64 - self.plan.dest_height()) / 2.0;
            self.plan.with_dest_origin(0.0, y)
        } else if source.height > source.width {
            let x = (width as f64 - self.plan.dest_width()) / 2.0;
            self.plan.with_dest_origin(x, 0.0)
        } else {
            self.plan.clone()
        }
    }

    /// The planned source region converted to linear light.
    fn linear_region(&self, pixels: &PixelPlan) -> Result<DynamicImage> {
        let src = pixels.source;
        let mut region = self.bitmap.crop_imm(src.x, src.y, src.width, src.height);
        self.codec
            .apply_gamma(&mut region, SOURCE_GAMMA, LINEAR_GAMMA)
            .map_err(|e| ImageResizeError::Resample(e.0))?;
        Ok(region)
    }
}

impl<C: BitmapCodec> std::fmt::Debug for ImageResize<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageResize")
            .field("source_format", &self.source_format)
            .field("plan", &self.plan)
            .field("filters", &self.filters)
            .field("config", &self.config)
            .finish()
    }
}

fn correct_orientation<C: BitmapCodec>(
    codec: &C,
    bitmap: DynamicImage,
    correction: OrientationCorrection,
) -> Result<DynamicImage> {
    if correction.is_identity() {
        return Ok(bitmap);
    }

    let (width, height) = correction.corrected_dimensions(bitmap.width(), bitmap.height());
    log::debug!(
        "Correcting orientation: rotate {} degrees counter-clockwise, flip {:?}, {}x{} -> {}x{}",
        correction.rotation.degrees(),
        correction.flip,
        bitmap.width(),
        bitmap.height(),
        width,
        height
    );

    let mut bitmap = codec
        .rotate(bitmap, correction.rotation)
        .map_err(|e| ImageResizeError::Orientation(e.0))?;
    if let Some(axis) = correction.flip {
        bitmap = codec
            .flip(bitmap, axis)
            .map_err(|e| ImageResizeError::Orientation(e.0))?;
    }
    Ok(bitmap)
}
