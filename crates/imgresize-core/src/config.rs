//! Output configuration and per-save options.
//!
//! Both structs are `#[serde(default)]`, so a partial JSON or TOML document
//! fills the missing fields from the defaults.

use serde::{Deserialize, Serialize};

use crate::codec::FilterType;
use crate::encode::OutputFormat;

/// Session-wide output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JPEG quality, 0-100.
    pub quality_jpg: u8,
    /// WebP quality, 0-100. The lossless encoder ignores it.
    pub quality_webp: u8,
    /// PNG compression level, 0-9.
    pub quality_png: u8,
    /// Keep truecolor PNG output even for grayscale sources.
    pub quality_truecolor: bool,
    /// Resample in linear light.
    pub gamma_correction: bool,
    /// Accepted for compatibility; the encoders write non-interlaced output.
    pub interlace: bool,
    /// Resampling filter.
    pub filter: FilterType,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quality_jpg: 85,
            quality_webp: 85,
            quality_png: 6,
            quality_truecolor: true,
            gamma_correction: false,
            interlace: true,
            filter: FilterType::Bilinear,
        }
    }
}

impl OutputConfig {
    /// Quality passed to the encoder for `format`.
    ///
    /// A requested JPEG quality above 100 or PNG level above 9 falls back
    /// to the configured value, as does a missing request. GIF has no
    /// quality setting and always gets 0.
    pub fn resolve_quality(&self, format: OutputFormat, requested: Option<u8>) -> u8 {
        match format {
            OutputFormat::Jpeg => requested.filter(|&q| q <= 100).unwrap_or(self.quality_jpg),
            OutputFormat::Png => requested.filter(|&q| q <= 9).unwrap_or(self.quality_png),
            OutputFormat::WebP => requested.unwrap_or(self.quality_webp),
            OutputFormat::Gif => 0,
        }
    }
}

/// Options for a single save or export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveOptions {
    /// Output format; the source format when `None`.
    pub format: Option<OutputFormat>,
    /// Format-specific quality; the configured value when `None`.
    pub quality: Option<u8>,
    /// Unix mode bits applied after writing.
    pub permissions: Option<u32>,
    /// Canvas size for padded output; the planned destination when `None`.
    pub exact_size: Option<(u32, u32)>,
}

impl SaveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn permissions(mut self, mode: u32) -> Self {
        self.permissions = Some(mode);
        self
    }

    pub fn exact_size(mut self, width: u32, height: u32) -> Self {
        self.exact_size = Some((width, height));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OutputConfig::default();
        assert_eq!(config.quality_jpg, 85);
        assert_eq!(config.quality_webp, 85);
        assert_eq!(config.quality_png, 6);
        assert!(config.quality_truecolor);
        assert!(!config.gamma_correction);
        assert!(config.interlace);
        assert_eq!(config.filter, FilterType::Bilinear);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: OutputConfig =
            serde_json::from_str(r#"{"quality_jpg": 70, "gamma_correction": true}"#).unwrap();
        assert_eq!(config.quality_jpg, 70);
        assert!(config.gamma_correction);
        assert_eq!(config.quality_png, 6);
        assert!(config.interlace);
    }

    #[test]
    fn test_resolve_jpeg_quality() {
        let config = OutputConfig::default();
        assert_eq!(config.resolve_quality(OutputFormat::Jpeg, Some(60)), 60);
        assert_eq!(config.resolve_quality(OutputFormat::Jpeg, Some(100)), 100);
        assert_eq!(config.resolve_quality(OutputFormat::Jpeg, Some(101)), 85);
        assert_eq!(config.resolve_quality(OutputFormat::Jpeg, None), 85);
    }

    #[test]
    fn test_resolve_png_quality() {
        let config = OutputConfig::default();
        assert_eq!(config.resolve_quality(OutputFormat::Png, Some(9)), 9);
        assert_eq!(config.resolve_quality(OutputFormat::Png, Some(10)), 6);
        assert_eq!(config.resolve_quality(OutputFormat::Png, None), 6);
    }

    #[test]
    fn test_resolve_webp_and_gif_quality() {
        let config = OutputConfig::default();
        assert_eq!(config.resolve_quality(OutputFormat::WebP, Some(200)), 200);
        assert_eq!(config.resolve_quality(OutputFormat::WebP, None), 85);
        assert_eq!(config.resolve_quality(OutputFormat::Gif, Some(50)), 0);
    }

    #[test]
    fn test_save_options_builder() {
        let options = SaveOptions::new()
            .format(OutputFormat::Png)
            .quality(3)
            .permissions(0o644)
            .exact_size(200, 100);
        assert_eq!(options.format, Some(OutputFormat::Png));
        assert_eq!(options.quality, Some(3));
        assert_eq!(options.permissions, Some(0o644));
        assert_eq!(options.exact_size, Some((200, 100)));
    }

    #[test]
    fn test_save_options_from_json() {
        let options: SaveOptions = serde_json::from_str(r#"{"format": "webp"}"#).unwrap();
        assert_eq!(options.format, Some(OutputFormat::WebP));
        assert_eq!(options.quality, None);
    }
}
