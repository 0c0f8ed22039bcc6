//! Conversions between JavaScript arguments and imgresize-core types.
//!
//! Everything here returns `String` errors so it can be tested on native
//! targets; the bindings turn them into JS `Error` objects.

use imgresize_core::{FilterKind, OutputFormat, Rect, ResizePlan, SaveOptions};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Plan snapshot handed to JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct JsPlan {
    pub original_width: u32,
    pub original_height: u32,
    pub source: Rect,
    pub dest: Rect,
}

impl From<&ResizePlan> for JsPlan {
    fn from(plan: &ResizePlan) -> Self {
        Self {
            original_width: plan.original_width(),
            original_height: plan.original_height(),
            source: plan.source(),
            dest: plan.dest(),
        }
    }
}

/// Parse an output format name such as `"jpeg"` or `"png"`.
pub(crate) fn parse_format(name: &str) -> Result<OutputFormat, String> {
    OutputFormat::parse(name).ok_or_else(|| format!("Unsupported output format: {}", name))
}

/// Build save options from optional JS arguments.
///
/// An empty format string counts as absent.
pub(crate) fn save_options(
    format: Option<String>,
    quality: Option<u8>,
) -> Result<SaveOptions, String> {
    let mut options = SaveOptions::new();
    if let Some(name) = format.filter(|name| !name.trim().is_empty()) {
        options = options.format(parse_format(&name)?);
    }
    options.quality = quality;
    Ok(options)
}

/// Map a built-in filter name and its numeric argument to a [`FilterKind`].
///
/// Names:
/// - `negate`, `grayscale` (value ignored)
/// - `brightness` (value truncated to an integer)
/// - `contrast`
/// - `blur` / `gaussian-blur` (value is the sigma)
pub(crate) fn filter_kind(name: &str, value: f64) -> Result<FilterKind, String> {
    match name.trim().to_ascii_lowercase().as_str() {
        "negate" => Ok(FilterKind::Negate),
        "grayscale" | "greyscale" => Ok(FilterKind::Grayscale),
        "brightness" => Ok(FilterKind::Brightness(value as i32)),
        "contrast" => Ok(FilterKind::Contrast(value as f32)),
        "blur" | "gaussian-blur" => Ok(FilterKind::GaussianBlur(value as f32)),
        other => Err(format!("Unknown filter: {}", other)),
    }
}

/// Wrap an error message in a JS `Error`.
pub(crate) fn js_error(message: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&message.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("jpg"), Ok(OutputFormat::Jpeg));
        assert_eq!(parse_format("WEBP"), Ok(OutputFormat::WebP));
        assert!(parse_format("tiff").is_err());
    }

    #[test]
    fn test_save_options_defaults() {
        let options = save_options(None, None).unwrap();
        assert_eq!(options, SaveOptions::new());

        let options = save_options(Some(String::new()), Some(70)).unwrap();
        assert_eq!(options.format, None);
        assert_eq!(options.quality, Some(70));
    }

    #[test]
    fn test_save_options_with_format() {
        let options = save_options(Some("png".to_string()), Some(9)).unwrap();
        assert_eq!(options.format, Some(OutputFormat::Png));
        assert!(save_options(Some("bmp".to_string()), None).is_err());
    }

    #[test]
    fn test_filter_kind() {
        assert_eq!(filter_kind("negate", 0.0), Ok(FilterKind::Negate));
        assert_eq!(filter_kind("Grayscale", 0.0), Ok(FilterKind::Grayscale));
        assert_eq!(filter_kind("brightness", 12.7), Ok(FilterKind::Brightness(12)));
        assert_eq!(filter_kind("blur", 1.5), Ok(FilterKind::GaussianBlur(1.5)));
        assert!(filter_kind("sepia", 0.0).is_err());
    }

    #[test]
    fn test_js_plan_from_plan() {
        let mut plan = ResizePlan::new(400, 300);
        plan.resize_to_width(200, false);

        let js = JsPlan::from(&plan);
        assert_eq!((js.original_width, js.original_height), (400, 300));
        assert_eq!(js.dest, Rect::sized(200.0, 150.0));
        assert_eq!(js.source, Rect::sized(400.0, 300.0));
    }
}
