//! Resize session bindings.
//!
//! # Example
//!
//! ```typescript
//! import { JsImageResize } from '@imgresize/wasm';
//!
//! const image = new JsImageResize(new Uint8Array(await file.arrayBuffer()));
//! image.crop(300, 200, false, 'center-top');
//! image.add_filter_kind('grayscale', 0);
//! const jpeg = image.to_bytes('jpeg', 80);
//! ```

use imgresize_core::{CropAnchor, ImageFilter, ImageResize, SaveOptions};
use wasm_bindgen::prelude::*;

use crate::types::{filter_kind, js_error, save_options, JsPlan};

/// An image loaded for resizing.
///
/// Planner calls replace the current plan; nothing is rendered until
/// `to_bytes` or `to_bytes_exact` is called.
#[wasm_bindgen]
pub struct JsImageResize {
    inner: ImageResize,
}

#[wasm_bindgen]
impl JsImageResize {
    /// Decode GIF, JPEG, PNG, WebP or BMP bytes.
    #[wasm_bindgen(constructor)]
    pub fn new(bytes: &[u8]) -> Result<JsImageResize, JsValue> {
        Self::load(bytes).map_err(js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn original_width(&self) -> u32 {
        self.inner.original_width()
    }

    #[wasm_bindgen(getter)]
    pub fn original_height(&self) -> u32 {
        self.inner.original_height()
    }

    #[wasm_bindgen(getter)]
    pub fn dest_width(&self) -> f64 {
        self.inner.dest_width()
    }

    #[wasm_bindgen(getter)]
    pub fn dest_height(&self) -> f64 {
        self.inner.dest_height()
    }

    /// Lowercase name of the decoded format, e.g. `"jpeg"`.
    #[wasm_bindgen(getter)]
    pub fn source_format(&self) -> String {
        format!("{:?}", self.inner.source_format()).to_ascii_lowercase()
    }

    pub fn resize(&mut self, width: f64, height: f64, allow_enlarge: bool) {
        self.inner.resize(width, height, allow_enlarge);
    }

    pub fn resize_to_width(&mut self, width: f64, allow_enlarge: bool) {
        self.inner.resize_to_width(width, allow_enlarge);
    }

    pub fn resize_to_height(&mut self, height: f64, allow_enlarge: bool) {
        self.inner.resize_to_height(height, allow_enlarge);
    }

    pub fn resize_to_short_side(&mut self, max_short: f64, allow_enlarge: bool) {
        self.inner.resize_to_short_side(max_short, allow_enlarge);
    }

    pub fn resize_to_long_side(&mut self, max_long: f64, allow_enlarge: bool) {
        self.inner.resize_to_long_side(max_long, allow_enlarge);
    }

    pub fn resize_to_best_fit(&mut self, max_width: f64, max_height: f64, allow_enlarge: bool) {
        self.inner
            .resize_to_best_fit(max_width, max_height, allow_enlarge);
    }

    pub fn scale(&mut self, percent: f64) {
        self.inner.scale(percent);
    }

    /// Crop to `width` x `height`. Unknown anchor names keep the top/left edge.
    pub fn crop(&mut self, width: f64, height: f64, allow_enlarge: bool, anchor: &str) {
        self.inner
            .crop(width, height, allow_enlarge, CropAnchor::parse(anchor));
    }

    /// Crop a window at `(x, y)`; a centered crop when either offset is missing.
    pub fn freecrop(&mut self, width: f64, height: f64, x: Option<f64>, y: Option<f64>) {
        self.inner.freecrop(width, height, x, y);
    }

    /// Register a built-in filter by name (`negate`, `grayscale`,
    /// `brightness`, `contrast`, `blur`).
    pub fn add_filter_kind(&mut self, name: &str, value: f64) -> Result<(), JsValue> {
        self.add_builtin_filter(name, value).map_err(js_error)
    }

    pub fn gamma(&mut self, enable: bool) {
        self.inner.gamma(enable);
    }

    pub fn set_quality_jpeg(&mut self, quality: u8) {
        self.inner.set_quality_jpeg(quality);
    }

    pub fn set_quality_png(&mut self, level: u8) {
        self.inner.set_quality_png(level);
    }

    pub fn set_quality_webp(&mut self, quality: u8) {
        self.inner.set_quality_webp(quality);
    }

    /// Render the plan. `format` defaults to the source format.
    pub fn to_bytes(&self, format: Option<String>, quality: Option<u8>) -> Result<Vec<u8>, JsValue> {
        let options = save_options(format, quality).map_err(js_error)?;
        self.render(&options).map_err(js_error)
    }

    /// Render the plan centered on a `width` x `height` canvas.
    pub fn to_bytes_exact(
        &self,
        format: Option<String>,
        quality: Option<u8>,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, JsValue> {
        let options = save_options(format, quality)
            .map_err(js_error)?
            .exact_size(width, height);
        self.render(&options).map_err(js_error)
    }

    /// Current plan as `{ original_width, original_height, source, dest }`.
    pub fn plan(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&JsPlan::from(self.inner.plan()))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsImageResize {
    fn load(bytes: &[u8]) -> Result<Self, String> {
        ImageResize::from_bytes(bytes)
            .map(|inner| Self { inner })
            .map_err(|e| e.to_string())
    }

    fn add_builtin_filter(&mut self, name: &str, value: f64) -> Result<(), String> {
        let kind = filter_kind(name, value)?;
        self.inner.add_filter_with_kind(ImageFilter, kind);
        Ok(())
    }

    fn render(&self, options: &SaveOptions) -> Result<Vec<u8>, String> {
        self.inner.to_bytes(options).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            width,
            height,
            image::Rgb([30, 60, 90]),
        ));
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_load_and_plan() {
        let mut image = JsImageResize::load(&png(400, 300)).unwrap();
        assert_eq!((image.original_width(), image.original_height()), (400, 300));
        assert_eq!(image.source_format(), "png");

        image.crop(100.0, 100.0, false, "centre");
        assert_eq!((image.dest_width(), image.dest_height()), (100.0, 100.0));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let err = JsImageResize::load(b"not an image").err().unwrap();
        assert_eq!(err, "Unsupported image type");
    }

    #[test]
    fn test_render_with_builtin_filter() {
        let mut image = JsImageResize::load(&png(40, 30)).unwrap();
        image.resize_to_width(20.0, false);
        image.add_builtin_filter("grayscale", 0.0).unwrap();

        let options = save_options(Some("jpeg".to_string()), Some(80)).unwrap();
        let bytes = image.render(&options).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (20, 15));
    }

    #[test]
    fn test_render_exact_size() {
        let mut image = JsImageResize::load(&png(40, 20)).unwrap();
        image.resize_to_width(20.0, false);

        let options = save_options(None, None).unwrap().exact_size(20, 20);
        let decoded = image::load_from_memory(&image.render(&options).unwrap()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (20, 20));
    }

    #[test]
    fn test_unknown_filter() {
        let mut image = JsImageResize::load(&png(4, 4)).unwrap();
        assert!(image.add_builtin_filter("sepia", 0.0).is_err());
    }
}
