//! imgresize WASM - WebAssembly bindings for imgresize
//!
//! This crate exposes imgresize-core resize sessions to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `resize` - `JsImageResize`, a session over one decoded image
//! - `types` - argument parsing and the plan snapshot type
//! - `logger` - `log` output to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsImageResize, set_log_level } from '@imgresize/wasm';
//!
//! await init();
//! set_log_level('debug');
//!
//! const image = new JsImageResize(bytes);
//! image.resize_to_best_fit(800, 800, false);
//! const webp = image.to_bytes('webp', undefined);
//! ```

use wasm_bindgen::prelude::*;

mod logger;
mod resize;
mod types;

pub use resize::JsImageResize;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Warn);
}

/// Change the console log level (`off`, `error`, `warn`, `info`, `debug`, `trace`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logger::install(logger::parse_level(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// MIME type for an output format name, e.g. `"image/webp"` for `"webp"`.
#[wasm_bindgen]
pub fn mime_type(format: &str) -> Option<String> {
    imgresize_core::OutputFormat::parse(format).map(|f| f.mime_type().to_string())
}
