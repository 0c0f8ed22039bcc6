//! `log` backend writing to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = format_record(record.level(), record.target(), &record.args().to_string());
        let value = wasm_bindgen::JsValue::from_str(&message);
        match record.level() {
            Level::Error => web_sys::console::error_1(&value),
            Level::Warn => web_sys::console::warn_1(&value),
            Level::Info => web_sys::console::info_1(&value),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
        }
    }

    fn flush(&self) {}
}

fn format_record(level: Level, target: &str, message: &str) -> String {
    format!("[{} {}] {}", level, target, message)
}

/// Install the console logger. Later calls only change the level.
pub(crate) fn install(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::debug!("Console logger installed");
    }
    log::set_max_level(level);
}

/// Parse a level name, falling back to `Info`.
pub(crate) fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_record() {
        assert_eq!(
            format_record(Level::Debug, "imgresize_core::session", "Loaded"),
            "[DEBUG imgresize_core::session] Loaded"
        );
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("TRACE"), LevelFilter::Trace);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }
}
