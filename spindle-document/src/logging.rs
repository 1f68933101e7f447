//! Logging infrastructure for Spindle.
//!
//! Structured logging is controlled by environment variables:
//!
//! - `SPINDLE_DEBUG=true|1|yes` - Enable debug logging
//! - `SPINDLE_LOG_LEVEL=trace|debug|info|warn|error` - Set specific log level
//! - `SPINDLE_LOG_FORMAT=json|pretty|compact` - Set output format (default: json)
//!
//! ```rust,no_run
//! use spindle_document::logging;
//!
//! // Initialize logging (call once at startup)
//! logging::init();
//! ```
//!
//! Inside the crate, use the standard tracing macros:
//!
//! ```rust,ignore
//! debug!(model = %model, paths = tree.paths().len(), "Parsed include tree");
//! warn!(error = %e, "Data source fetch failed");
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Check if debug logging is enabled via `SPINDLE_DEBUG`.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("SPINDLE_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Normalize a level name, falling back to the debug-flag default.
fn normalize_level(level: &str) -> &'static str {
    match level.to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" => "warn",
        "error" => "error",
        _ if is_debug_enabled() => "debug",
        _ => "warn",
    }
}

/// Get the configured log level from `SPINDLE_LOG_LEVEL`.
///
/// Defaults to "debug" if `SPINDLE_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    match env::var("SPINDLE_LOG_LEVEL") {
        Ok(level) => normalize_level(&level),
        Err(_) if is_debug_enabled() => "debug",
        Err(_) => "warn",
    }
}

/// Get the configured log format from `SPINDLE_LOG_FORMAT`.
pub fn get_log_format() -> &'static str {
    env::var("SPINDLE_LOG_FORMAT")
        .map(|f| match f.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        })
        .unwrap_or("json")
}

/// Initialize the Spindle logging system from the environment.
///
/// Subsequent calls are no-ops. Nothing is installed unless `SPINDLE_DEBUG`
/// or `SPINDLE_LOG_LEVEL` is set.
pub fn init() {
    if !is_debug_enabled() && env::var("SPINDLE_LOG_LEVEL").is_err() {
        return;
    }
    init_with(get_log_level(), get_log_format());
}

/// Initialize logging from a `[debug]` config table.
pub fn init_from_config(config: &spindle_schema::config::DebugConfig) {
    init_with(normalize_level(&config.log_level), &config.log_format);
}

#[cfg_attr(not(feature = "tracing-subscriber"), allow(unused_variables))]
fn init_with(level: &'static str, format: &str) {
    INIT.call_once(|| {
        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let filter = EnvFilter::try_new(format!(
                "spindle={},spindle_document={},spindle_schema={}",
                level, level, level
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            let installed = match format {
                "pretty" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().pretty())
                    .try_init(),
                "compact" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().compact())
                    .try_init(),
                _ => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().json())
                    .try_init(),
            };

            if installed.is_ok() {
                tracing::info!(level = level, format = format, "Spindle logging initialized");
            }
        }
    });
}

/// Macro for conditional debug logging.
///
/// Only logs if `SPINDLE_DEBUG` is enabled at runtime.
#[macro_export]
macro_rules! spindle_debug {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            tracing::debug!($($arg)*);
        }
    };
}

/// Macro for conditional trace logging.
#[macro_export]
macro_rules! spindle_trace {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            tracing::trace!($($arg)*);
        }
    };
}
