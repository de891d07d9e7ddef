//! Logging bootstrap.
//!
//! Structured logging via `tracing`, controlled by environment variables:
//!
//! - `AISLE_LOG_LEVEL=trace|debug|info|warn|error` — level filter
//!   (default: `warn`)
//! - `AISLE_LOG_FORMAT=pretty|compact` — output format (default: `compact`)
//!
//! Query services log criteria at `debug`; the mirror logs consistency
//! gaps at `warn`.
//!
//! ```rust,no_run
//! // Initialize once at startup.
//! aisle::logging::init();
//! ```

use std::env;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// The configured log level from `AISLE_LOG_LEVEL`, defaulting to `warn`.
pub fn log_level() -> &'static str {
    match env::var("AISLE_LOG_LEVEL").as_deref() {
        Ok("trace") => "trace",
        Ok("debug") => "debug",
        Ok("info") => "info",
        Ok("error") => "error",
        _ => "warn",
    }
}

/// The configured log format from `AISLE_LOG_FORMAT`, defaulting to
/// `compact`.
pub fn log_format() -> &'static str {
    match env::var("AISLE_LOG_FORMAT").as_deref() {
        Ok("pretty") => "pretty",
        _ => "compact",
    }
}

/// Initialize the global `tracing` subscriber from the environment.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("AISLE_LOG_LEVEL")
            .unwrap_or_else(|_| EnvFilter::new(log_level()));
        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        // Ignore failure when a subscriber is already installed (tests).
        let result = match log_format() {
            "pretty" => builder.pretty().try_init(),
            _ => builder.compact().try_init(),
        };
        let _ = result;
    });
}

/// Initialize with an explicit level, ignoring the environment.
pub fn init_with_level(level: &str) {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(level))
            .compact()
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // The variables are unset in the test environment.
        if env::var("AISLE_LOG_LEVEL").is_err() {
            assert_eq!(log_level(), "warn");
        }
        if env::var("AISLE_LOG_FORMAT").is_err() {
            assert_eq!(log_format(), "compact");
        }
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
