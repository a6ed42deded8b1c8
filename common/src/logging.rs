//! Structured logging initialization
//!
//! Provides consistent logging initialization across all toolbelt binaries.
//! Logs are written to stderr so stdout stays free for machine-readable output.

use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::ConfigExt;

/// Guard that keeps the tracing subscriber active.
/// Drop this at the end of main to flush logs.
pub struct LogGuard;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Read the format from `LOG_FORMAT` ("json" selects JSON, anything else text).
    pub fn from_env() -> Self {
        Self::parse(&String::env_or("LOG_FORMAT", "text"))
    }

    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Build the level filter: `RUST_LOG` directives when set and valid, INFO otherwise.
fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Initialize structured logging for a component.
///
/// Returns a guard that should be held for the lifetime of the program.
/// `RUST_LOG` replaces the default INFO level in either direction.
///
/// # Example
/// ```ignore
/// let _guard = init_logging("registry-prune");
/// info!("Starting up...");
/// ```
pub fn init_logging(component: &str) -> LogGuard {
    let filter = env_filter(String::env_opt("RUST_LOG").as_deref());

    let layer = match LogFormat::from_env() {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(io::stderr)
            .with_target(false)
            .boxed(),
        LogFormat::Text => fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .init();

    tracing::debug!(component, "Logging initialized");

    LogGuard
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("text"), LogFormat::Text);
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
    }

    #[test]
    fn test_rust_log_can_lower_the_level() {
        let filter = env_filter(Some("warn"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_rust_log_can_raise_the_level() {
        let filter = env_filter(Some("debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_default_level_is_info() {
        assert_eq!(env_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(env_filter(Some("")).max_level_hint(), Some(LevelFilter::INFO));
    }
}
