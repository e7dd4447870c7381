//! Structured logging setup for tinyjib
//!
//! Initializes a `tracing` subscriber once per process. Resolution code only
//! emits events through the `tracing` macros; the binary decides where they go.
//!
//! ```no_run
//! use tinyjib::util::logging;
//!
//! // TINYJIB_LOG_LEVEL=debug TINYJIB_LOG_JSON=true
//! logging::init_from_env();
//! tracing::info!(project = "demo", "Planning containerization");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_LEVEL_ENV: &str = "TINYJIB_LOG_LEVEL";
pub const LOG_JSON_ENV: &str = "TINYJIB_LOG_JSON";

static INIT: Once = Once::new();

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for events emitted by this crate
    pub level: Level,

    /// One JSON object per event instead of the human-readable format
    pub use_json: bool,

    pub include_target: bool,

    /// File and line of the emitting call site
    pub include_location: bool,

    pub include_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// JSON output with call-site metadata, for CI logs and log collectors.
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
            include_thread_ids: true,
        }
    }

    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            ..Default::default()
        }
    }
}

/// Parses a level name case-insensitively, falling back to INFO.
///
/// ```
/// use tinyjib::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("Debug"), Level::DEBUG);
/// assert_eq!(parse_level("loud"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn build_filter(level: Level) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match format!("tinyjib={}", level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids),
                )
                .init();
        }
    });
}

pub fn init_default() {
    init_logging(LoggingConfig::default());
}

/// Reads `TINYJIB_LOG_LEVEL` and `TINYJIB_LOG_JSON`. `RUST_LOG` still applies
/// for per-target filtering.
pub fn init_from_env() {
    let level_str = env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string());

    let use_json = env::var(LOG_JSON_ENV)
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    init_logging(LoggingConfig {
        level: parse_level(&level_str),
        use_json,
        ..Default::default()
    });
}

pub fn with_level(level_str: &str) {
    init_logging(LoggingConfig::with_level(parse_level(level_str)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("info"), Level::INFO);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
    }

    #[test]
    fn test_parse_level_case_insensitive() {
        assert_eq!(parse_level("TRACE"), Level::TRACE);
        assert_eq!(parse_level("Warn"), Level::WARN);
    }

    #[test]
    fn test_parse_level_invalid() {
        assert_eq!(parse_level("verbose"), Level::INFO);
        assert_eq!(parse_level(""), Level::INFO);
    }

    #[test]
    fn test_presets() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
        assert!(config.include_target);

        let config = LoggingConfig::production();
        assert!(config.use_json);
        assert!(config.include_location);

        let config = LoggingConfig::development();
        assert_eq!(config.level, Level::DEBUG);
        assert!(!config.use_json);
        assert!(!config.include_thread_ids);
    }

    #[test]
    fn test_filter_carries_crate_directive() {
        let filter = build_filter(Level::DEBUG);
        assert!(filter.to_string().contains("tinyjib=debug"));
    }
}
