//! Structured logging setup
//!
//! Initialises a `tracing` subscriber that writes to stderr, so stdout stays
//! free for the run report. `RUST_LOG` takes precedence when set; otherwise
//! the crate logs at the configured level and the HTTP, MongoDB and AWS
//! client crates are held at `warn`.

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Crates whose chatter is capped at `warn` unless `RUST_LOG` says otherwise
const NOISY_TARGETS: &[&str] = &[
    "h2",
    "hyper",
    "reqwest",
    "mongodb",
    "aws_config",
    "aws_smithy_runtime",
    "aws_sdk_s3",
];

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format (for log collectors)
    pub use_json: bool,

    /// Include the module target in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
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

    /// Reads `FOOTBALL_ETL_LOG_JSON` on top of the given level
    pub fn from_env(level: Level) -> Self {
        let use_json = env::var("FOOTBALL_ETL_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            use_json,
            include_location: use_json,
            ..Self::with_level(level)
        }
    }
}

/// Parses a log level from a string, falling back to INFO
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

/// Builds the filter applied when `RUST_LOG` is not set
fn default_directives(level: Level) -> Vec<String> {
    let mut directives = vec![format!("football_etl={}", level)];
    directives.extend(NOISY_TARGETS.iter().map(|target| format!("{}=warn", target)));
    directives
}

/// Initializes the logging system; subsequent calls are ignored
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = if env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::try_new(default_directives(config.level).join(","))
                .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()))
        };

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
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
                        .with_line_number(config.include_location),
                )
                .init();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

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
        assert_eq!(parse_level("Debug"), Level::DEBUG);
    }

    #[test]
    fn test_parse_level_invalid() {
        assert_eq!(parse_level("invalid"), Level::INFO);
        assert_eq!(parse_level(""), Level::INFO);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
        assert!(config.include_target);
        assert!(!config.include_location);
    }

    #[test]
    fn test_with_level() {
        let config = LoggingConfig::with_level(Level::DEBUG);
        assert_eq!(config.level, Level::DEBUG);
        assert!(!config.use_json);
    }

    #[test]
    #[serial]
    fn test_from_env_json_output() {
        env::set_var("FOOTBALL_ETL_LOG_JSON", "true");
        let config = LoggingConfig::from_env(Level::WARN);
        env::remove_var("FOOTBALL_ETL_LOG_JSON");

        assert_eq!(config.level, Level::WARN);
        assert!(config.use_json);
        assert!(config.include_location);
        assert!(config.include_target);
    }

    #[test]
    #[serial]
    fn test_from_env_defaults_to_plain_text() {
        env::set_var("FOOTBALL_ETL_LOG_JSON", "not-a-bool");
        let config = LoggingConfig::from_env(Level::DEBUG);
        env::remove_var("FOOTBALL_ETL_LOG_JSON");

        assert_eq!(config.level, Level::DEBUG);
        assert!(!config.use_json);
        assert!(!config.include_location);
    }

    #[test]
    fn test_default_directives_parse() {
        let directives = default_directives(Level::DEBUG);
        assert_eq!(directives[0], "football_etl=DEBUG");
        assert!(directives.contains(&"reqwest=warn".to_string()));
        assert!(EnvFilter::try_new(directives.join(",")).is_ok());
    }
}
