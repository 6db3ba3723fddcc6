//! Utility modules for football-etl

pub mod logging;

pub use logging::{init_logging, parse_level, LoggingConfig};
