//! Process-wide helpers for the tinyjib binary and library users

pub mod logging;

pub use logging::{init_default, init_from_env, init_logging, LoggingConfig};
