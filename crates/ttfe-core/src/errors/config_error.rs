//! Configuration errors.

use super::error_code::{self, TtfeErrorCode};

/// Errors that can occur while loading configuration files.
///
/// Out-of-range parameter values are not errors: resolution substitutes
/// defaults and reports a `ParameterSubstitution` instead.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },
}

impl TtfeErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
