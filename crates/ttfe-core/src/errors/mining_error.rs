//! Run-level errors.

use super::error_code::{self, TtfeErrorCode};
use super::{ConfigError, DatasetError, ReportError};

/// Errors that abort a mining run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum MiningError {
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Mining run cancelled")]
    Cancelled,
}

impl TtfeErrorCode for MiningError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Dataset(e) => e.error_code(),
            Self::Report(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
