//! Dataset input errors.

use super::error_code::{self, TtfeErrorCode};

/// Hard failures while reading a transaction file.
///
/// Malformed lines are diagnostics, not errors; only an unreadable input
/// aborts a run.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Input file not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read {path}: {message}")]
    Unreadable { path: String, message: String },
}

impl TtfeErrorCode for DatasetError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::DATASET_NOT_FOUND,
            Self::Unreadable { .. } => error_code::DATASET_ERROR,
        }
    }
}
