//! Report output errors.

use super::error_code::{self, TtfeErrorCode};

/// Errors that can occur while writing a result report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to write report to {path}: {message}")]
    Write { path: String, message: String },

    #[error("Failed to serialize report: {message}")]
    Serialize { message: String },
}

impl TtfeErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        error_code::REPORT_ERROR
    }
}
