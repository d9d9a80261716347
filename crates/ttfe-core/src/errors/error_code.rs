//! TtfeErrorCode trait for structured error reporting.

/// Trait for attaching a stable code string to TTFE errors.
/// Every error enum implements this so callers (CLI exit paths, logs) can
/// match on a code instead of a message.
pub trait TtfeErrorCode {
    /// Returns the error code string (e.g., "DATASET_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const DATASET_NOT_FOUND: &str = "DATASET_NOT_FOUND";
pub const DATASET_ERROR: &str = "DATASET_ERROR";
pub const REPORT_ERROR: &str = "REPORT_ERROR";
pub const CANCELLED: &str = "CANCELLED";
