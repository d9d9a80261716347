//! Error handling for TTFE.
//! One error enum per subsystem, `thiserror` only. Non-fatal problems are
//! collected as [`Diagnostic`]s, never raised.

pub mod config_error;
pub mod dataset_error;
pub mod diagnostic;
pub mod error_code;
pub mod mining_error;
pub mod report_error;

pub use config_error::ConfigError;
pub use dataset_error::DatasetError;
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error_code::TtfeErrorCode;
pub use mining_error::MiningError;
pub use report_error::ReportError;
