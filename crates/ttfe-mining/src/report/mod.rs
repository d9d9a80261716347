//! Result reports: output formats and path templating.

pub mod json;
pub mod template;
pub mod text;
pub mod writer;

use serde::Serialize;
use ttfe_core::config::{ReportFormat, RunSettings};
use ttfe_core::errors::ReportError;

use crate::pipeline::MiningOutcome;

pub use json::JsonReporter;
pub use template::render_path;
pub use text::TextReporter;
pub use writer::ReportWriter;

/// Everything a report shows.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReportContext<'a> {
    pub settings: &'a RunSettings,
    pub outcome: &'a MiningOutcome,
    /// Extra line shown under the header, e.g. for approximate results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'a str>,
}

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, report: &ReportContext<'_>) -> Result<String, ReportError>;
}

/// Create a reporter for `format`.
pub fn create_reporter(format: ReportFormat) -> Box<dyn Reporter> {
    match format {
        ReportFormat::Text => Box::new(TextReporter),
        ReportFormat::Json => Box::new(JsonReporter),
    }
}
