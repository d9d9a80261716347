//! JSON reporter.

use ttfe_core::errors::ReportError;

use super::{ReportContext, Reporter};

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, report: &ReportContext<'_>) -> Result<String, ReportError> {
        serde_json::to_string_pretty(report).map_err(|e| ReportError::Serialize {
            message: e.to_string(),
        })
    }
}
