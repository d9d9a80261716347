//! Plain-text reporter.

use std::fmt::Write as _;

use ttfe_core::constants::{ALGORITHM_NAME, VERSION};
use ttfe_core::errors::ReportError;

use super::{ReportContext, Reporter};

pub struct TextReporter;

fn fmt_delta(delta: Option<f64>) -> String {
    delta.map_or_else(|| "none".to_string(), |d| d.to_string())
}

impl Reporter for TextReporter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn generate(&self, report: &ReportContext<'_>) -> Result<String, ReportError> {
        let settings = report.settings;
        let outcome = report.outcome;
        let stats = &outcome.stats;
        let switches: Vec<String> = settings
            .strategies
            .switches()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut out = String::new();
        let mut emit = || -> std::fmt::Result {
            writeln!(out, "{ALGORITHM_NAME} {VERSION}")?;
            if let Some(note) = report.note {
                writeln!(out, "Note: {note}")?;
            }
            writeln!(out, "Database: {}", settings.database)?;
            writeln!(out, "TopK: {}", settings.top_k)?;
            writeln!(out, "Alpha: {}", settings.alpha)?;
            writeln!(out, "Beta: {}", settings.beta)?;
            writeln!(out, "Input delta: {}", fmt_delta(settings.delta))?;
            writeln!(out, "Switches: [{}]", switches.join(", "))?;
            writeln!(out, "Debug level: {}", settings.debug_level)?;
            writeln!(out, "Elapsed: {:.3}s", stats.elapsed_secs())?;
            match stats.peak_memory_mb {
                Some(mb) => writeln!(out, "Peak memory: {mb:.2} MB")?,
                None => writeln!(out, "Peak memory: unavailable")?,
            }
            writeln!(out, "Output delta: {}", fmt_delta(outcome.final_delta))?;
            writeln!(out, "Final minimum: {}", fmt_delta(outcome.minimum_value()))?;
            writeln!(out, "Nodes: {}", stats.search.nodes)?;
            writeln!(out, "Patterns: {}", outcome.patterns.len())?;
            for pattern in &outcome.patterns {
                writeln!(out, "{pattern}")?;
            }
            Ok(())
        };
        emit().map_err(|e| ReportError::Serialize {
            message: e.to_string(),
        })?;
        Ok(out)
    }
}
