//! Writes a rendered report to disk.

use std::path::{Path, PathBuf};

use ttfe_core::config::{ReportFormat, RunSettings};
use ttfe_core::errors::ReportError;

use super::{create_reporter, render_path, ReportContext};
use crate::pipeline::MiningOutcome;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportWriter {
    format: ReportFormat,
}

impl ReportWriter {
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Render without writing.
    pub fn render(
        &self,
        settings: &RunSettings,
        outcome: &MiningOutcome,
        note: Option<&str>,
    ) -> Result<String, ReportError> {
        let report = ReportContext {
            settings,
            outcome,
            note,
        };
        create_reporter(self.format).generate(&report)
    }

    /// Render and write to the path `settings.output_path` expands to.
    /// Missing parent directories are created.
    pub fn write(
        &self,
        settings: &RunSettings,
        outcome: &MiningOutcome,
        note: Option<&str>,
    ) -> Result<PathBuf, ReportError> {
        let path = PathBuf::from(render_path(&settings.output_path, settings));
        self.write_to(&path, settings, outcome, note)
    }

    /// Render and write to an explicit path.
    pub fn write_to(
        &self,
        path: &Path,
        settings: &RunSettings,
        outcome: &MiningOutcome,
        note: Option<&str>,
    ) -> Result<PathBuf, ReportError> {
        let content = self.render(settings, outcome, note)?;
        write_file(path, &content)?;
        tracing::info!(path = %path.display(), format = ?self.format, "report written");
        Ok(path.to_path_buf())
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ReportError> {
    let to_error = |e: std::io::Error| ReportError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, content).map_err(to_error)
}
