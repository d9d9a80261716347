//! Report output configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_OUTPUT_TEMPLATE;

/// Report serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Where and how reports are written.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Path template; may contain `{topK}`-style placeholders.
    pub path: Option<String>,
    /// Report format. Default: text.
    pub format: Option<ReportFormat>,
}

impl OutputConfig {
    /// Returns the effective path template.
    pub fn effective_path(&self) -> String {
        self.path
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT_TEMPLATE.to_string())
    }

    /// Returns the effective format, defaulting to text.
    pub fn effective_format(&self) -> ReportFormat {
        self.format.unwrap_or_default()
    }
}
