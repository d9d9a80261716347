//! Advisory diagnostics for recovered input problems.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a recovered problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A `key=value` line whose value could not be parsed.
    MalformedDirective,
    /// A `key=value` line with an unrecognized key.
    UnknownDirective,
    /// A data line without the required fields.
    MalformedLine,
    /// A single occurrence that could not be parsed.
    MalformedOccurrence,
    /// An item repeated inside one transaction.
    DuplicateItem,
    /// Declared transaction total disagrees with the recomputed one.
    TotalMismatch,
    /// An out-of-range parameter replaced by its default.
    ParameterSubstituted,
    /// A config file that could not be read or parsed.
    ConfigFileSkipped,
}

impl DiagnosticKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MalformedDirective => "malformed_directive",
            Self::UnknownDirective => "unknown_directive",
            Self::MalformedLine => "malformed_line",
            Self::MalformedOccurrence => "malformed_occurrence",
            Self::DuplicateItem => "duplicate_item",
            Self::TotalMismatch => "total_mismatch",
            Self::ParameterSubstituted => "parameter_substituted",
            Self::ConfigFileSkipped => "config_file_skipped",
        }
    }
}

/// One recovered problem, with the input line it came from when known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            line: None,
            message: message.into(),
        }
    }

    pub fn at_line(kind: DiagnosticKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line: Some(line),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {} ({})", line, self.message, self.kind.name()),
            None => write!(f, "{} ({})", self.message, self.kind.name()),
        }
    }
}
