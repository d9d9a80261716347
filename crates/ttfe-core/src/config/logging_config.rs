//! Diagnostic verbosity configuration.

use serde::{Deserialize, Serialize};

/// Verbosity of diagnostic output. Never affects mining results.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 0 = silent, 1 = progress, 2 = details, 3 = everything. Default: 2.
    pub debug_level: Option<i64>,
}
