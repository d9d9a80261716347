//! Mining parameter configuration.

use serde::{Deserialize, Serialize};

/// Core mining parameters. Values are checked only at resolution time, where
/// out-of-range entries fall back to their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MiningConfig {
    /// Number of patterns to return. Default: 5.
    pub top_k: Option<i64>,
    /// Threat weight. Default: 0.5.
    pub alpha: Option<f64>,
    /// Frequency weight. Default: 0.5.
    pub beta: Option<f64>,
    /// Seed threshold. Absent means no information.
    pub delta: Option<f64>,
    /// Database name used in reports and output paths.
    pub database: Option<String>,
}

impl MiningConfig {
    /// If exactly one weight is present, derive the other as `1 - given`.
    pub fn complete_weights(&mut self) {
        complete_weights(&mut self.alpha, &mut self.beta);
    }
}

/// Shared rule for every layer: a lone weight implies its complement.
pub(crate) fn complete_weights(alpha: &mut Option<f64>, beta: &mut Option<f64>) {
    match (*alpha, *beta) {
        (Some(a), None) => *beta = Some(1.0 - a),
        (None, Some(b)) => *alpha = Some(1.0 - b),
        _ => {}
    }
}
