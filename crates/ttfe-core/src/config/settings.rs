//! Fully resolved run settings.

use serde::{Deserialize, Serialize};

use super::output_config::ReportFormat;
use crate::constants::{
    DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_DATABASE, DEFAULT_DEBUG_LEVEL, DEFAULT_OUTPUT_TEMPLATE,
    DEFAULT_TOP_K, SWITCH_COUNT,
};
use crate::errors::{Diagnostic, DiagnosticKind};

/// Resolved strategy switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyFlags {
    pub seed: bool,
    pub realized_value: bool,
    pub pairwise_exact: bool,
    pub pairwise_lower_bound: bool,
    pub prune_search: bool,
    pub queue_feedback: bool,
    pub cooccurrence_pruning: bool,
}

impl Default for StrategyFlags {
    fn default() -> Self {
        Self {
            seed: false,
            realized_value: true,
            pairwise_exact: true,
            pairwise_lower_bound: false,
            prune_search: true,
            queue_feedback: true,
            cooccurrence_pruning: false,
        }
    }
}

impl StrategyFlags {
    /// Every raising strategy and every pruning rule switched off.
    pub fn exhaustive() -> Self {
        Self {
            seed: false,
            realized_value: false,
            pairwise_exact: false,
            pairwise_lower_bound: false,
            prune_search: false,
            queue_feedback: false,
            cooccurrence_pruning: false,
        }
    }

    /// The six positional switches in `switches0..switches5` order.
    pub fn switches(&self) -> [bool; SWITCH_COUNT] {
        [
            self.seed,
            self.realized_value,
            self.pairwise_exact,
            self.pairwise_lower_bound,
            self.prune_search,
            self.queue_feedback,
        ]
    }
}

/// Everything a mining run needs, with no optional parameters left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    pub database: String,
    pub top_k: usize,
    pub alpha: f64,
    pub beta: f64,
    /// Seed threshold; `None` is the "no information" sentinel.
    pub delta: Option<f64>,
    pub strategies: StrategyFlags,
    pub debug_level: u8,
    pub output_path: String,
    pub format: ReportFormat,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            top_k: DEFAULT_TOP_K,
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            delta: None,
            strategies: StrategyFlags::default(),
            debug_level: DEFAULT_DEBUG_LEVEL,
            output_path: DEFAULT_OUTPUT_TEMPLATE.to_string(),
            format: ReportFormat::Text,
        }
    }
}

impl RunSettings {
    /// Threshold the run starts from: the seed if seeding is enabled.
    pub fn initial_delta(&self) -> Option<f64> {
        if self.strategies.seed {
            self.delta
        } else {
            None
        }
    }

    /// Copy with different weights, for decomposition and sweeps.
    pub fn with_weights(&self, alpha: f64, beta: f64) -> Self {
        Self {
            alpha,
            beta,
            ..self.clone()
        }
    }

    /// Copy with a different result-set size.
    pub fn with_top_k(&self, top_k: usize) -> Self {
        Self {
            top_k,
            ..self.clone()
        }
    }
}

/// A parameter that was out of range and replaced by its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSubstitution {
    pub field: String,
    pub given: String,
    pub substituted: String,
}

impl ParameterSubstitution {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(
            DiagnosticKind::ParameterSubstituted,
            format!(
                "{} = {} is out of range, using {}",
                self.field, self.given, self.substituted
            ),
        )
    }
}

/// Output of best-effort resolution.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub settings: RunSettings,
    pub substitutions: Vec<ParameterSubstitution>,
}
