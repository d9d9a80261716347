//! Threshold-raising and search-pruning switches.

use serde::{Deserialize, Serialize};

/// Strategy switches. Each unset switch takes its default at resolution.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct StrategyConfig {
    /// Use the configured `delta` as the initial threshold. Default: false.
    pub seed: Option<bool>,
    /// Raise from the K-th largest single-item realized value. Default: true.
    pub realized_value: Option<bool>,
    /// Raise from exact short-run cells of the pruning table. Default: true.
    pub pairwise_exact: Option<bool>,
    /// Raise from lower-bound estimates over longer runs. Default: false.
    pub pairwise_lower_bound: Option<bool>,
    /// Prune search subtrees and joins against the live threshold. Default: true.
    pub prune_search: Option<bool>,
    /// Feed the result queue minimum back into the threshold. Default: true.
    pub queue_feedback: Option<bool>,
    /// Skip joins whose pairwise co-occurrence bound is below the threshold.
    /// Default: false.
    pub cooccurrence_pruning: Option<bool>,
}

impl StrategyConfig {
    /// Set the `index`-th positional switch (`switches0`..`switches5`).
    /// Returns false for an index outside the six positional switches.
    pub fn set_positional(&mut self, index: usize, value: bool) -> bool {
        let slot = match index {
            0 => &mut self.seed,
            1 => &mut self.realized_value,
            2 => &mut self.pairwise_exact,
            3 => &mut self.pairwise_lower_bound,
            4 => &mut self.prune_search,
            5 => &mut self.queue_feedback,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Overlay every switch that `other` sets.
    pub fn merge_from(&mut self, other: &StrategyConfig) {
        if other.seed.is_some() {
            self.seed = other.seed;
        }
        if other.realized_value.is_some() {
            self.realized_value = other.realized_value;
        }
        if other.pairwise_exact.is_some() {
            self.pairwise_exact = other.pairwise_exact;
        }
        if other.pairwise_lower_bound.is_some() {
            self.pairwise_lower_bound = other.pairwise_lower_bound;
        }
        if other.prune_search.is_some() {
            self.prune_search = other.prune_search;
        }
        if other.queue_feedback.is_some() {
            self.queue_feedback = other.queue_feedback;
        }
        if other.cooccurrence_pruning.is_some() {
            self.cooccurrence_pruning = other.cooccurrence_pruning;
        }
    }
}
