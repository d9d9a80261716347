//! Component decomposition: mine threat and frequency separately, then
//! combine the two top-K lists under the configured weights.
//!
//! The merge is an approximation. A pattern missing from one component list
//! contributes only the component it was found in, so merged values can
//! undercount and the merged list can miss patterns a direct run would find.

use serde::Serialize;
use ttfe_core::config::RunSettings;
use ttfe_core::errors::MiningError;
use ttfe_core::types::collections::FxHashMap;
use ttfe_core::ItemId;

use crate::corpus::Transaction;
use crate::pipeline::{Miner, MiningOutcome, RunStats};
use crate::results::Pattern;

/// Both component runs and their merge.
#[derive(Debug, Clone, Serialize)]
pub struct Decomposition {
    /// Run with weights `(1, 0)`.
    pub threat: MiningOutcome,
    /// Run with weights `(0, 1)`.
    pub frequency: MiningOutcome,
    pub merged: MiningOutcome,
}

/// Runs the two component mines side by side.
#[derive(Debug, Clone)]
pub struct Decomposer {
    settings: RunSettings,
}

impl Decomposer {
    pub fn new(settings: RunSettings) -> Self {
        Self { settings }
    }

    pub fn run(&self, transactions: &[Transaction]) -> Result<Decomposition, MiningError> {
        // A seed is a bound on combined values; it says nothing about either
        // component on its own.
        let mut component = self.settings.clone();
        component.strategies.seed = false;
        let threat_miner = Miner::new(component.with_weights(1.0, 0.0));
        let frequency_miner = Miner::new(component.with_weights(0.0, 1.0));

        let (threat, frequency) = rayon::join(
            || threat_miner.run(transactions),
            || frequency_miner.run(transactions),
        );
        let (threat, frequency) = (threat?, frequency?);
        let merged = merge(&self.settings, &threat, &frequency);
        tracing::info!(
            threat_patterns = threat.patterns.len(),
            frequency_patterns = frequency.patterns.len(),
            merged_patterns = merged.patterns.len(),
            "decomposition merged"
        );
        Ok(Decomposition {
            threat,
            frequency,
            merged,
        })
    }
}

/// Combine two component outcomes into one weighted top-K list.
pub fn merge(
    settings: &RunSettings,
    threat: &MiningOutcome,
    frequency: &MiningOutcome,
) -> MiningOutcome {
    let (alpha, beta) = (settings.alpha, settings.beta);
    let mut combined: FxHashMap<Vec<ItemId>, f64> = FxHashMap::default();
    for pattern in &threat.patterns {
        *combined.entry(pattern.canonical_items()).or_default() += alpha * pattern.value;
    }
    for pattern in &frequency.patterns {
        *combined.entry(pattern.canonical_items()).or_default() += beta * pattern.value;
    }

    let mut patterns: Vec<Pattern> = combined
        .into_iter()
        .map(|(items, value)| Pattern::new(items, value))
        .collect();
    patterns.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.items.cmp(&b.items)));
    patterns.truncate(settings.top_k);

    let final_delta = match (threat.final_delta, frequency.final_delta) {
        (Some(t), Some(f)) => Some(alpha * t + beta * f),
        _ => None,
    };

    let mut raises = threat.raises.clone();
    raises.extend(frequency.raises.iter().cloned());
    let mut diagnostics = threat.diagnostics.clone();
    diagnostics.extend(frequency.diagnostics.iter().cloned());

    MiningOutcome {
        patterns,
        initial_delta: None,
        final_delta,
        raises,
        stats: combine_stats(&threat.stats, &frequency.stats),
        diagnostics,
    }
}

fn combine_stats(a: &RunStats, b: &RunStats) -> RunStats {
    let mut search = a.search;
    search.nodes += b.search.nodes;
    search.joins += b.search.joins;
    search.aborted_joins += b.search.aborted_joins;
    search.cooccurrence_skips += b.search.cooccurrence_skips;
    search.pruned_nodes += b.search.pruned_nodes;
    search.saved += b.search.saved;
    search.queue_raises += b.search.queue_raises;
    RunStats {
        elapsed: a.elapsed.max(b.elapsed),
        peak_memory_mb: match (a.peak_memory_mb, b.peak_memory_mb) {
            (Some(x), Some(y)) => Some(x.max(y)),
            (x, y) => x.or(y),
        },
        transaction_count: a.transaction_count,
        items_before_pruning: a.items_before_pruning,
        items_after_pruning: a.items_after_pruning.max(b.items_after_pruning),
        table_cells: a.table_cells + b.table_cells,
        cooccurrence_cells: a.cooccurrence_cells + b.cooccurrence_cells,
        search,
    }
}
