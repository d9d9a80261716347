//! Top-level mining run orchestrator.

use std::time::Instant;

use serde::Serialize;
use ttfe_core::config::RunSettings;
use ttfe_core::errors::{Diagnostic, MiningError};
use ttfe_core::events::types::{
    DiagnosticEvent, ItemsPrunedEvent, RunStartedEvent, SearchCompleteEvent, TableBuiltEvent,
    ThresholdRaisedEvent,
};
use ttfe_core::events::EventDispatcher;
use ttfe_core::CancellationToken;

use super::memory::MemorySampler;
use super::stats::RunStats;
use crate::corpus::{CorpusIndex, Transaction};
use crate::dataset::Dataset;
use crate::results::Pattern;
use crate::search::{build_root_lists, SearchEngine};
use crate::table::{CooccurrenceTable, PruningTable};
use crate::threshold::{RaiseRecord, ThresholdRaiser};
use crate::value::Weights;

/// Everything a finished run produced.
#[derive(Debug, Clone, Serialize)]
pub struct MiningOutcome {
    /// Top-K patterns, best first.
    pub patterns: Vec<Pattern>,
    /// Threshold the run started from.
    pub initial_delta: Option<f64>,
    /// Threshold when the search finished.
    pub final_delta: Option<f64>,
    /// Strategy outcomes, in execution order.
    pub raises: Vec<RaiseRecord>,
    pub stats: RunStats,
    pub diagnostics: Vec<Diagnostic>,
}

impl MiningOutcome {
    /// Value of the weakest returned pattern.
    pub fn minimum_value(&self) -> Option<f64> {
        self.patterns.last().map(|p| p.value)
    }
}

/// One mining run instance. Holds no mutable state between runs, so
/// independent instances can run side by side.
#[derive(Debug, Clone)]
pub struct Miner {
    settings: RunSettings,
    dispatcher: EventDispatcher,
    cancel: CancellationToken,
}

impl Miner {
    pub fn new(settings: RunSettings) -> Self {
        Self {
            settings,
            dispatcher: EventDispatcher::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: EventDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// A handle that cancels this miner's runs.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Mine a parsed dataset; its diagnostics are carried into the outcome.
    pub fn run_dataset(&self, dataset: &Dataset) -> Result<MiningOutcome, MiningError> {
        let mut outcome = self.run(&dataset.transactions)?;
        let mut diagnostics = dataset.diagnostics.clone();
        diagnostics.append(&mut outcome.diagnostics);
        outcome.diagnostics = diagnostics;
        Ok(outcome)
    }

    /// Run the full pipeline over `transactions`.
    pub fn run(&self, transactions: &[Transaction]) -> Result<MiningOutcome, MiningError> {
        let started = Instant::now();
        let mut memory = MemorySampler::new();
        memory.sample();

        let settings = &self.settings;
        let flags = settings.strategies;
        let weights = Weights::from_settings(settings);
        let span = tracing::info_span!("mining_run", database = %settings.database, top_k = settings.top_k);
        let _enter = span.enter();

        // Phase 1: corpus index
        let corpus = CorpusIndex::load(transactions.to_vec(), weights);
        let diagnostics = corpus.check_declared_totals();
        for diagnostic in &diagnostics {
            tracing::warn!(%diagnostic, "transaction total mismatch");
            self.dispatcher.emit_diagnostic(&DiagnosticEvent {
                diagnostic: diagnostic.clone(),
            });
        }
        self.dispatcher.emit_run_started(&RunStartedEvent {
            transaction_count: corpus.transaction_count(),
            item_count: corpus.item_count(),
            top_k: settings.top_k,
        });
        tracing::info!(
            transactions = corpus.transaction_count(),
            items = corpus.item_count(),
            "corpus loaded"
        );

        // Phase 2: seed and realized-value raising
        let mut raiser = ThresholdRaiser::new(settings.top_k);
        if flags.seed {
            let record = raiser.seed(settings.delta).clone();
            self.report_raise(&record);
        }
        let initial_delta = raiser.threshold().value();
        if flags.realized_value {
            let record = raiser.raise_from_realized_values(&corpus).clone();
            self.report_raise(&record);
        }

        // Phase 3: item-level pruning
        let pruned = corpus.prune(&raiser.threshold());
        self.dispatcher.emit_items_pruned(&ItemsPrunedEvent {
            before: corpus.item_count(),
            after: pruned.item_count(),
            delta: raiser.threshold().value(),
        });
        tracing::info!(
            before = corpus.item_count(),
            after = pruned.item_count(),
            delta = %raiser.threshold(),
            "items pruned"
        );

        // Phase 4: pruning table, plus co-occurrence bounds when enabled
        let table = PruningTable::build(pruned.transactions(), pruned.items());
        self.dispatcher.emit_table_built(&TableBuiltEvent {
            item_count: table.item_count(),
            cell_count: table.len(),
        });
        let cooccurrence = if flags.cooccurrence_pruning && flags.prune_search {
            Some(CooccurrenceTable::build(pruned.transactions()))
        } else {
            None
        };

        // Phase 5: table-driven raising
        if flags.pairwise_exact {
            let record = raiser.raise_from_pairwise_exact(&table).clone();
            self.report_raise(&record);
        }
        if flags.pairwise_lower_bound {
            let record = raiser
                .raise_from_pairwise_lower_bound(&table, &corpus, flags.pairwise_exact)
                .clone();
            self.report_raise(&record);
        }

        // Phase 6: search
        let (threshold, raises) = raiser.into_parts();
        let roots = build_root_lists(&pruned);
        let search_started = Instant::now();
        let mut engine = SearchEngine::new(
            settings.top_k,
            threshold,
            flags,
            &self.cancel,
            &self.dispatcher,
        );
        if let Some(ref table) = cooccurrence {
            engine = engine.with_cooccurrence(table);
        }
        let search = engine.run(roots)?;
        let search_ms = search_started.elapsed().as_millis() as u64;
        self.dispatcher.emit_search_complete(&SearchCompleteEvent {
            node_count: search.stats.nodes,
            join_count: search.stats.joins,
            aborted_joins: search.stats.aborted_joins,
            duration_ms: search_ms,
        });
        tracing::info!(
            patterns = search.patterns.len(),
            delta = %search.threshold,
            nodes = search.stats.nodes,
            duration_ms = search_ms,
            "search complete"
        );

        // Phase 7: statistics
        memory.sample();
        let stats = RunStats {
            elapsed: started.elapsed(),
            peak_memory_mb: memory.peak_mb(),
            transaction_count: corpus.transaction_count(),
            items_before_pruning: corpus.item_count(),
            items_after_pruning: pruned.item_count(),
            table_cells: table.len(),
            cooccurrence_cells: cooccurrence.as_ref().map_or(0, CooccurrenceTable::len),
            search: search.stats,
        };

        Ok(MiningOutcome {
            patterns: search.patterns,
            initial_delta,
            final_delta: search.threshold.value(),
            raises,
            stats,
            diagnostics,
        })
    }

    fn report_raise(&self, record: &RaiseRecord) {
        if !record.raised() {
            return;
        }
        if let Some(current) = record.after {
            tracing::debug!(strategy = %record.strategy, current, "threshold raised");
            self.dispatcher.emit_threshold_raised(&ThresholdRaisedEvent {
                source: record.strategy.name(),
                previous: record.before,
                current,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Occurrence;
    use ttfe_core::{Cancellable, ItemId};

    fn scenario() -> Vec<Transaction> {
        vec![
            Transaction::new([
                Occurrence::new(ItemId(1), 2.0, 1.0),
                Occurrence::new(ItemId(2), 1.0, 3.0),
            ]),
            Transaction::new([
                Occurrence::new(ItemId(2), 2.0, 2.0),
                Occurrence::new(ItemId(3), 3.0, 1.0),
            ]),
            Transaction::new([
                Occurrence::new(ItemId(1), 1.0, 1.0),
                Occurrence::new(ItemId(3), 2.0, 2.0),
            ]),
        ]
    }

    #[test]
    fn test_scenario_top_two() {
        let settings = RunSettings {
            top_k: 2,
            ..RunSettings::default()
        };
        let outcome = Miner::new(settings).run(&scenario()).unwrap();
        let values: Vec<f64> = outcome.patterns.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![4.0, 4.0]);
        assert_eq!(outcome.final_delta, Some(4.0));
        assert_eq!(outcome.minimum_value(), Some(4.0));
        assert!(outcome.raises.iter().any(|r| r.raised()));
    }

    #[test]
    fn test_empty_input_keeps_seed() {
        let mut settings = RunSettings::default();
        settings.strategies.seed = true;
        settings.delta = Some(1.5);
        let outcome = Miner::new(settings).run(&[]).unwrap();
        assert!(outcome.patterns.is_empty());
        assert_eq!(outcome.initial_delta, Some(1.5));
        assert_eq!(outcome.final_delta, Some(1.5));
        assert!(outcome.raises.iter().skip(1).all(|r| r.skipped));
    }

    #[test]
    fn test_cancelled_before_search() {
        let miner = Miner::new(RunSettings::default());
        miner.cancellation_token().cancel();
        let err = miner.run(&scenario()).unwrap_err();
        assert!(matches!(err, MiningError::Cancelled));
    }
}
