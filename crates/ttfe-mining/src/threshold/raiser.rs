//! Threshold-raising strategies.
//!
//! Every strategy feeds one shared [`TopKAccumulator`]. Each pushed value is
//! a lower bound on the value of a pattern no other pushed value describes,
//! so the accumulator floor is a valid threshold once it holds K values.

use std::fmt;

use serde::Serialize;
use ttfe_core::constants::MAX_MIDDLE_REMOVALS;

use super::{Threshold, TopKAccumulator};
use crate::corpus::CorpusIndex;
use crate::table::PruningTable;

/// Largest run span (last rank minus first rank) treated as exact input.
/// Span 1 is the diagonal, span 2 the first off-diagonal band.
pub const EXACT_BAND_SPAN: usize = 2;

/// Source of a threshold increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RaiseStrategy {
    Seed,
    RealizedValue,
    PairwiseExact,
    PairwiseLowerBound,
    ResultQueue,
}

impl RaiseStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Seed => "seed",
            Self::RealizedValue => "realized_value",
            Self::PairwiseExact => "pairwise_exact",
            Self::PairwiseLowerBound => "pairwise_lower_bound",
            Self::ResultQueue => "result_queue",
        }
    }
}

impl fmt::Display for RaiseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one strategy run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaiseRecord {
    pub strategy: RaiseStrategy,
    /// Candidates the strategy kept in the shared pool.
    pub candidates: usize,
    pub before: Option<f64>,
    pub after: Option<f64>,
    /// The strategy's input structure was empty.
    pub skipped: bool,
}

impl RaiseRecord {
    pub fn raised(&self) -> bool {
        self.after != self.before
    }
}

/// Owns the working threshold until the search takes over.
#[derive(Debug, Clone)]
pub struct ThresholdRaiser {
    threshold: Threshold,
    pool: TopKAccumulator,
    history: Vec<RaiseRecord>,
}

impl ThresholdRaiser {
    pub fn new(top_k: usize) -> Self {
        Self {
            threshold: Threshold::default(),
            pool: TopKAccumulator::new(top_k),
            history: Vec::new(),
        }
    }

    /// `delta = max(delta, candidate)`; never lowers it.
    pub fn raise(&mut self, candidate: f64) -> bool {
        self.threshold.raise(candidate)
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn history(&self) -> &[RaiseRecord] {
        &self.history
    }

    pub fn into_parts(self) -> (Threshold, Vec<RaiseRecord>) {
        (self.threshold, self.history)
    }

    /// Strategy 1: adopt an externally supplied threshold.
    pub fn seed(&mut self, seed: Option<f64>) -> &RaiseRecord {
        let before = self.threshold.value();
        match seed {
            Some(value) => {
                self.raise(value);
                self.record(RaiseStrategy::Seed, before, 0, false)
            }
            None => self.record(RaiseStrategy::Seed, before, 0, true),
        }
    }

    /// Strategy 2: every single item is a pattern, so the K-th largest
    /// realized value bounds the K-th best pattern.
    pub fn raise_from_realized_values(&mut self, corpus: &CorpusIndex) -> &RaiseRecord {
        let before = self.threshold.value();
        if corpus.item_count() == 0 {
            return self.record(RaiseStrategy::RealizedValue, before, 0, true);
        }
        let mut kept = 0;
        for value in corpus.realized_values_descending() {
            if !self.offer(value) {
                // sorted descending: nothing later can be kept either
                break;
            }
            kept += 1;
        }
        self.settle();
        self.record(RaiseStrategy::RealizedValue, before, kept, false)
    }

    /// Strategy 3: diagonal and first-band cells are exact values of short
    /// runs.
    pub fn raise_from_pairwise_exact(&mut self, table: &PruningTable) -> &RaiseRecord {
        let before = self.threshold.value();
        if table.is_empty() {
            return self.record(RaiseStrategy::PairwiseExact, before, 0, true);
        }
        let mut kept = 0;
        for cell in table.band(EXACT_BAND_SPAN) {
            if self.offer(cell.value) {
                kept += 1;
            }
        }
        self.settle();
        self.record(RaiseStrategy::PairwiseExact, before, kept, false)
    }

    /// Strategy 4: longer runs, plus estimates for the patterns obtained by
    /// removing the first one to three middle items of a run. Removing item
    /// `m` loses at most its realized value, so `cell - realized(m)` stays a
    /// lower bound.
    ///
    /// `band_already_pooled` must be true when the pairwise exact pass ran, so that no
    /// run is counted twice.
    pub fn raise_from_pairwise_lower_bound(
        &mut self,
        table: &PruningTable,
        corpus: &CorpusIndex,
        band_already_pooled: bool,
    ) -> &RaiseRecord {
        let before = self.threshold.value();
        if table.is_empty() {
            return self.record(RaiseStrategy::PairwiseLowerBound, before, 0, true);
        }
        let mut kept = 0;
        for cell in table.cells_sorted() {
            let in_band = cell.span() <= EXACT_BAND_SPAN;
            if !(band_already_pooled && in_band) && self.offer(cell.value) {
                kept += 1;
            }

            let mut estimate = cell.value;
            let middles = (cell.first + 1..cell.last).take(MAX_MIDDLE_REMOVALS);
            for rank in middles {
                let Some(item) = table.item_at(rank) else {
                    break;
                };
                estimate -= corpus.realized_value(item);
                if !self.offer(estimate) {
                    break;
                }
                kept += 1;
            }
        }
        self.settle();
        self.record(RaiseStrategy::PairwiseLowerBound, before, kept, false)
    }

    /// Pool a candidate if it is positive and reaches the threshold.
    fn offer(&mut self, value: f64) -> bool {
        value > 0.0 && self.threshold.admits(value) && self.pool.push(value)
    }

    fn settle(&mut self) {
        if let Some(floor) = self.pool.floor() {
            self.raise(floor);
        }
    }

    fn record(
        &mut self,
        strategy: RaiseStrategy,
        before: Option<f64>,
        candidates: usize,
        skipped: bool,
    ) -> &RaiseRecord {
        let record = RaiseRecord {
            strategy,
            candidates,
            before,
            after: self.threshold.value(),
            skipped,
        };
        tracing::debug!(
            strategy = %strategy,
            candidates,
            skipped,
            delta = %self.threshold,
            "threshold strategy finished"
        );
        self.history.push(record);
        &self.history[self.history.len() - 1]
    }
}
