//! Corpus index: transaction totals, per-item bounds and realized values.

use std::cmp::Ordering;

use ttfe_core::constants::TOTAL_CHECK_TOLERANCE;
use ttfe_core::errors::{Diagnostic, DiagnosticKind};
use ttfe_core::types::collections::FxHashMap;
use ttfe_core::{ItemId, TransactionId};

use super::pruned::{PrunedCorpus, PrunedTransaction, RankedValue};
use super::types::Transaction;
use crate::threshold::Threshold;
use crate::value::Weights;

/// Per-item aggregates over the whole corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ItemStats {
    /// Sum of total values of transactions containing the item.
    bound: f64,
    /// Sum of the item's own values.
    realized: f64,
}

/// Transactions plus the aggregates every later stage reads.
///
/// Items are ordered ascending by transaction-weighted bound, ties by id.
/// That order is fixed for the run.
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    weights: Weights,
    transactions: Vec<Transaction>,
    totals: Vec<f64>,
    stats: FxHashMap<ItemId, ItemStats>,
    order: Vec<ItemId>,
}

impl CorpusIndex {
    /// Index `transactions` under `weights`. Empty transactions are dropped.
    pub fn load(transactions: Vec<Transaction>, weights: Weights) -> Self {
        let transactions: Vec<Transaction> =
            transactions.into_iter().filter(|t| !t.is_empty()).collect();

        let mut totals = Vec::with_capacity(transactions.len());
        let mut stats: FxHashMap<ItemId, ItemStats> = FxHashMap::default();
        for tx in &transactions {
            let total = tx.total_value(&weights);
            totals.push(total);
            for occurrence in &tx.occurrences {
                let entry = stats.entry(occurrence.item).or_default();
                entry.bound += total;
                entry.realized += weights.value(occurrence);
            }
        }

        let mut order: Vec<ItemId> = stats.keys().copied().collect();
        order.sort_by(|a, b| {
            let (sa, sb) = (&stats[a], &stats[b]);
            sa.bound
                .partial_cmp(&sb.bound)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.cmp(b))
        });

        tracing::debug!(
            transaction_count = transactions.len(),
            item_count = order.len(),
            "corpus indexed"
        );

        Self {
            weights,
            transactions,
            totals,
            stats,
            order,
        }
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn item_count(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Total value of the `tid`-th transaction.
    pub fn total_value(&self, tid: TransactionId) -> Option<f64> {
        self.totals.get(tid.inner() as usize).copied()
    }

    /// Upper bound on the value of any pattern containing `item`.
    /// Zero for unknown items.
    pub fn transaction_weighted_bound(&self, item: ItemId) -> f64 {
        self.stats.get(&item).map_or(0.0, |s| s.bound)
    }

    /// Exact value of the single-item pattern `{item}`.
    pub fn realized_value(&self, item: ItemId) -> f64 {
        self.stats.get(&item).map_or(0.0, |s| s.realized)
    }

    /// The global item order: ascending bound, ties by id.
    pub fn items_ordered_by_bound(&self) -> &[ItemId] {
        &self.order
    }

    /// Realized values of all items, largest first.
    pub fn realized_values_descending(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self.stats.values().map(|s| s.realized).collect();
        values.sort_by(|a, b| b.total_cmp(a));
        values
    }

    /// Value of an arbitrary itemset, by scanning every transaction.
    /// Used for cross-checks and component decomposition, never by the search.
    pub fn pattern_value(&self, items: &[ItemId]) -> f64 {
        self.pattern_value_with(items, &self.weights)
    }

    /// Like [`pattern_value`](Self::pattern_value) under other weights.
    pub fn pattern_value_with(&self, items: &[ItemId], weights: &Weights) -> f64 {
        if items.is_empty() {
            return 0.0;
        }
        let mut value = 0.0;
        for tx in &self.transactions {
            let mut sum = 0.0;
            let mut supported = true;
            for item in items {
                match tx.occurrence(*item) {
                    Some(o) => sum += weights.value(o),
                    None => {
                        supported = false;
                        break;
                    }
                }
            }
            if supported {
                value += sum;
            }
        }
        value
    }

    /// Compare declared transaction totals with recomputed ones.
    /// The recomputed value is always the one used.
    pub fn check_declared_totals(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for (tx, total) in self.transactions.iter().zip(&self.totals) {
            let Some(declared) = tx.declared_total else {
                continue;
            };
            if (declared - total).abs() > TOTAL_CHECK_TOLERANCE * total.abs().max(1.0) {
                let message =
                    format!("declared total {declared} differs from recomputed {total}");
                let diagnostic = match tx.line {
                    Some(line) => Diagnostic::at_line(DiagnosticKind::TotalMismatch, line, message),
                    None => Diagnostic::new(DiagnosticKind::TotalMismatch, message),
                };
                diagnostics.push(diagnostic);
            }
        }
        diagnostics
    }

    /// Drop every item whose bound is below `threshold` and re-derive each
    /// transaction with only surviving items, sorted by the global order.
    /// Transactions left empty are dropped.
    pub fn prune(&self, threshold: &Threshold) -> PrunedCorpus {
        let items: Vec<ItemId> = self
            .order
            .iter()
            .copied()
            .filter(|item| !threshold.prunes(self.stats[item].bound))
            .collect();
        let rank: FxHashMap<ItemId, usize> =
            items.iter().enumerate().map(|(r, item)| (*item, r)).collect();

        let mut transactions = Vec::with_capacity(self.transactions.len());
        for (tid, tx) in self.transactions.iter().enumerate() {
            let mut entries: Vec<RankedValue> = tx
                .occurrences
                .iter()
                .filter_map(|o| {
                    rank.get(&o.item).map(|&r| RankedValue {
                        rank: r,
                        value: self.weights.value(o),
                    })
                })
                .collect();
            if entries.is_empty() {
                continue;
            }
            entries.sort_by_key(|e| e.rank);
            transactions.push(PrunedTransaction {
                tid: TransactionId(tid as u32),
                entries,
            });
        }

        PrunedCorpus::new(items, transactions)
    }
}
