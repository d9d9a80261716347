//! Transactions re-derived after item-level pruning.

use ttfe_core::types::collections::FxHashMap;
use ttfe_core::{ItemId, TransactionId};

/// An occurrence of a surviving item, identified by its rank in the
/// surviving global order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedValue {
    pub rank: usize,
    pub value: f64,
}

/// A transaction holding only surviving items, sorted by rank.
#[derive(Debug, Clone, PartialEq)]
pub struct PrunedTransaction {
    pub tid: TransactionId,
    pub entries: Vec<RankedValue>,
}

impl PrunedTransaction {
    pub fn total_value(&self) -> f64 {
        self.entries.iter().map(|e| e.value).sum()
    }
}

/// The corpus restricted to items whose bound reached the threshold.
#[derive(Debug, Clone, Default)]
pub struct PrunedCorpus {
    items: Vec<ItemId>,
    ranks: FxHashMap<ItemId, usize>,
    transactions: Vec<PrunedTransaction>,
}

impl PrunedCorpus {
    pub fn new(items: Vec<ItemId>, transactions: Vec<PrunedTransaction>) -> Self {
        let ranks = items.iter().enumerate().map(|(r, item)| (*item, r)).collect();
        Self {
            items,
            ranks,
            transactions,
        }
    }

    /// Surviving items in the global order; index = rank.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn item_at(&self, rank: usize) -> Option<ItemId> {
        self.items.get(rank).copied()
    }

    pub fn rank_of(&self, item: ItemId) -> Option<usize> {
        self.ranks.get(&item).copied()
    }

    pub fn transactions(&self) -> &[PrunedTransaction] {
        &self.transactions
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
