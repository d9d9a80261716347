//! The pruning table: cumulative values of runs in the global order.
//!
//! Cell `(p, q)` sums, over every transaction holding all surviving items
//! ranked `p..=q`, the values of those items. In a re-ordered pruned
//! transaction such a run is a stretch of consecutive entries with
//! consecutive ranks. A cell therefore equals the exact value of the run
//! pattern `{p..=q}`; for `q = p + 1` it is the adjacent-pair sum.

use ttfe_core::types::collections::FxHashMap;
use ttfe_core::ItemId;

use crate::corpus::PrunedTransaction;

/// One non-empty table cell, addressed by rank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableCell {
    pub first: usize,
    pub last: usize,
    pub value: f64,
}

impl TableCell {
    /// Rank distance between the run's ends; 1 for adjacent pairs.
    pub fn span(&self) -> usize {
        self.last - self.first
    }
}

/// Sparse run table over surviving items.
#[derive(Debug, Clone, Default)]
pub struct PruningTable {
    items: Vec<ItemId>,
    cells: FxHashMap<(usize, usize), f64>,
}

impl PruningTable {
    /// Accumulate every run of consecutive ranks in every transaction.
    /// `transactions` must be rank-sorted over `ordered_items`.
    pub fn build(transactions: &[PrunedTransaction], ordered_items: &[ItemId]) -> Self {
        let mut cells: FxHashMap<(usize, usize), f64> = FxHashMap::default();
        for tx in transactions {
            let entries = &tx.entries;
            for start in 0..entries.len() {
                let mut sum = entries[start].value;
                for end in start + 1..entries.len() {
                    if entries[end].rank != entries[end - 1].rank + 1 {
                        break;
                    }
                    sum += entries[end].value;
                    *cells
                        .entry((entries[start].rank, entries[end].rank))
                        .or_insert(0.0) += sum;
                }
            }
        }
        tracing::debug!(
            items = ordered_items.len(),
            cells = cells.len(),
            "pruning table built"
        );
        Self {
            items: ordered_items.to_vec(),
            cells,
        }
    }

    /// Exact value of the run `first..=last`; zero when no transaction
    /// holds it.
    pub fn cell(&self, first: usize, last: usize) -> f64 {
        self.cells.get(&(first, last)).copied().unwrap_or(0.0)
    }

    /// Item at `rank` in the surviving global order.
    pub fn item_at(&self, rank: usize) -> Option<ItemId> {
        self.items.get(rank).copied()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells, ordered by `(first, last)`.
    pub fn cells_sorted(&self) -> Vec<TableCell> {
        let mut cells: Vec<TableCell> = self
            .cells
            .iter()
            .map(|(&(first, last), &value)| TableCell { first, last, value })
            .collect();
        cells.sort_by_key(|c| (c.first, c.last));
        cells
    }

    /// Cells whose span is at most `max_span`, ordered by `(first, last)`.
    pub fn band(&self, max_span: usize) -> impl Iterator<Item = TableCell> {
        self.cells_sorted()
            .into_iter()
            .filter(move |c| c.span() <= max_span)
    }

    /// Items of the run behind a cell.
    pub fn run_items(&self, cell: &TableCell) -> Vec<ItemId> {
        self.items[cell.first..=cell.last].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::RankedValue;
    use ttfe_core::TransactionId;

    fn ptx(tid: u32, entries: &[(usize, f64)]) -> PrunedTransaction {
        PrunedTransaction {
            tid: TransactionId(tid),
            entries: entries
                .iter()
                .map(|&(rank, value)| RankedValue { rank, value })
                .collect(),
        }
    }

    #[test]
    fn test_only_consecutive_ranks_accumulate() {
        let items = [ItemId(10), ItemId(11), ItemId(12), ItemId(13)];
        let txs = vec![
            ptx(0, &[(0, 1.0), (1, 2.0), (2, 3.0)]),
            ptx(1, &[(0, 1.0), (2, 3.0), (3, 4.0)]),
        ];
        let table = PruningTable::build(&txs, &items);
        assert_eq!(table.cell(0, 1), 3.0);
        assert_eq!(table.cell(1, 2), 5.0);
        assert_eq!(table.cell(0, 2), 6.0);
        // rank 1 missing from the second transaction: no (0, 2) or (0, 3) there
        assert_eq!(table.cell(2, 3), 7.0);
        assert_eq!(table.cell(0, 3), 0.0);
        assert_eq!(table.len(), 4);
        let band: Vec<(usize, usize)> = table.band(1).map(|c| (c.first, c.last)).collect();
        assert_eq!(band, vec![(0, 1), (1, 2), (2, 3)]);
        assert_eq!(
            table.run_items(&TableCell { first: 0, last: 2, value: 6.0 }),
            vec![ItemId(10), ItemId(11), ItemId(12)]
        );
    }

    #[test]
    fn test_empty_input_gives_empty_table() {
        let table = PruningTable::build(&[], &[]);
        assert!(table.is_empty());
        assert_eq!(table.cell(0, 1), 0.0);
    }
}
