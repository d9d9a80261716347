//! Pairwise co-occurrence bounds.
//!
//! For every pair of surviving items that share a transaction, the sum of
//! those transactions' pruned totals. Any pattern holding both items is
//! worth at most that much, so the search can skip the join outright.

use ttfe_core::types::collections::FxHashMap;

use crate::corpus::PrunedTransaction;

#[derive(Debug, Clone, Default)]
pub struct CooccurrenceTable {
    bounds: FxHashMap<(usize, usize), f64>,
}

impl CooccurrenceTable {
    pub fn build(transactions: &[PrunedTransaction]) -> Self {
        let mut bounds: FxHashMap<(usize, usize), f64> = FxHashMap::default();
        for tx in transactions {
            let total = tx.total_value();
            for (i, a) in tx.entries.iter().enumerate() {
                for b in &tx.entries[i + 1..] {
                    *bounds.entry((a.rank, b.rank)).or_insert(0.0) += total;
                }
            }
        }
        Self { bounds }
    }

    /// Bound for ranks `a < b`; zero if they never co-occur.
    pub fn bound(&self, a: usize, b: usize) -> f64 {
        let key = if a < b { (a, b) } else { (b, a) };
        self.bounds.get(&key).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::RankedValue;
    use ttfe_core::TransactionId;

    #[test]
    fn test_pair_bounds() {
        let txs = vec![
            PrunedTransaction {
                tid: TransactionId(0),
                entries: vec![
                    RankedValue { rank: 0, value: 1.0 },
                    RankedValue { rank: 2, value: 2.0 },
                ],
            },
            PrunedTransaction {
                tid: TransactionId(1),
                entries: vec![
                    RankedValue { rank: 0, value: 1.0 },
                    RankedValue { rank: 1, value: 1.0 },
                    RankedValue { rank: 2, value: 1.0 },
                ],
            },
        ];
        let table = CooccurrenceTable::build(&txs);
        assert_eq!(table.bound(0, 2), 6.0);
        assert_eq!(table.bound(2, 0), 6.0);
        assert_eq!(table.bound(0, 1), 3.0);
        assert_eq!(table.bound(1, 3), 0.0);
        assert_eq!(table.len(), 3);
    }
}
