//! Raw transaction data.

use serde::{Deserialize, Serialize};
use ttfe_core::types::collections::SmallVec8;
use ttfe_core::ItemId;

use crate::value::Weights;

/// One item inside one transaction. Value is derived from the run's
/// weights on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    pub item: ItemId,
    pub threat: f64,
    pub frequency: f64,
}

impl Occurrence {
    pub fn new(item: ItemId, threat: f64, frequency: f64) -> Self {
        Self {
            item,
            threat,
            frequency,
        }
    }
}

/// A transaction as read from input: unique items in input order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transaction {
    pub occurrences: SmallVec8<Occurrence>,
    /// Total declared in the input, kept only for cross-checking.
    pub declared_total: Option<f64>,
    /// Source line, when read from a file.
    pub line: Option<usize>,
}

impl Transaction {
    /// Build from occurrences. Later duplicates of an item are dropped.
    pub fn new(occurrences: impl IntoIterator<Item = Occurrence>) -> Self {
        let mut tx = Self::default();
        for occurrence in occurrences {
            tx.push(occurrence);
        }
        tx
    }

    /// Append an occurrence. Returns false if the item is already present.
    pub fn push(&mut self, occurrence: Occurrence) -> bool {
        if self.contains(occurrence.item) {
            return false;
        }
        self.occurrences.push(occurrence);
        true
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.occurrences.iter().any(|o| o.item == item)
    }

    pub fn occurrence(&self, item: ItemId) -> Option<&Occurrence> {
        self.occurrences.iter().find(|o| o.item == item)
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// Sum of occurrence values under `weights`.
    pub fn total_value(&self, weights: &Weights) -> f64 {
        self.occurrences.iter().map(|o| weights.value(o)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_item_rejected() {
        let mut tx = Transaction::default();
        assert!(tx.push(Occurrence::new(ItemId(1), 1.0, 1.0)));
        assert!(!tx.push(Occurrence::new(ItemId(1), 5.0, 5.0)));
        assert_eq!(tx.len(), 1);
        assert_eq!(tx.occurrence(ItemId(1)).map(|o| o.threat), Some(1.0));
    }

    #[test]
    fn test_total_value() {
        let tx = Transaction::new([
            Occurrence::new(ItemId(1), 2.0, 1.0),
            Occurrence::new(ItemId(2), 1.0, 3.0),
        ]);
        assert_eq!(tx.total_value(&Weights::default()), 3.5);
    }
}
