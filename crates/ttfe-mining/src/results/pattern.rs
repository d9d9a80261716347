//! A mined pattern with its exact value.

use std::fmt;

use serde::{Deserialize, Serialize};
use ttfe_core::types::collections::SmallVec4;
use ttfe_core::ItemId;

/// An itemset, carried in the run's global item order, and its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub items: SmallVec4<ItemId>,
    pub value: f64,
}

impl Pattern {
    pub fn new(items: impl IntoIterator<Item = ItemId>, value: f64) -> Self {
        Self {
            items: items.into_iter().collect(),
            value,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }

    /// Items sorted by id; identifies the itemset independent of run order.
    pub fn canonical_items(&self) -> Vec<ItemId> {
        let mut items = self.items.to_vec();
        items.sort_unstable();
        items
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "): {}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let p = Pattern::new([ItemId(3), ItemId(1)], 4.5);
        assert_eq!(p.to_string(), "(3, 1): 4.5");
        assert_eq!(p.canonical_items(), vec![ItemId(1), ItemId(3)]);
        assert_eq!(Pattern::new([ItemId(2)], 4.0).to_string(), "(2): 4");
    }
}
