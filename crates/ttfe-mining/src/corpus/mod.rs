//! Corpus index: transactions plus per-item bounds and the global order.

pub mod index;
pub mod pruned;
pub mod types;

pub use index::CorpusIndex;
pub use pruned::{PrunedCorpus, PrunedTransaction, RankedValue};
pub use types::{Occurrence, Transaction};
