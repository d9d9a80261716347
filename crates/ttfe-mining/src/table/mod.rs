//! Pairwise aggregate structures built once after item-level pruning.

pub mod cooccurrence;
pub mod run_table;

pub use cooccurrence::CooccurrenceTable;
pub use run_table::{PruningTable, TableCell};
