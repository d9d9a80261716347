//! The mining run: index, raise, prune, tabulate, raise, search.

pub mod memory;
pub mod miner;
pub mod stats;

pub use memory::MemorySampler;
pub use miner::{Miner, MiningOutcome};
pub use stats::RunStats;
