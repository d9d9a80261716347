//! Run statistics.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::search::SearchStats;

/// Measurements of one mining run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub elapsed: Duration,
    /// Peak resident memory; `None` where it cannot be sampled.
    pub peak_memory_mb: Option<f64>,
    pub transaction_count: usize,
    pub items_before_pruning: usize,
    pub items_after_pruning: usize,
    pub table_cells: usize,
    pub cooccurrence_cells: usize,
    pub search: SearchStats,
}

impl RunStats {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run statistics:")?;
        writeln!(f, "  Elapsed: {:.3}s", self.elapsed_secs())?;
        match self.peak_memory_mb {
            Some(mb) => writeln!(f, "  Peak memory: {mb:.2} MB")?,
            None => writeln!(f, "  Peak memory: unavailable")?,
        }
        writeln!(f, "  Transactions: {}", self.transaction_count)?;
        writeln!(
            f,
            "  Items: {} -> {} after pruning",
            self.items_before_pruning, self.items_after_pruning
        )?;
        writeln!(f, "  Table cells: {}", self.table_cells)?;
        if self.cooccurrence_cells > 0 {
            writeln!(f, "  Co-occurrence cells: {}", self.cooccurrence_cells)?;
        }
        write!(f, "  Search: {}", self.search)
    }
}
