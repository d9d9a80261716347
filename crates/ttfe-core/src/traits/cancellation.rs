//! Cooperative cancellation of a mining run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::MiningError;

/// Something a long-running search can poll to find out it should stop.
pub trait Cancellable {
    fn is_cancelled(&self) -> bool;

    fn cancel(&self);

    /// Node-boundary check for the search. Called between nodes, never
    /// inside a join, so a cancelled run leaves no half-accumulated totals.
    fn checkpoint(&self) -> Result<(), MiningError> {
        if self.is_cancelled() {
            tracing::debug!("cancellation observed at node boundary");
            Err(MiningError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Shared stop flag. Clones observe the same flag, so a handle can be given
/// to another thread before the run starts.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}
