//! EventDispatcher: synchronous fan-out, free when empty.

use std::sync::Arc;

use super::handler::MiningEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// With no handlers registered, `emit` iterates over an empty Vec.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn MiningEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn MiningEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if at least one handler is registered.
    pub fn is_active(&self) -> bool {
        !self.handlers.is_empty()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler is logged and does not stop later handlers.
    fn emit<F: Fn(&dyn MiningEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("event handler panicked; continuing with remaining handlers");
            }
        }
    }

    pub fn emit_run_started(&self, event: &RunStartedEvent) {
        self.emit(|h| h.on_run_started(event));
    }

    pub fn emit_threshold_raised(&self, event: &ThresholdRaisedEvent) {
        self.emit(|h| h.on_threshold_raised(event));
    }

    pub fn emit_items_pruned(&self, event: &ItemsPrunedEvent) {
        self.emit(|h| h.on_items_pruned(event));
    }

    pub fn emit_table_built(&self, event: &TableBuiltEvent) {
        self.emit(|h| h.on_table_built(event));
    }

    pub fn emit_pattern_saved(&self, event: &PatternSavedEvent) {
        self.emit(|h| h.on_pattern_saved(event));
    }

    pub fn emit_search_complete(&self, event: &SearchCompleteEvent) {
        self.emit(|h| h.on_search_complete(event));
    }

    pub fn emit_diagnostic(&self, event: &DiagnosticEvent) {
        self.emit(|h| h.on_diagnostic(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
