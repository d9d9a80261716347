//! MiningEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing mining runs.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about. Handlers observe; they cannot
/// influence the run.
pub trait MiningEventHandler: Send + Sync {
    fn on_run_started(&self, _event: &RunStartedEvent) {}
    fn on_threshold_raised(&self, _event: &ThresholdRaisedEvent) {}
    fn on_items_pruned(&self, _event: &ItemsPrunedEvent) {}
    fn on_table_built(&self, _event: &TableBuiltEvent) {}
    fn on_pattern_saved(&self, _event: &PatternSavedEvent) {}
    fn on_search_complete(&self, _event: &SearchCompleteEvent) {}
    fn on_diagnostic(&self, _event: &DiagnosticEvent) {}
}
