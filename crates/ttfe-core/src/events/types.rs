//! Event payload types for mining runs.

use crate::errors::Diagnostic;
use crate::types::identifiers::ItemId;

/// Payload for `on_run_started`.
#[derive(Debug, Clone)]
pub struct RunStartedEvent {
    pub transaction_count: usize,
    pub item_count: usize,
    pub top_k: usize,
}

/// Payload for `on_threshold_raised`.
#[derive(Debug, Clone)]
pub struct ThresholdRaisedEvent {
    /// Strategy or stage that produced the new bound.
    pub source: &'static str,
    pub previous: Option<f64>,
    pub current: f64,
}

/// Payload for `on_items_pruned`.
#[derive(Debug, Clone)]
pub struct ItemsPrunedEvent {
    pub before: usize,
    pub after: usize,
    pub delta: Option<f64>,
}

/// Payload for `on_table_built`.
#[derive(Debug, Clone)]
pub struct TableBuiltEvent {
    pub item_count: usize,
    pub cell_count: usize,
}

/// Payload for `on_pattern_saved`.
#[derive(Debug, Clone)]
pub struct PatternSavedEvent {
    pub items: Vec<ItemId>,
    pub value: f64,
}

/// Payload for `on_search_complete`.
#[derive(Debug, Clone)]
pub struct SearchCompleteEvent {
    pub node_count: u64,
    pub join_count: u64,
    pub aborted_joins: u64,
    pub duration_ms: u64,
}

/// Payload for `on_diagnostic`.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    pub diagnostic: Diagnostic,
}
