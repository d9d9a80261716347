//! Tests for tracing initialization.

use ttfe_core::tracing::{filter_for_debug_level, init_tracing};

#[test]
fn test_init_tracing_idempotent() {
    init_tracing(1);
    init_tracing(3);
    tracing::info!("tracing initialized twice without panicking");
}

#[test]
fn test_debug_level_filters() {
    assert_eq!(filter_for_debug_level(0), "off");
    assert!(filter_for_debug_level(1).contains("ttfe_mining=info"));
    assert!(filter_for_debug_level(2).contains("ttfe_mining=debug"));
    assert!(filter_for_debug_level(9).contains("ttfe_mining=trace"));
}
