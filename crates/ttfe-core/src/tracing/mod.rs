//! Tracing setup.

pub mod setup;

pub use setup::{filter_for_debug_level, init_tracing};
