//! Core types, errors, configuration, events and tracing for the TTFE
//! top-K threat/frequency mining engine.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;

pub use config::{RunSettings, StrategyFlags, TtfeConfig};
pub use errors::{MiningError, TtfeErrorCode};
pub use traits::{Cancellable, CancellationToken};
pub use types::identifiers::{ItemId, TransactionId};
