//! Shared identifier and collection types.

pub mod collections;
pub mod identifiers;

pub use identifiers::{ItemId, TransactionId};
