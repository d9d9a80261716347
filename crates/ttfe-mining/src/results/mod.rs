//! Mined patterns and the bounded top-K result queue.

pub mod pattern;
pub mod queue;

pub use pattern::Pattern;
pub use queue::ResultQueue;
