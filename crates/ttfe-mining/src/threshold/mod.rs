//! The working threshold and the strategies that raise it.

pub mod accumulator;
pub mod delta;
pub mod raiser;

pub use accumulator::{OrderedValue, TopKAccumulator};
pub use delta::Threshold;
pub use raiser::{RaiseRecord, RaiseStrategy, ThresholdRaiser};
