//! Top-K weighted pattern mining with a self-raising threshold.
//!
//! The run pipeline: index the corpus, raise the threshold from cheap
//! evidence, drop hopeless items, build the pruning table, raise again,
//! then branch-and-bound over membership lists while the result queue
//! keeps tightening the threshold.

pub mod corpus;
pub mod dataset;
pub mod decompose;
pub mod pipeline;
pub mod report;
pub mod results;
pub mod search;
pub mod sweep;
pub mod table;
pub mod threshold;
pub mod value;

pub use corpus::{CorpusIndex, Occurrence, Transaction};
pub use dataset::{Dataset, DatasetReader};
pub use decompose::{Decomposer, Decomposition};
pub use pipeline::{Miner, MiningOutcome, RunStats};
pub use report::ReportWriter;
pub use results::{Pattern, ResultQueue};
pub use sweep::{run_sweep, SweepCell, SweepGrid};
pub use threshold::{Threshold, ThresholdRaiser, TopKAccumulator};
pub use value::Weights;
