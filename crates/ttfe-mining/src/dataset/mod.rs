//! Dataset input: transactions plus embedded directives.

pub mod directives;
pub mod reader;

pub use directives::{apply_directive, DirectiveError};
pub use reader::{Dataset, DatasetReader};
