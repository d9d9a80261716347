//! Depth-first branch-and-bound over membership lists.

pub mod engine;
pub mod join;
pub mod list;

pub use engine::{SearchEngine, SearchOutcome, SearchStats};
pub use join::{join, JoinOutcome};
pub use list::{build_root_lists, MembershipEntry, MembershipList};
