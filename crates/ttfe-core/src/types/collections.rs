//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec for pattern item lists (usually short).
pub type SmallVec4<T> = SmallVec<[T; 4]>;

/// SmallVec for transaction occurrence lists.
pub type SmallVec8<T> = SmallVec<[T; 8]>;
