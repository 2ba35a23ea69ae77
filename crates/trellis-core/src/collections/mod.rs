//! Auxiliary collections used by graph algorithms.
//!
//! - [`IndexedPriorityQueue`] - Binary min-heap with O(1) position lookup,
//!   so live entries can be re-prioritized in O(log n)
//! - [`DisjointSetForest`] - Union-find with full path compression and
//!   union by rank

mod disjoint_set;
mod priority_queue;

pub use disjoint_set::DisjointSetForest;
pub use priority_queue::IndexedPriorityQueue;
