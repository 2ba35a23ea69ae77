//! # trellis-core
//!
//! Core layer for Trellis: the read-only graph interface algorithms consume,
//! reference graph storage, and the auxiliary collections every non-trivial
//! algorithm depends on.
//!
//! ## Modules
//!
//! - [`graph`] - Capability traits ([`VertexEnumerable`], [`OutEdgeQueryable`], ...)
//!   and reference storage ([`AdjacencyGraph`], [`UndirectedGraph`])
//! - [`collections`] - [`IndexedPriorityQueue`] and [`DisjointSetForest`]

pub mod collections;
pub mod graph;

// Re-export commonly used types
pub use collections::{DisjointSetForest, IndexedPriorityQueue};
pub use graph::{
    AdjacencyGraph, AdjacentEdgeQueryable, Edge, EdgeEnumerable, GraphBase, GraphConfig,
    GraphEdge, InEdgeQueryable, OutEdgeQueryable, UndirectedGraph, VertexEnumerable, VertexKey,
};
