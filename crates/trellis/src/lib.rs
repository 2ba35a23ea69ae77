//! # Trellis
//!
//! Graph algorithms you can watch and stop.
//!
//! Start with an algorithm engine such as [`SourceFirstTopologicalSort`] or
//! [`KruskalMinimumSpanningTree`]. Engines borrow any graph implementing the
//! capability traits they need, so [`AdjacencyGraph`] and [`UndirectedGraph`]
//! are conveniences, not requirements.
//!
//! ## Engines
//!
//! | Engine | Needs | Emits |
//! | ------ | ----- | ----- |
//! | [`SourceFirstTopologicalSort`] | vertices, edges, out-edges | `ExamineVertex`, `ExamineEdge`, `VertexAdded` |
//! | [`KruskalMinimumSpanningTree`] | vertices, edges | `ExamineEdge`, `TreeEdge` |
//! | [`PrimMinimumSpanningTree`] | vertices, adjacent edges | `DiscoverVertex`, `ExamineVertex`, `ExamineEdge`, `TreeEdge`, `FinishVertex` |
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis::{AdjacencyGraph, EventKind, GraphAlgorithm, SourceFirstTopologicalSort, VertexRecorder};
//!
//! let graph = AdjacencyGraph::from_edges([("shirt", "tie"), ("tie", "jacket"), ("trousers", "jacket")]);
//! let mut sort = SourceFirstTopologicalSort::new(&graph);
//!
//! // Watch vertices as they are emitted
//! let added = VertexRecorder::attach(sort.observers(), EventKind::VertexAdded)?;
//!
//! sort.compute()?;
//! assert_eq!(added.recorded(), sort.sorted_vertices());
//! assert_eq!(sort.sorted_vertices().last(), Some(&"jacket"));
//! # Ok::<(), trellis::Error>(())
//! ```
//!
//! Cancellation is cooperative: clone the engine's [`CancellationScope`] and
//! call `cancel()` from anywhere, and the run ends `Aborted` at its next
//! loop boundary.

// Re-export the algorithm framework and engines
pub use trellis_algorithms::{
    AlgorithmConfig, AlgorithmEvent, CancellationScope, ComputationState, EdgeRecorder,
    EventKind, GraphAlgorithm, KruskalMinimumSpanningTree, ObserverRegistry,
    PrimMinimumSpanningTree, SourceFirstTopologicalSort, SpanningTreeResult, Subscription,
    VertexRecorder, kruskal, prim, topological_sort,
};

// Re-export graph traits, storage and collections
pub use trellis_core::{
    AdjacencyGraph, AdjacentEdgeQueryable, DisjointSetForest, Edge, EdgeEnumerable, GraphBase,
    GraphConfig, GraphEdge, InEdgeQueryable, IndexedPriorityQueue, OutEdgeQueryable,
    UndirectedGraph, VertexEnumerable, VertexKey,
};

// Re-export identifiers and the error type
pub use trellis_common::{EdgeId, Error, Result};
