//! # trellis-algorithms
//!
//! Algorithm framework and engines for Trellis.
//!
//! Every algorithm follows the same lifecycle: it is constructed over a
//! borrowed graph, computes once per [`compute`](GraphAlgorithm::compute)
//! call, polls a [`CancellationScope`] at loop boundaries, and reports
//! progress through typed events to an [`ObserverRegistry`].
//!
//! ## Modules
//!
//! - [`lifecycle`] - [`GraphAlgorithm`], [`ComputationState`] and run bookkeeping
//! - [`cancellation`] - Cooperative cancellation flag
//! - [`observer`] - Events and RAII [`Subscription`]s
//! - [`recorder`] - Observers that collect event payloads
//! - [`config`] - [`AlgorithmConfig`]
//! - [`topological_sort`] - [`SourceFirstTopologicalSort`]
//! - [`mst`] - [`KruskalMinimumSpanningTree`] and [`PrimMinimumSpanningTree`]

pub mod cancellation;
pub mod config;
pub mod lifecycle;
pub mod mst;
pub mod observer;
pub mod recorder;
pub mod topological_sort;

// Re-export commonly used types
pub use cancellation::CancellationScope;
pub use config::AlgorithmConfig;
pub use lifecycle::{AlgorithmRun, ComputationState, GraphAlgorithm};
pub use mst::{
    KruskalMinimumSpanningTree, PrimMinimumSpanningTree, SpanningTreeResult, kruskal, prim,
};
pub use observer::{AlgorithmEvent, EventKind, ObserverRegistry, Subscription};
pub use recorder::{EdgeRecorder, VertexRecorder};
pub use topological_sort::{SourceFirstTopologicalSort, topological_sort};
