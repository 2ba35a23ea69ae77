//! Read-only graph interface and reference storage.
//!
//! Algorithms never see a concrete graph type. They ask for exactly the
//! capabilities they need through generic bounds:
//!
//! | Capability | Trait | Used by |
//! |------------|-------|---------|
//! | Vertex listing | [`VertexEnumerable`] | every algorithm |
//! | Edge listing | [`EdgeEnumerable`] | topological sort, Kruskal |
//! | Outgoing edges | [`OutEdgeQueryable`] | topological sort |
//! | Incoming edges | [`InEdgeQueryable`] | bidirectional algorithms |
//! | Incident edges | [`AdjacentEdgeQueryable`] | Prim |
//!
//! The graph is borrowed immutably for the duration of a run.

mod adjacency;
mod edge;
mod undirected;

pub use adjacency::{AdjacencyGraph, GraphConfig};
pub use edge::Edge;
pub use undirected::UndirectedGraph;

use std::fmt::Debug;
use std::hash::Hash;

/// Requirements on a vertex identifier.
pub trait VertexKey: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> VertexKey for T {}

/// An edge between two vertices.
pub trait GraphEdge<V>: Clone + Eq + Hash + Debug {
    /// The tail of the edge (for undirected edges, the first endpoint).
    fn source(&self) -> &V;

    /// The head of the edge (for undirected edges, the second endpoint).
    fn target(&self) -> &V;

    /// Returns true if both endpoints are the same vertex.
    fn is_self_edge(&self) -> bool
    where
        V: PartialEq,
    {
        self.source() == self.target()
    }

    /// Returns the endpoint opposite `vertex`.
    ///
    /// If `vertex` is not an endpoint the source is returned.
    fn other_endpoint(&self, vertex: &V) -> &V
    where
        V: PartialEq,
    {
        if self.source() == vertex {
            self.target()
        } else {
            self.source()
        }
    }
}

/// Associated types shared by every capability trait.
pub trait GraphBase {
    /// Vertex identifier type.
    type Vertex: VertexKey;
    /// Edge type.
    type Edge: GraphEdge<Self::Vertex>;

    /// Returns true if edges have a direction.
    fn is_directed(&self) -> bool;
}

/// Enumerates vertices.
pub trait VertexEnumerable: GraphBase {
    /// Returns an iterator over all vertices.
    fn vertices(&self) -> impl Iterator<Item = Self::Vertex>;

    /// Returns the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Returns true if the vertex is part of the graph.
    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool;
}

/// Enumerates edges.
pub trait EdgeEnumerable: GraphBase {
    /// Returns an iterator over all edges.
    fn edges(&self) -> impl Iterator<Item = Self::Edge>;

    /// Returns the number of edges.
    fn edge_count(&self) -> usize;

    /// Returns true if the edge is part of the graph.
    fn contains_edge(&self, edge: &Self::Edge) -> bool;
}

/// Queries edges leaving a vertex.
pub trait OutEdgeQueryable: GraphBase {
    /// Returns the edges whose source is `vertex`. Empty if the vertex is absent.
    fn out_edges(&self, vertex: &Self::Vertex) -> impl Iterator<Item = Self::Edge>;

    /// Returns the number of edges leaving `vertex`.
    fn out_degree(&self, vertex: &Self::Vertex) -> usize;
}

/// Queries edges entering a vertex.
pub trait InEdgeQueryable: GraphBase {
    /// Returns the edges whose target is `vertex`. Empty if the vertex is absent.
    fn in_edges(&self, vertex: &Self::Vertex) -> impl Iterator<Item = Self::Edge>;

    /// Returns the number of edges entering `vertex`.
    fn in_degree(&self, vertex: &Self::Vertex) -> usize;
}

/// Queries edges incident to a vertex, regardless of direction.
pub trait AdjacentEdgeQueryable: GraphBase {
    /// Returns the edges with `vertex` as either endpoint.
    fn adjacent_edges(&self, vertex: &Self::Vertex) -> impl Iterator<Item = Self::Edge>;

    /// Returns the number of incident edges.
    fn adjacent_degree(&self, vertex: &Self::Vertex) -> usize;
}
