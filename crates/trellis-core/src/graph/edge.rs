//! Reference edge type.

use super::GraphEdge;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use trellis_common::types::EdgeId;

/// An edge stored by [`AdjacencyGraph`](super::AdjacencyGraph) or
/// [`UndirectedGraph`](super::UndirectedGraph).
///
/// The id makes parallel edges distinct under `Eq`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge<V> {
    /// Unique identifier within the owning graph.
    pub id: EdgeId,
    /// Source vertex.
    pub source: V,
    /// Target vertex.
    pub target: V,
}

impl<V> Edge<V> {
    /// Creates a new edge.
    pub fn new(id: EdgeId, source: V, target: V) -> Self {
        Self { id, source, target }
    }
}

impl<V: Clone + Eq + Hash + fmt::Debug> GraphEdge<V> for Edge<V> {
    fn source(&self) -> &V {
        &self.source
    }

    fn target(&self) -> &V {
        &self.target
    }
}

/// Renders as `e<id>(source, target)`, which reads the same for directed and
/// undirected storage.
impl<V: fmt::Debug> fmt::Debug for Edge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}, {:?})", self.id, self.source, self.target)
    }
}
