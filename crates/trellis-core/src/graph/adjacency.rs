//! Directed adjacency-list graph.
//!
//! Vertices live in an insertion-ordered map so enumeration is stable
//! across runs. Edges live in one append-only vector; adjacency lists hold
//! indices into it.

use super::{
    Edge, EdgeEnumerable, GraphBase, InEdgeQueryable, OutEdgeQueryable, VertexEnumerable,
    VertexKey,
};
use indexmap::IndexMap;
use smallvec::SmallVec;
use trellis_common::types::EdgeId;
use trellis_common::utils::error::{Error, Result};
use trellis_common::utils::hash::FxBuildHasher;

/// Configuration for graph storage.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Whether more than one edge may join the same ordered vertex pair.
    pub allow_parallel_edges: bool,
    /// Whether to maintain backward adjacency lists (incoming edges).
    pub backward_edges: bool,
    /// Initial capacity for vertices.
    pub initial_vertex_capacity: usize,
    /// Initial capacity for edges.
    pub initial_edge_capacity: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            allow_parallel_edges: true,
            backward_edges: true,
            initial_vertex_capacity: 16,
            initial_edge_capacity: 64,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct VertexEdges {
    /// Indices of outgoing edges.
    outgoing: SmallVec<[usize; 4]>,
    /// Indices of incoming edges. Empty when backward edges are disabled.
    incoming: SmallVec<[usize; 4]>,
}

/// A directed graph backed by adjacency lists.
#[derive(Debug, Clone)]
pub struct AdjacencyGraph<V> {
    config: GraphConfig,
    vertices: IndexMap<V, VertexEdges, FxBuildHasher>,
    edges: Vec<Edge<V>>,
}

impl<V: VertexKey> AdjacencyGraph<V> {
    /// Creates an empty graph with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Creates an empty graph with custom configuration.
    #[must_use]
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            vertices: IndexMap::with_capacity_and_hasher(
                config.initial_vertex_capacity,
                FxBuildHasher::default(),
            ),
            edges: Vec::with_capacity(config.initial_edge_capacity),
            config,
        }
    }

    /// Builds a graph from `(source, target)` pairs, adding vertices as needed.
    ///
    /// Parallel edges are kept, since the default configuration allows them.
    pub fn from_edges(pairs: impl IntoIterator<Item = (V, V)>) -> Self {
        let mut graph = Self::new();
        for (source, target) in pairs {
            graph.insert_vertex_entry(source.clone());
            graph.insert_vertex_entry(target.clone());
            graph.push_edge(source, target);
        }
        graph
    }

    /// Returns the storage configuration.
    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Adds a vertex. Returns false if it was already present.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        self.insert_vertex_entry(vertex)
    }

    /// Adds every vertex in the iterator. Returns how many were new.
    pub fn add_vertices(&mut self, vertices: impl IntoIterator<Item = V>) -> usize {
        vertices
            .into_iter()
            .filter(|v| self.insert_vertex_entry(v.clone()))
            .count()
    }

    /// Adds an edge between two existing vertices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if either endpoint is absent, or if
    /// parallel edges are disabled and the pair is already joined.
    pub fn add_edge(&mut self, source: V, target: V) -> Result<Edge<V>> {
        for endpoint in [&source, &target] {
            if !self.vertices.contains_key(endpoint) {
                return Err(Error::InvalidArgument(format!(
                    "vertex {:?} is not in the graph",
                    endpoint
                )));
            }
        }

        if !self.config.allow_parallel_edges && self.find_edge(&source, &target).is_some() {
            return Err(Error::InvalidArgument(format!(
                "parallel edge {:?} -> {:?} not allowed",
                source, target
            )));
        }

        Ok(self.push_edge(source, target))
    }

    /// Adds an edge, inserting missing endpoints first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if parallel edges are disabled and
    /// the pair is already joined.
    pub fn add_vertices_and_edge(&mut self, source: V, target: V) -> Result<Edge<V>> {
        self.insert_vertex_entry(source.clone());
        self.insert_vertex_entry(target.clone());
        self.add_edge(source, target)
    }

    /// Returns the first edge from `source` to `target`, if any.
    #[must_use]
    pub fn find_edge(&self, source: &V, target: &V) -> Option<&Edge<V>> {
        self.vertices.get(source)?.outgoing.iter().find_map(|&i| {
            let edge = &self.edges[i];
            (&edge.target == target).then_some(edge)
        })
    }

    fn insert_vertex_entry(&mut self, vertex: V) -> bool {
        if self.vertices.contains_key(&vertex) {
            return false;
        }
        self.vertices.insert(vertex, VertexEdges::default());
        true
    }

    fn push_edge(&mut self, source: V, target: V) -> Edge<V> {
        let index = self.edges.len();
        let edge = Edge::new(EdgeId::from_index(index), source, target);

        if let Some(entry) = self.vertices.get_mut(&edge.source) {
            entry.outgoing.push(index);
        }
        if self.config.backward_edges {
            if let Some(entry) = self.vertices.get_mut(&edge.target) {
                entry.incoming.push(index);
            }
        }

        self.edges.push(edge.clone());
        edge
    }
}

impl<V: VertexKey> Default for AdjacencyGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexKey> GraphBase for AdjacencyGraph<V> {
    type Vertex = V;
    type Edge = Edge<V>;

    fn is_directed(&self) -> bool {
        true
    }
}

impl<V: VertexKey> VertexEnumerable for AdjacencyGraph<V> {
    fn vertices(&self) -> impl Iterator<Item = V> {
        self.vertices.keys().cloned()
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains_key(vertex)
    }
}

impl<V: VertexKey> EdgeEnumerable for AdjacencyGraph<V> {
    fn edges(&self) -> impl Iterator<Item = Edge<V>> {
        self.edges.iter().cloned()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn contains_edge(&self, edge: &Edge<V>) -> bool {
        self.edges.get(edge.id.index()) == Some(edge)
    }
}

impl<V: VertexKey> OutEdgeQueryable for AdjacencyGraph<V> {
    fn out_edges(&self, vertex: &V) -> impl Iterator<Item = Edge<V>> {
        self.vertices
            .get(vertex)
            .into_iter()
            .flat_map(move |entry| entry.outgoing.iter().map(move |&i| self.edges[i].clone()))
    }

    fn out_degree(&self, vertex: &V) -> usize {
        self.vertices.get(vertex).map_or(0, |entry| entry.outgoing.len())
    }
}

impl<V: VertexKey> InEdgeQueryable for AdjacencyGraph<V> {
    fn in_edges(&self, vertex: &V) -> impl Iterator<Item = Edge<V>> {
        let edges: Vec<Edge<V>> = if self.config.backward_edges {
            self.vertices
                .get(vertex)
                .map(|entry| entry.incoming.iter().map(|&i| self.edges[i].clone()).collect())
                .unwrap_or_default()
        } else {
            // Without backward lists every edge has to be scanned
            self.edges
                .iter()
                .filter(|e| &e.target == vertex)
                .cloned()
                .collect()
        };
        edges.into_iter()
    }

    fn in_degree(&self, vertex: &V) -> usize {
        if self.config.backward_edges {
            self.vertices.get(vertex).map_or(0, |entry| entry.incoming.len())
        } else {
            self.edges.iter().filter(|e| &e.target == vertex).count()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphEdge;

    #[test]
    fn test_basic_adjacency() {
        let graph = AdjacencyGraph::from_edges([(0, 1), (0, 2), (0, 3)]);

        let targets: Vec<_> = graph.out_edges(&0).map(|e| e.target).collect();
        assert_eq!(targets, vec![1, 2, 3]);
        assert_eq!(graph.out_degree(&0), 3);
        assert_eq!(graph.out_degree(&1), 0);
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_in_edges() {
        let graph = AdjacencyGraph::from_edges([(0, 2), (1, 2), (2, 3)]);

        let sources: Vec<_> = graph.in_edges(&2).map(|e| e.source).collect();
        assert_eq!(sources, vec![0, 1]);
        assert_eq!(graph.in_degree(&2), 2);
        assert_eq!(graph.in_degree(&0), 0);
    }

    #[test]
    fn test_in_edges_without_backward_lists() {
        let mut graph = AdjacencyGraph::with_config(GraphConfig {
            backward_edges: false,
            ..GraphConfig::default()
        });
        graph.add_vertices(["a", "b", "c"]);
        graph.add_edge("a", "c").unwrap();
        graph.add_edge("b", "c").unwrap();

        assert_eq!(graph.in_degree(&"c"), 2);
        assert_eq!(graph.in_edges(&"c").count(), 2);
    }

    #[test]
    fn test_add_edge_requires_vertices() {
        let mut graph = AdjacencyGraph::new();
        graph.add_vertex('a');

        let err = graph.add_edge('a', 'b').unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let edge = graph.add_vertices_and_edge('a', 'b').unwrap();
        assert_eq!(edge.source(), &'a');
        assert!(graph.contains_edge(&edge));
        assert!(graph.contains_vertex(&'b'));
    }

    #[test]
    fn test_parallel_edges() {
        let mut graph = AdjacencyGraph::from_edges([(1, 2)]);
        let parallel = graph.add_edge(1, 2).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_ne!(graph.find_edge(&1, &2), Some(&parallel));

        let mut strict = AdjacencyGraph::with_config(GraphConfig {
            allow_parallel_edges: false,
            ..GraphConfig::default()
        });
        strict.add_vertices_and_edge(1, 2).unwrap();
        assert!(strict.add_edge(1, 2).is_err());
        // The reverse direction is a different pair
        assert!(strict.add_edge(2, 1).is_ok());
    }

    #[test]
    fn test_vertex_order_is_insertion_order() {
        let mut graph = AdjacencyGraph::new();
        assert_eq!(graph.add_vertices([5, 3, 9, 3]), 3);
        assert!(!graph.add_vertex(5));

        let order: Vec<_> = graph.vertices().collect();
        assert_eq!(order, vec![5, 3, 9]);
        assert!(graph.is_directed());
    }

    #[test]
    fn test_self_edge() {
        let graph = AdjacencyGraph::from_edges([(1, 1)]);
        let edge = graph.edges().next().unwrap();
        assert!(edge.is_self_edge());
        assert_eq!(graph.in_degree(&1), 1);
        assert_eq!(graph.out_degree(&1), 1);
    }
}
