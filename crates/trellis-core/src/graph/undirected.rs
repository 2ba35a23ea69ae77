//! Undirected adjacency-list graph.

use super::{
    AdjacentEdgeQueryable, Edge, EdgeEnumerable, GraphBase, GraphConfig, VertexEnumerable,
    VertexKey,
};
use indexmap::IndexMap;
use smallvec::SmallVec;
use trellis_common::types::EdgeId;
use trellis_common::utils::error::{Error, Result};
use trellis_common::utils::hash::FxBuildHasher;

/// An undirected graph backed by adjacency lists.
///
/// Each edge is recorded in the adjacency list of both endpoints, except a
/// self-loop, which appears once. `GraphConfig::backward_edges` has no effect.
#[derive(Debug, Clone)]
pub struct UndirectedGraph<V> {
    config: GraphConfig,
    adjacency: IndexMap<V, SmallVec<[usize; 4]>, FxBuildHasher>,
    edges: Vec<Edge<V>>,
}

impl<V: VertexKey> UndirectedGraph<V> {
    /// Creates an empty graph with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Creates an empty graph with custom configuration.
    #[must_use]
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            adjacency: IndexMap::with_capacity_and_hasher(
                config.initial_vertex_capacity,
                FxBuildHasher::default(),
            ),
            edges: Vec::with_capacity(config.initial_edge_capacity),
            config,
        }
    }

    /// Builds a graph from endpoint pairs, adding vertices as needed.
    pub fn from_edges(pairs: impl IntoIterator<Item = (V, V)>) -> Self {
        let mut graph = Self::new();
        for (a, b) in pairs {
            graph.add_vertex(a.clone());
            graph.add_vertex(b.clone());
            graph.push_edge(a, b);
        }
        graph
    }

    /// Adds a vertex. Returns false if it was already present.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if self.adjacency.contains_key(&vertex) {
            return false;
        }
        self.adjacency.insert(vertex, SmallVec::new());
        true
    }

    /// Adds every vertex in the iterator. Returns how many were new.
    pub fn add_vertices(&mut self, vertices: impl IntoIterator<Item = V>) -> usize {
        vertices.into_iter().filter(|v| self.add_vertex(v.clone())).count()
    }

    /// Adds an edge between two existing vertices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if either endpoint is absent, or if
    /// parallel edges are disabled and the endpoints are already joined in
    /// either orientation.
    pub fn add_edge(&mut self, a: V, b: V) -> Result<Edge<V>> {
        for endpoint in [&a, &b] {
            if !self.adjacency.contains_key(endpoint) {
                return Err(Error::InvalidArgument(format!(
                    "vertex {:?} is not in the graph",
                    endpoint
                )));
            }
        }

        if !self.config.allow_parallel_edges && self.find_edge(&a, &b).is_some() {
            return Err(Error::InvalidArgument(format!(
                "parallel edge {:?} -- {:?} not allowed",
                a, b
            )));
        }

        Ok(self.push_edge(a, b))
    }

    /// Adds an edge, inserting missing endpoints first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if parallel edges are disabled and
    /// the endpoints are already joined.
    pub fn add_vertices_and_edge(&mut self, a: V, b: V) -> Result<Edge<V>> {
        self.add_vertex(a.clone());
        self.add_vertex(b.clone());
        self.add_edge(a, b)
    }

    /// Returns the first edge joining `a` and `b` in either orientation.
    #[must_use]
    pub fn find_edge(&self, a: &V, b: &V) -> Option<&Edge<V>> {
        self.adjacency.get(a)?.iter().find_map(|&i| {
            let edge = &self.edges[i];
            let joins = (&edge.source == a && &edge.target == b)
                || (&edge.source == b && &edge.target == a);
            joins.then_some(edge)
        })
    }

    fn push_edge(&mut self, a: V, b: V) -> Edge<V> {
        let index = self.edges.len();
        let edge = Edge::new(EdgeId::from_index(index), a, b);

        if let Some(list) = self.adjacency.get_mut(&edge.source) {
            list.push(index);
        }
        if edge.source != edge.target {
            if let Some(list) = self.adjacency.get_mut(&edge.target) {
                list.push(index);
            }
        }

        self.edges.push(edge.clone());
        edge
    }
}

impl<V: VertexKey> Default for UndirectedGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexKey> GraphBase for UndirectedGraph<V> {
    type Vertex = V;
    type Edge = Edge<V>;

    fn is_directed(&self) -> bool {
        false
    }
}

impl<V: VertexKey> VertexEnumerable for UndirectedGraph<V> {
    fn vertices(&self) -> impl Iterator<Item = V> {
        self.adjacency.keys().cloned()
    }

    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }
}

impl<V: VertexKey> EdgeEnumerable for UndirectedGraph<V> {
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

impl<V: VertexKey> AdjacentEdgeQueryable for UndirectedGraph<V> {
    fn adjacent_edges(&self, vertex: &V) -> impl Iterator<Item = Edge<V>> {
        self.adjacency
            .get(vertex)
            .into_iter()
            .flat_map(move |list| list.iter().map(move |&i| self.edges[i].clone()))
    }

    fn adjacent_degree(&self, vertex: &V) -> usize {
        self.adjacency.get(vertex).map_or(0, |list| list.len())
    }
}
