//! Minimum spanning forests.
//!
//! Two engines over the same contract: the selected edges form a
//! minimum-weight spanning forest with one tree per connected component.
//!
//! | Engine | Graph capabilities | Strategy |
//! |--------|--------------------|----------|
//! | [`KruskalMinimumSpanningTree`] | vertices + edges | global edge sort, union-find |
//! | [`PrimMinimumSpanningTree`] | vertices + adjacency | grow each tree from a root |
//!
//! Weights come from a caller-supplied `Fn(&Edge) -> f64`, evaluated lazily.
//! Negative weights are accepted unless
//! [`AlgorithmConfig::rejecting_negative_weights`](crate::AlgorithmConfig::rejecting_negative_weights)
//! is set. NaN weights are never selected.

mod kruskal;
mod prim;

pub use kruskal::KruskalMinimumSpanningTree;
pub use prim::PrimMinimumSpanningTree;

use crate::lifecycle::GraphAlgorithm;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use trellis_common::utils::error::{Error, Result};
use trellis_core::graph::{AdjacentEdgeQueryable, EdgeEnumerable, VertexEnumerable};

/// Edges selected by a spanning-forest run and their summed weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanningTreeResult<E> {
    /// Selected edges, in selection order.
    pub edges: Vec<E>,
    /// Sum of the selected edges' weights.
    pub total_weight: f64,
}

impl<E> SpanningTreeResult<E> {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            total_weight: 0.0,
        }
    }

    /// Returns the number of selected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if no edge was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub(crate) fn select(&mut self, edge: E, weight: f64) {
        self.edges.push(edge);
        self.total_weight += weight;
    }

    pub(crate) fn clear(&mut self) {
        self.edges.clear();
        self.total_weight = 0.0;
    }
}

impl<E> Default for SpanningTreeResult<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fails on the first edge whose weight is negative.
pub(crate) fn reject_negative_weights<E: Debug>(
    edges: impl IntoIterator<Item = E>,
    weight: impl Fn(&E) -> f64,
) -> Result<()> {
    for edge in edges {
        let w = weight(&edge);
        if w < 0.0 {
            return Err(Error::NegativeWeight {
                edge: format!("{:?}", edge),
                weight: w,
            });
        }
    }
    Ok(())
}

/// Computes a minimum spanning forest with Kruskal's algorithm.
///
/// # Errors
///
/// Returns an error only on an internal consistency failure.
///
/// # Example
///
/// ```
/// use trellis_algorithms::kruskal;
/// use trellis_core::UndirectedGraph;
///
/// let graph = UndirectedGraph::from_edges([(1, 2), (2, 3), (1, 3)]);
/// let tree = kruskal(&graph, |_| 1.0).unwrap();
/// assert_eq!(tree.edge_count(), 2);
/// assert_eq!(tree.total_weight, 2.0);
/// ```
pub fn kruskal<G, W>(graph: &G, weight: W) -> Result<SpanningTreeResult<G::Edge>>
where
    G: VertexEnumerable + EdgeEnumerable,
    G::Vertex: 'static,
    G::Edge: 'static,
    W: Fn(&G::Edge) -> f64,
{
    let mut engine = KruskalMinimumSpanningTree::new(graph, weight);
    engine.compute()?;
    Ok(engine.into_spanning_tree())
}

/// Computes a minimum spanning forest with Prim's algorithm.
///
/// # Errors
///
/// Returns an error only on an internal consistency failure.
///
/// # Example
///
/// ```
/// use trellis_algorithms::prim;
/// use trellis_core::{Edge, UndirectedGraph};
///
/// let graph = UndirectedGraph::from_edges([(1, 2), (2, 3), (1, 3)]);
/// let tree = prim(&graph, |e: &Edge<i32>| f64::from(e.source + e.target)).unwrap();
/// assert_eq!(tree.total_weight, 7.0);
/// ```
pub fn prim<G, W>(graph: &G, weight: W) -> Result<SpanningTreeResult<G::Edge>>
where
    G: VertexEnumerable + AdjacentEdgeQueryable,
    G::Vertex: 'static,
    G::Edge: 'static,
    W: Fn(&G::Edge) -> f64,
{
    let mut engine = PrimMinimumSpanningTree::new(graph, weight);
    engine.compute()?;
    Ok(engine.into_spanning_tree())
}
