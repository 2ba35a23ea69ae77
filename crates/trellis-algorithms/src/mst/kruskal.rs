//! Kruskal's algorithm.

use super::{SpanningTreeResult, reject_negative_weights};
use crate::cancellation::CancellationScope;
use crate::config::AlgorithmConfig;
use crate::lifecycle::{AlgorithmRun, ComputationState, GraphAlgorithm};
use crate::observer::{AlgorithmEvent, EventKind, ObserverRegistry};
use trellis_common::utils::error::Result;
use trellis_core::DisjointSetForest;
use trellis_core::graph::{EdgeEnumerable, GraphBase, GraphEdge, VertexEnumerable};

/// Minimum spanning forest by global edge sort and union-find.
///
/// Edges are sorted ascending by weight; equal weights keep enumeration
/// order. Every scanned edge raises [`EventKind::ExamineEdge`]; every edge
/// joining two components raises [`EventKind::TreeEdge`]. Cancellation is
/// polled once per edge.
pub struct KruskalMinimumSpanningTree<'g, G: GraphBase, W> {
    graph: &'g G,
    weight: W,
    run: AlgorithmRun<G::Vertex, G::Edge>,
    forest: DisjointSetForest<G::Vertex>,
    result: SpanningTreeResult<G::Edge>,
}

impl<'g, G, W> KruskalMinimumSpanningTree<'g, G, W>
where
    G: VertexEnumerable + EdgeEnumerable,
    G::Vertex: 'static,
    G::Edge: 'static,
    W: Fn(&G::Edge) -> f64,
{
    /// Creates an engine over `graph` weighted by `weight`.
    pub fn new(graph: &'g G, weight: W) -> Self {
        Self::with_config(graph, weight, AlgorithmConfig::default())
    }

    /// Creates an engine with custom configuration.
    pub fn with_config(graph: &'g G, weight: W, config: AlgorithmConfig) -> Self {
        Self {
            graph,
            weight,
            run: AlgorithmRun::new(config),
            forest: DisjointSetForest::with_capacity(graph.vertex_count()),
            result: SpanningTreeResult::new(),
        }
    }
}

impl<'g, G, W> KruskalMinimumSpanningTree<'g, G, W>
where
    G: VertexEnumerable + EdgeEnumerable,
    W: Fn(&G::Edge) -> f64,
{
    /// Polls `scope` instead of the engine's own cancellation flag.
    pub fn with_cancellation(mut self, scope: CancellationScope) -> Self {
        self.run.set_cancellation(scope);
        self
    }

    /// Returns the observer registry.
    pub fn observers(&self) -> &ObserverRegistry<G::Vertex, G::Edge> {
        self.run.observers()
    }

    /// Returns the forest selected so far. Partial after `Aborted`.
    pub fn spanning_tree(&self) -> &SpanningTreeResult<G::Edge> {
        &self.result
    }

    /// Consumes the engine and returns the selected forest.
    pub fn into_spanning_tree(self) -> SpanningTreeResult<G::Edge> {
        self.result
    }

    /// Returns true if `a` and `b` ended up in the same tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingElement`](trellis_common::Error::MissingElement)
    /// if either vertex was not part of the last run.
    pub fn connected(&mut self, a: &G::Vertex, b: &G::Vertex) -> Result<bool> {
        self.forest.are_in_same_set(a, b)
    }

    fn build(&mut self) -> Result<bool> {
        let graph = self.graph;

        if self.run.config().reject_negative_weights {
            reject_negative_weights(graph.edges(), &self.weight)?;
        }

        for vertex in graph.vertices() {
            self.forest.make_set(vertex)?;
        }

        let mut ranked: Vec<(f64, G::Edge)> =
            graph.edges().map(|edge| ((self.weight)(&edge), edge)).collect();
        // sort_by is stable: equal weights keep enumeration order
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

        let early_exit = self.run.config().kruskal_early_exit;
        for (weight, edge) in ranked {
            if self.run.is_cancelling() {
                return Ok(true);
            }
            self.run
                .notify(EventKind::ExamineEdge, || AlgorithmEvent::ExamineEdge(edge.clone()));

            if weight.is_nan() {
                continue;
            }
            if self.forest.union(edge.source(), edge.target())? {
                self.run
                    .notify(EventKind::TreeEdge, || AlgorithmEvent::TreeEdge(edge.clone()));
                self.result.select(edge, weight);

                if early_exit && self.forest.set_count() == 1 {
                    break;
                }
            }
        }
        Ok(false)
    }
}

impl<'g, G, W> GraphAlgorithm for KruskalMinimumSpanningTree<'g, G, W>
where
    G: VertexEnumerable + EdgeEnumerable,
    W: Fn(&G::Edge) -> f64,
{
    fn name(&self) -> &'static str {
        "kruskal_minimum_spanning_tree"
    }

    fn state(&self) -> ComputationState {
        self.run.state()
    }

    fn cancellation(&self) -> &CancellationScope {
        self.run.cancellation()
    }

    fn initialize(&mut self) {
        self.forest.clear();
        self.result.clear();
        self.run.reset();
    }

    fn compute(&mut self) -> Result<ComputationState> {
        self.initialize();
        let name = self.name();
        self.run.begin(name, self.graph.vertex_count());
        let outcome = self.build();
        self.run.conclude(name, outcome)
    }
}
