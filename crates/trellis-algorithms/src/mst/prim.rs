//! Prim's algorithm.

use super::{SpanningTreeResult, reject_negative_weights};
use crate::cancellation::CancellationScope;
use crate::config::AlgorithmConfig;
use crate::lifecycle::{AlgorithmRun, ComputationState, GraphAlgorithm};
use crate::observer::{AlgorithmEvent, EventKind, ObserverRegistry};
use trellis_common::utils::error::{Error, Result};
use trellis_common::utils::hash::{FxHashMap, FxHashSet};
use trellis_core::IndexedPriorityQueue;
use trellis_core::graph::{AdjacentEdgeQueryable, GraphBase, GraphEdge, VertexEnumerable};

/// Minimum spanning forest grown one tree at a time.
///
/// Every vertex is queued up front with an infinite key. Popping a vertex
/// with a recorded connecting edge selects that edge; popping one without
/// starts a new tree. An optional root is popped first.
///
/// Events: [`EventKind::DiscoverVertex`] when a vertex first gets a
/// connecting edge or starts a tree, [`EventKind::ExamineVertex`] when it is
/// popped, [`EventKind::ExamineEdge`] for each edge to an unvisited
/// neighbour, [`EventKind::TreeEdge`] for each selected edge and
/// [`EventKind::FinishVertex`] once its edges are relaxed.
///
/// Edges with NaN or infinite weight are never selected.
pub struct PrimMinimumSpanningTree<'g, G: GraphBase, W> {
    graph: &'g G,
    weight: W,
    root: Option<G::Vertex>,
    run: AlgorithmRun<G::Vertex, G::Edge>,
    queue: IndexedPriorityQueue<G::Vertex, f64>,
    best_edge: FxHashMap<G::Vertex, G::Edge>,
    visited: FxHashSet<G::Vertex>,
    result: SpanningTreeResult<G::Edge>,
}

impl<'g, G, W> PrimMinimumSpanningTree<'g, G, W>
where
    G: VertexEnumerable + AdjacentEdgeQueryable,
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
        let capacity = config.queue_capacity(graph.vertex_count());
        Self {
            graph,
            weight,
            root: None,
            run: AlgorithmRun::new(config),
            queue: IndexedPriorityQueue::with_capacity(capacity),
            best_edge: FxHashMap::default(),
            visited: FxHashSet::default(),
            result: SpanningTreeResult::new(),
        }
    }
}

impl<'g, G, W> PrimMinimumSpanningTree<'g, G, W>
where
    G: VertexEnumerable + AdjacentEdgeQueryable,
    W: Fn(&G::Edge) -> f64,
{
    /// Grows the first tree from `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `root` is not in the graph.
    pub fn with_root(mut self, root: G::Vertex) -> Result<Self> {
        if !self.graph.contains_vertex(&root) {
            return Err(Error::InvalidArgument(format!(
                "root {:?} is not in the graph",
                root
            )));
        }
        self.root = Some(root);
        Ok(self)
    }

    /// Polls `scope` instead of the engine's own cancellation flag.
    pub fn with_cancellation(mut self, scope: CancellationScope) -> Self {
        self.run.set_cancellation(scope);
        self
    }

    /// Returns the configured root, if any.
    pub fn root(&self) -> Option<&G::Vertex> {
        self.root.as_ref()
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

    fn seed(&mut self) -> Result<()> {
        let graph = self.graph;
        for vertex in graph.vertices() {
            let key = if self.root.as_ref() == Some(&vertex) {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
            self.queue.add(key, vertex)?;
        }
        Ok(())
    }

    fn grow(&mut self) -> Result<bool> {
        let graph = self.graph;

        if self.run.config().reject_negative_weights {
            for vertex in graph.vertices() {
                reject_negative_weights(graph.adjacent_edges(&vertex), &self.weight)?;
            }
        }

        self.seed()?;

        while !self.queue.is_empty() {
            if self.run.is_cancelling() {
                return Ok(true);
            }

            let (key, vertex) = self.queue.remove_min()?;
            self.visited.insert(vertex.clone());

            match self.best_edge.remove(&vertex) {
                Some(edge) => {
                    self.run
                        .notify(EventKind::TreeEdge, || AlgorithmEvent::TreeEdge(edge.clone()));
                    self.result.select(edge, key);
                }
                None => {
                    self.run.notify(EventKind::DiscoverVertex, || {
                        AlgorithmEvent::DiscoverVertex(vertex.clone())
                    });
                }
            }
            self.run
                .notify(EventKind::ExamineVertex, || AlgorithmEvent::ExamineVertex(vertex.clone()));

            for edge in graph.adjacent_edges(&vertex) {
                if edge.is_self_edge() {
                    continue;
                }
                let neighbour = edge.other_endpoint(&vertex).clone();
                if self.visited.contains(&neighbour) {
                    continue;
                }
                self.run
                    .notify(EventKind::ExamineEdge, || AlgorithmEvent::ExamineEdge(edge.clone()));

                let weight = (self.weight)(&edge);
                let improves = self
                    .queue
                    .priority_of(&neighbour)
                    .is_some_and(|&current| weight < current);
                if !improves {
                    continue;
                }

                self.queue.update(&neighbour, weight)?;
                if self.best_edge.insert(neighbour.clone(), edge).is_none() {
                    self.run.notify(EventKind::DiscoverVertex, || {
                        AlgorithmEvent::DiscoverVertex(neighbour.clone())
                    });
                }
            }

            self.run
                .notify(EventKind::FinishVertex, || AlgorithmEvent::FinishVertex(vertex.clone()));
        }
        Ok(false)
    }
}

impl<'g, G, W> GraphAlgorithm for PrimMinimumSpanningTree<'g, G, W>
where
    G: VertexEnumerable + AdjacentEdgeQueryable,
    W: Fn(&G::Edge) -> f64,
{
    fn name(&self) -> &'static str {
        "prim_minimum_spanning_tree"
    }

    fn state(&self) -> ComputationState {
        self.run.state()
    }

    fn cancellation(&self) -> &CancellationScope {
        self.run.cancellation()
    }

    fn initialize(&mut self) {
        self.queue.clear();
        self.best_edge.clear();
        self.visited.clear();
        self.result.clear();
        self.run.reset();
    }

    fn compute(&mut self) -> Result<ComputationState> {
        self.initialize();
        let name = self.name();
        self.run.begin(name, self.graph.vertex_count());
        let outcome = self.grow();
        self.run.conclude(name, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::VertexRecorder;
    use trellis_core::{Edge, UndirectedGraph};

    fn unit(_: &Edge<u32>) -> f64 {
        1.0
    }

    #[test]
    fn test_square_degree_weights() {
        let graph = UndirectedGraph::from_edges([(1, 2), (2, 3), (3, 4), (4, 1)]);
        let weight = |e: &Edge<u32>| (graph.adjacent_degree(&e.source) + 1) as f64;
        let mut engine = PrimMinimumSpanningTree::new(&graph, weight);

        assert_eq!(engine.compute().unwrap(), ComputationState::Finished);
        assert_eq!(engine.spanning_tree().edge_count(), 3);
        assert_eq!(engine.spanning_tree().total_weight, 9.0);
    }

    #[test]
    fn test_decrease_key_replaces_connecting_edge() {
        let graph = UndirectedGraph::from_edges([(1, 2), (2, 3), (1, 3), (3, 4)]);
        let weights = |e: &Edge<u32>| match (e.source, e.target) {
            (1, 2) => 4.0,
            (2, 3) => 1.0,
            (1, 3) => 2.0,
            _ => 7.0,
        };
        let mut engine = PrimMinimumSpanningTree::new(&graph, weights).with_root(1).unwrap();
        engine.compute().unwrap();

        let tree = engine.spanning_tree();
        assert_eq!(tree.total_weight, 10.0);
        let pairs: Vec<_> = tree.edges.iter().map(|e| (e.source, e.target)).collect();
        assert_eq!(pairs, vec![(1, 3), (2, 3), (3, 4)]);
    }

    #[test]
    fn test_root_is_examined_first() {
        let graph = UndirectedGraph::from_edges([(1, 2), (2, 3)]);
        let mut engine = PrimMinimumSpanningTree::new(&graph, unit).with_root(3).unwrap();
        let examined =
            VertexRecorder::attach(engine.observers(), EventKind::ExamineVertex).unwrap();

        engine.compute().unwrap();
        assert_eq!(engine.root(), Some(&3));
        assert_eq!(examined.recorded(), vec![3, 2, 1]);
    }

    #[test]
    fn test_invalid_root_rejected() {
        let graph = UndirectedGraph::from_edges([(1, 2)]);
        let result = PrimMinimumSpanningTree::new(&graph, unit).with_root(7);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_disconnected_forest() {
        let mut graph = UndirectedGraph::from_edges([(1, 2), (2, 3), (10, 11)]);
        graph.add_vertex(99);
        let mut engine = PrimMinimumSpanningTree::new(&graph, unit);
        let discovered =
            VertexRecorder::attach(engine.observers(), EventKind::DiscoverVertex).unwrap();
        let finished = VertexRecorder::attach(engine.observers(), EventKind::FinishVertex).unwrap();

        assert_eq!(engine.compute().unwrap(), ComputationState::Finished);
        assert_eq!(engine.spanning_tree().edge_count(), 3);
        assert_eq!(engine.spanning_tree().total_weight, 3.0);
        assert_eq!(discovered.len(), 6);
        assert_eq!(finished.len(), 6);
    }

    #[test]
    fn test_unusable_weights_split_trees() {
        let graph = UndirectedGraph::from_edges([(1, 2), (2, 3), (3, 3)]);
        let weights = |e: &Edge<u32>| if e.source == 1 { f64::NAN } else { 2.0 };
        let tree = crate::mst::prim(&graph, weights).unwrap();

        assert_eq!(tree.edge_count(), 1);
        assert_eq!((tree.edges[0].source, tree.edges[0].target), (2, 3));
    }

    #[test]
    fn test_negative_weights_rejected_when_configured() {
        let graph = UndirectedGraph::from_edges([(1, 2), (2, 3)]);
        let weights = |e: &Edge<u32>| if e.target == 3 { -1.0 } else { 1.0 };
        let config = AlgorithmConfig::new().rejecting_negative_weights();
        let mut engine = PrimMinimumSpanningTree::with_config(&graph, weights, config);

        assert!(matches!(engine.compute(), Err(Error::NegativeWeight { .. })));
        assert_eq!(engine.state(), ComputationState::Aborted);
    }

    #[test]
    fn test_cancelled_before_start() {
        let graph = UndirectedGraph::from_edges([(1, 2), (2, 3)]);
        let mut engine = PrimMinimumSpanningTree::new(&graph, unit);
        engine.cancellation().cancel();

        assert_eq!(engine.compute().unwrap(), ComputationState::Aborted);
        assert!(engine.spanning_tree().is_empty());

        engine.cancellation().reset();
        assert_eq!(engine.compute().unwrap(), ComputationState::Finished);
        assert_eq!(engine.spanning_tree().edge_count(), 2);
    }
}
