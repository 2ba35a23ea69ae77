//! Source-first topological sort.
//!
//! Kahn's algorithm driven by an indexed priority queue keyed on each
//! vertex's *live* in-degree. Every vertex is queued up front; decrementing a
//! target's in-degree re-prioritizes its entry in place, so the next vertex
//! to emit is always the queue minimum. Popping a vertex whose in-degree is
//! still positive means every remaining vertex has an unprocessed
//! predecessor: the graph has a cycle.
//!
//! Self-loops are ignored for in-degree purposes.

use crate::cancellation::CancellationScope;
use crate::config::AlgorithmConfig;
use crate::lifecycle::{AlgorithmRun, ComputationState, GraphAlgorithm};
use crate::observer::{AlgorithmEvent, EventKind, ObserverRegistry};
use trellis_common::utils::error::{Error, Result};
use trellis_common::utils::hash::FxHashMap;
use trellis_core::IndexedPriorityQueue;
use trellis_core::graph::{
    EdgeEnumerable, GraphBase, GraphEdge, OutEdgeQueryable, VertexEnumerable,
};

/// Topological sort over a directed graph.
///
/// Emits [`EventKind::ExamineVertex`] for every dequeued vertex,
/// [`EventKind::VertexAdded`] when it is appended to the output and
/// [`EventKind::ExamineEdge`] for every non-self outgoing edge relaxed.
///
/// The order among vertices whose in-degree reaches zero together is
/// unspecified.
pub struct SourceFirstTopologicalSort<'g, G: GraphBase> {
    graph: &'g G,
    run: AlgorithmRun<G::Vertex, G::Edge>,
    in_degrees: FxHashMap<G::Vertex, usize>,
    sorted: Vec<G::Vertex>,
    queue: IndexedPriorityQueue<G::Vertex, usize>,
}

impl<'g, G> SourceFirstTopologicalSort<'g, G>
where
    G: VertexEnumerable + EdgeEnumerable + OutEdgeQueryable,
    G::Vertex: 'static,
    G::Edge: 'static,
{
    /// Creates a sort over `graph` with default configuration.
    pub fn new(graph: &'g G) -> Self {
        Self::with_config(graph, AlgorithmConfig::default())
    }

    /// Creates a sort over `graph` with custom configuration.
    pub fn with_config(graph: &'g G, config: AlgorithmConfig) -> Self {
        let capacity = config.queue_capacity(graph.vertex_count());
        Self {
            graph,
            run: AlgorithmRun::new(config),
            in_degrees: FxHashMap::default(),
            sorted: Vec::new(),
            queue: IndexedPriorityQueue::with_capacity(capacity),
        }
    }
}

impl<'g, G> SourceFirstTopologicalSort<'g, G>
where
    G: VertexEnumerable + EdgeEnumerable + OutEdgeQueryable,
{
    /// Polls `scope` instead of the sort's own cancellation flag.
    pub fn with_cancellation(mut self, scope: CancellationScope) -> Self {
        self.run.set_cancellation(scope);
        self
    }

    /// Returns the observer registry.
    pub fn observers(&self) -> &ObserverRegistry<G::Vertex, G::Edge> {
        self.run.observers()
    }

    /// Returns the vertices sorted so far.
    ///
    /// Complete after `Finished`; a prefix of a valid order after `Aborted`.
    pub fn sorted_vertices(&self) -> &[G::Vertex] {
        &self.sorted
    }

    /// Consumes the sort and returns its output sequence.
    pub fn into_sorted_vertices(self) -> Vec<G::Vertex> {
        self.sorted
    }

    /// Returns the residual in-degree of every vertex.
    ///
    /// All zeros after `Finished`.
    pub fn in_degrees(&self) -> &FxHashMap<G::Vertex, usize> {
        &self.in_degrees
    }

    /// Runs the sort and writes the output sequence into `sink`.
    ///
    /// `sink` is cleared first. On error it is left empty.
    pub fn compute_into(&mut self, sink: &mut Vec<G::Vertex>) -> Result<ComputationState> {
        sink.clear();
        let state = self.compute()?;
        sink.extend(self.sorted.iter().cloned());
        Ok(state)
    }

    fn seed(&mut self) -> Result<()> {
        let graph = self.graph;

        for vertex in graph.vertices() {
            self.in_degrees.insert(vertex, 0);
        }
        for edge in graph.edges() {
            if edge.is_self_edge() {
                continue;
            }
            if let Some(degree) = self.in_degrees.get_mut(edge.target()) {
                *degree += 1;
            }
        }
        for vertex in graph.vertices() {
            let degree = self.in_degrees.get(&vertex).copied().unwrap_or(0);
            self.queue.add(degree, vertex)?;
        }
        Ok(())
    }

    /// Main loop. Returns true if stopped by cancellation.
    fn sort(&mut self) -> Result<bool> {
        let graph = self.graph;
        self.seed()?;

        while !self.queue.is_empty() {
            if self.run.is_cancelling() {
                return Ok(true);
            }

            let (_, vertex) = self.queue.remove_min()?;
            self.run
                .notify(EventKind::ExamineVertex, || AlgorithmEvent::ExamineVertex(vertex.clone()));

            let residual = self.in_degrees.get(&vertex).copied().unwrap_or(0);
            if residual != 0 {
                return Err(Error::CycleDetected {
                    vertex: format!("{:?}", vertex),
                });
            }

            self.sorted.push(vertex.clone());
            self.run
                .notify(EventKind::VertexAdded, || AlgorithmEvent::VertexAdded(vertex.clone()));

            for edge in graph.out_edges(&vertex) {
                if edge.is_self_edge() {
                    continue;
                }
                let target = edge.target().clone();
                self.run
                    .notify(EventKind::ExamineEdge, || AlgorithmEvent::ExamineEdge(edge.clone()));

                if let Some(degree) = self.in_degrees.get_mut(&target) {
                    *degree = degree.saturating_sub(1);
                    self.queue.update(&target, *degree)?;
                }
            }
        }
        Ok(false)
    }
}

impl<'g, G> GraphAlgorithm for SourceFirstTopologicalSort<'g, G>
where
    G: VertexEnumerable + EdgeEnumerable + OutEdgeQueryable,
{
    fn name(&self) -> &'static str {
        "source_first_topological_sort"
    }

    fn state(&self) -> ComputationState {
        self.run.state()
    }

    fn cancellation(&self) -> &CancellationScope {
        self.run.cancellation()
    }

    fn initialize(&mut self) {
        self.in_degrees.clear();
        self.sorted.clear();
        self.queue.clear();
        self.run.reset();
    }

    fn compute(&mut self) -> Result<ComputationState> {
        self.initialize();
        let name = self.name();
        self.run.begin(name, self.graph.vertex_count());
        let outcome = self.sort();
        self.run.conclude(name, outcome)
    }
}

/// Sorts `graph` topologically.
///
/// # Errors
///
/// Returns [`Error::CycleDetected`] if the graph is not acyclic.
///
/// # Example
///
/// ```
/// use trellis_algorithms::topological_sort;
/// use trellis_core::AdjacencyGraph;
///
/// let graph = AdjacencyGraph::from_edges([("a", "b"), ("b", "c")]);
/// assert_eq!(topological_sort(&graph).unwrap(), vec!["a", "b", "c"]);
/// ```
pub fn topological_sort<G>(graph: &G) -> Result<Vec<G::Vertex>>
where
    G: VertexEnumerable + EdgeEnumerable + OutEdgeQueryable,
    G::Vertex: 'static,
    G::Edge: 'static,
{
    let mut sort = SourceFirstTopologicalSort::new(graph);
    sort.compute()?;
    Ok(sort.into_sorted_vertices())
}
