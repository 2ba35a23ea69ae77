//! Observer registration and event dispatch.
//!
//! Handlers are registered per [`EventKind`] and invoked synchronously, in
//! registration order, whenever an algorithm reaches the matching point of
//! its run. Registration returns a [`Subscription`] that detaches the handler
//! when dropped.
//!
//! Dispatch iterates over a snapshot of the handler list taken before the
//! first handler runs. A handler may therefore detach handlers of other
//! event kinds (or subscribe new ones) without deadlocking. A handler that
//! detaches itself still completes the dispatch in progress; relying on that
//! is discouraged.
//!
//! Handlers receive events by shared reference and cannot reach the graph or
//! the algorithm's maps mutably. Side effects go through captured state.

use parking_lot::Mutex;
use smallvec::SmallVec;
use std::sync::{Arc, Weak};
use trellis_common::utils::error::{Error, Result};

/// The points of a run that observers can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A vertex was reached for the first time.
    DiscoverVertex,
    /// A vertex was taken off the work queue.
    ExamineVertex,
    /// An edge was inspected.
    ExamineEdge,
    /// An edge was selected into the result tree.
    TreeEdge,
    /// All edges of a vertex have been processed.
    FinishVertex,
    /// A vertex was appended to the output sequence.
    VertexAdded,
}

impl EventKind {
    /// Returns true if events of this kind carry a vertex.
    #[must_use]
    pub const fn is_vertex_event(self) -> bool {
        matches!(
            self,
            Self::DiscoverVertex | Self::ExamineVertex | Self::FinishVertex | Self::VertexAdded
        )
    }

    /// Returns true if events of this kind carry an edge.
    #[must_use]
    pub const fn is_edge_event(self) -> bool {
        !self.is_vertex_event()
    }
}

/// An event raised during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum AlgorithmEvent<V, E> {
    /// See [`EventKind::DiscoverVertex`].
    DiscoverVertex(V),
    /// See [`EventKind::ExamineVertex`].
    ExamineVertex(V),
    /// See [`EventKind::ExamineEdge`].
    ExamineEdge(E),
    /// See [`EventKind::TreeEdge`].
    TreeEdge(E),
    /// See [`EventKind::FinishVertex`].
    FinishVertex(V),
    /// See [`EventKind::VertexAdded`].
    VertexAdded(V),
}

impl<V, E> AlgorithmEvent<V, E> {
    /// Returns the kind of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::DiscoverVertex(_) => EventKind::DiscoverVertex,
            Self::ExamineVertex(_) => EventKind::ExamineVertex,
            Self::ExamineEdge(_) => EventKind::ExamineEdge,
            Self::TreeEdge(_) => EventKind::TreeEdge,
            Self::FinishVertex(_) => EventKind::FinishVertex,
            Self::VertexAdded(_) => EventKind::VertexAdded,
        }
    }

    /// Returns the vertex carried by a vertex event.
    #[must_use]
    pub fn vertex(&self) -> Option<&V> {
        match self {
            Self::DiscoverVertex(v)
            | Self::ExamineVertex(v)
            | Self::FinishVertex(v)
            | Self::VertexAdded(v) => Some(v),
            Self::ExamineEdge(_) | Self::TreeEdge(_) => None,
        }
    }

    /// Returns the edge carried by an edge event.
    #[must_use]
    pub fn edge(&self) -> Option<&E> {
        match self {
            Self::ExamineEdge(e) | Self::TreeEdge(e) => Some(e),
            _ => None,
        }
    }
}

type Handler<V, E> = Arc<dyn Fn(&AlgorithmEvent<V, E>) + Send + Sync>;

struct Registration<V, E> {
    id: u64,
    kind: EventKind,
    handler: Handler<V, E>,
}

struct Registrations<V, E> {
    next_id: u64,
    entries: Vec<Registration<V, E>>,
}

/// Detach hook a [`Subscription`] holds without knowing the event types.
trait Detach: Send + Sync {
    fn detach(&self, id: u64);
    fn is_registered(&self, id: u64) -> bool;
}

impl<V, E> Detach for Mutex<Registrations<V, E>> {
    fn detach(&self, id: u64) {
        self.lock().entries.retain(|r| r.id != id);
    }

    fn is_registered(&self, id: u64) -> bool {
        self.lock().entries.iter().any(|r| r.id == id)
    }
}

/// The set of observers attached to one algorithm instance.
pub struct ObserverRegistry<V, E> {
    inner: Arc<Mutex<Registrations<V, E>>>,
}

impl<V: 'static, E: 'static> ObserverRegistry<V, E> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registrations {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Attaches `handler` to events of `kind`.
    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> Subscription
    where
        F: Fn(&AlgorithmEvent<V, E>) + Send + Sync + 'static,
    {
        let id = {
            let mut registrations = self.inner.lock();
            let id = registrations.next_id;
            registrations.next_id += 1;
            registrations.entries.push(Registration {
                id,
                kind,
                handler: Arc::new(handler),
            });
            id
        };

        let weak: Weak<Mutex<Registrations<V, E>>> = Arc::downgrade(&self.inner);
        let registry: Weak<dyn Detach> = weak;
        Subscription {
            registry: Some(registry),
            id,
            kind,
        }
    }

    /// Attaches a handler that receives the vertex of a vertex event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `kind` carries edges.
    pub fn on_vertex<F>(&self, kind: EventKind, handler: F) -> Result<Subscription>
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        if !kind.is_vertex_event() {
            return Err(Error::InvalidArgument(format!(
                "{:?} does not carry a vertex",
                kind
            )));
        }
        Ok(self.subscribe(kind, move |event| {
            if let Some(vertex) = event.vertex() {
                handler(vertex);
            }
        }))
    }

    /// Attaches a handler that receives the edge of an edge event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `kind` carries vertices.
    pub fn on_edge<F>(&self, kind: EventKind, handler: F) -> Result<Subscription>
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        if !kind.is_edge_event() {
            return Err(Error::InvalidArgument(format!(
                "{:?} does not carry an edge",
                kind
            )));
        }
        Ok(self.subscribe(kind, move |event| {
            if let Some(edge) = event.edge() {
                handler(edge);
            }
        }))
    }
}

impl<V, E> ObserverRegistry<V, E> {
    /// Returns the number of handlers attached to `kind`.
    #[must_use]
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.inner
            .lock()
            .entries
            .iter()
            .filter(|r| r.kind == kind)
            .count()
    }

    /// Returns true if at least one handler listens to `kind`.
    #[must_use]
    pub fn has_observers(&self, kind: EventKind) -> bool {
        self.inner.lock().entries.iter().any(|r| r.kind == kind)
    }

    /// Detaches every handler. Outstanding subscriptions become inert.
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    /// Invokes the handlers of the event's kind, in registration order.
    pub fn dispatch(&self, event: &AlgorithmEvent<V, E>) {
        let kind = event.kind();
        let handlers: SmallVec<[Handler<V, E>; 4]> = self
            .inner
            .lock()
            .entries
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| Arc::clone(&r.handler))
            .collect();

        for handler in handlers {
            handler(event);
        }
    }
}

impl<V: 'static, E: 'static> Default for ObserverRegistry<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> std::fmt::Debug for ObserverRegistry<V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("handlers", &self.inner.lock().entries.len())
            .finish()
    }
}

/// Handle to an attached handler.
///
/// Dropping the subscription detaches the handler.
#[must_use = "dropping a subscription detaches its handler immediately"]
pub struct Subscription {
    registry: Option<Weak<dyn Detach>>,
    id: u64,
    kind: EventKind,
}

impl Subscription {
    /// Returns the event kind the handler is attached to.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Returns true while the handler is still registered.
    pub fn is_attached(&self) -> bool {
        self.registry
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|registry| registry.is_registered(self.id))
    }

    /// Detaches the handler now.
    pub fn detach(mut self) {
        self.release();
    }

    /// Leaves the handler attached for as long as the registry lives.
    pub fn forget(mut self) {
        self.registry = None;
    }

    fn release(&mut self) {
        if let Some(registry) = self.registry.take().and_then(|weak| weak.upgrade()) {
            registry.detach(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}
