//! Observers that record the vertices or edges of one event kind.

use crate::observer::{EventKind, ObserverRegistry, Subscription};
use parking_lot::Mutex;
use std::sync::Arc;
use trellis_common::utils::error::Result;

/// Records the vertex of every event of one kind, in dispatch order.
#[derive(Debug)]
pub struct VertexRecorder<V> {
    recorded: Arc<Mutex<Vec<V>>>,
    subscription: Subscription,
}

impl<V: Clone + Send + 'static> VertexRecorder<V> {
    /// Attaches a recorder to `registry` for events of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](trellis_common::Error::InvalidArgument)
    /// if `kind` carries edges.
    pub fn attach<E: 'static>(registry: &ObserverRegistry<V, E>, kind: EventKind) -> Result<Self> {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&recorded);
        let subscription =
            registry.on_vertex(kind, move |vertex| sink.lock().push(vertex.clone()))?;
        Ok(Self {
            recorded,
            subscription,
        })
    }

    /// Returns a snapshot of the recorded vertices.
    #[must_use]
    pub fn recorded(&self) -> Vec<V> {
        self.recorded.lock().clone()
    }

    /// Returns the number of recorded vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recorded.lock().len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recorded.lock().is_empty()
    }

    /// Discards what has been recorded so far.
    pub fn clear(&self) {
        self.recorded.lock().clear();
    }

    /// Returns the event kind being recorded.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.subscription.kind()
    }

    /// Stops recording and returns everything recorded.
    pub fn detach(self) -> Vec<V> {
        self.subscription.detach();
        std::mem::take(&mut *self.recorded.lock())
    }
}

/// Records the edge of every event of one kind, in dispatch order.
#[derive(Debug)]
pub struct EdgeRecorder<E> {
    recorded: Arc<Mutex<Vec<E>>>,
    subscription: Subscription,
}

impl<E: Clone + Send + 'static> EdgeRecorder<E> {
    /// Attaches a recorder to `registry` for events of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](trellis_common::Error::InvalidArgument)
    /// if `kind` carries vertices.
    pub fn attach<V: 'static>(registry: &ObserverRegistry<V, E>, kind: EventKind) -> Result<Self> {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&recorded);
        let subscription = registry.on_edge(kind, move |edge| sink.lock().push(edge.clone()))?;
        Ok(Self {
            recorded,
            subscription,
        })
    }

    /// Returns a snapshot of the recorded edges.
    #[must_use]
    pub fn recorded(&self) -> Vec<E> {
        self.recorded.lock().clone()
    }

    /// Returns the number of recorded edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recorded.lock().len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recorded.lock().is_empty()
    }

    /// Discards what has been recorded so far.
    pub fn clear(&self) {
        self.recorded.lock().clear();
    }

    /// Returns the event kind being recorded.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.subscription.kind()
    }

    /// Stops recording and returns everything recorded.
    pub fn detach(self) -> Vec<E> {
        self.subscription.detach();
        std::mem::take(&mut *self.recorded.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::AlgorithmEvent;
    use trellis_common::Error;

    #[test]
    fn test_vertex_recorder_collects_in_order() {
        let registry: ObserverRegistry<u32, (u32, u32)> = ObserverRegistry::new();
        let recorder = VertexRecorder::attach(&registry, EventKind::VertexAdded).unwrap();

        registry.dispatch(&AlgorithmEvent::VertexAdded(3));
        registry.dispatch(&AlgorithmEvent::ExamineVertex(9));
        registry.dispatch(&AlgorithmEvent::VertexAdded(1));

        assert_eq!(recorder.recorded(), vec![3, 1]);
        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.kind(), EventKind::VertexAdded);

        recorder.clear();
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_edge_recorder_detach_stops_recording() {
        let registry: ObserverRegistry<u32, (u32, u32)> = ObserverRegistry::new();
        let recorder = EdgeRecorder::attach(&registry, EventKind::TreeEdge).unwrap();

        registry.dispatch(&AlgorithmEvent::TreeEdge((1, 2)));
        let edges = recorder.detach();
        assert_eq!(edges, vec![(1, 2)]);
        assert_eq!(registry.handler_count(EventKind::TreeEdge), 0);
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let registry: ObserverRegistry<u32, (u32, u32)> = ObserverRegistry::new();
        assert!(matches!(
            VertexRecorder::attach(&registry, EventKind::ExamineEdge),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            EdgeRecorder::attach(&registry, EventKind::FinishVertex),
            Err(Error::InvalidArgument(_))
        ));
    }
}
