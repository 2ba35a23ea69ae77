//! Error types for Trellis.
//!
//! One enum covers every structural failure an algorithm run can report.
//! Element identities are rendered with `Debug` at the failure site so the
//! error stays independent of the vertex and edge types in play.
//!
//! Cancellation is deliberately absent: an aborted run is a normal terminal
//! state, not an error.

use thiserror::Error;

/// Result type alias for Trellis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Trellis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A required argument was missing or referred to something absent
    /// from the graph (for example a root vertex).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Topological sort dequeued a vertex that still has unprocessed
    /// predecessors.
    #[error("graph is not acyclic: cycle through vertex {vertex}")]
    CycleDetected {
        /// The vertex whose residual in-degree was positive.
        vertex: String,
    },

    /// `peek_min` or `remove_min` on an empty priority queue.
    #[error("priority queue is empty")]
    EmptyQueue,

    /// The element was never registered with the collection.
    #[error("element not found: {0}")]
    MissingElement(String),

    /// The element is already registered with the collection.
    #[error("element already present: {0}")]
    DuplicateElement(String),

    /// An edge weight was negative and the consumer rejects such input.
    #[error("negative weight {weight} on edge {edge}")]
    NegativeWeight {
        /// The offending edge.
        edge: String,
        /// Its weight.
        weight: f64,
    },
}

impl Error {
    /// Builds a [`Error::MissingElement`] from any debuggable element.
    pub fn missing(element: &impl std::fmt::Debug) -> Self {
        Self::MissingElement(format!("{element:?}"))
    }

    /// Builds a [`Error::DuplicateElement`] from any debuggable element.
    pub fn duplicate(element: &impl std::fmt::Debug) -> Self {
        Self::DuplicateElement(format!("{element:?}"))
    }

    /// Returns true if this error means the input graph had a cycle.
    #[must_use]
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CycleDetected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::CycleDetected {
            vertex: "A".to_string(),
        };
        assert_eq!(err.to_string(), "graph is not acyclic: cycle through vertex A");
        assert!(err.is_cycle());

        assert_eq!(Error::EmptyQueue.to_string(), "priority queue is empty");
        assert_eq!(Error::missing(&7).to_string(), "element not found: 7");
        assert_eq!(
            Error::duplicate(&"x").to_string(),
            "element already present: \"x\""
        );
    }

    #[test]
    fn test_negative_weight_display() {
        let err = Error::NegativeWeight {
            edge: "1 -> 2".to_string(),
            weight: -1.5,
        };
        assert_eq!(err.to_string(), "negative weight -1.5 on edge 1 -> 2");
        assert!(!err.is_cycle());
    }
}
