//! Algorithm configuration.

use serde::{Deserialize, Serialize};

/// Tuning and validation options shared by every algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmConfig {
    /// Initial priority queue capacity (None sizes it to the vertex count).
    pub initial_queue_capacity: Option<usize>,

    /// Whether Kruskal stops once it holds `|V| - 1` edges.
    pub kruskal_early_exit: bool,

    /// Whether spanning tree runs reject negative edge weights up front.
    pub reject_negative_weights: bool,

    /// Whether every dispatched event is logged at trace level.
    pub trace_events: bool,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            initial_queue_capacity: None,
            kruskal_early_exit: true,
            reject_negative_weights: false,
            trace_events: false,
        }
    }
}

impl AlgorithmConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial priority queue capacity.
    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.initial_queue_capacity = Some(capacity);
        self
    }

    /// Makes Kruskal scan every edge even after the tree is complete.
    #[must_use]
    pub fn without_early_exit(mut self) -> Self {
        self.kruskal_early_exit = false;
        self
    }

    /// Rejects graphs carrying negative edge weights.
    #[must_use]
    pub fn rejecting_negative_weights(mut self) -> Self {
        self.reject_negative_weights = true;
        self
    }

    /// Enables trace-level logging of dispatched events.
    #[must_use]
    pub fn with_event_tracing(mut self) -> Self {
        self.trace_events = true;
        self
    }

    /// Returns the queue capacity to use for a graph with `vertex_count` vertices.
    #[must_use]
    pub fn queue_capacity(&self, vertex_count: usize) -> usize {
        self.initial_queue_capacity.unwrap_or(vertex_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = AlgorithmConfig::new()
            .with_queue_capacity(8)
            .without_early_exit()
            .rejecting_negative_weights()
            .with_event_tracing();

        assert_eq!(config.queue_capacity(100), 8);
        assert!(!config.kruskal_early_exit);
        assert!(config.reject_negative_weights);
        assert!(config.trace_events);
    }

    #[test]
    fn test_defaults() {
        let config = AlgorithmConfig::default();
        assert_eq!(config.queue_capacity(42), 42);
        assert!(config.kruskal_early_exit);
        assert!(!config.reject_negative_weights);
    }
}
