//! Algorithm lifecycle.
//!
//! Every algorithm follows the same state machine:
//!
//! ```text
//! NotStarted --compute()--> Running --+--> Finished   (ran to completion)
//!                                     +--> Aborted    (cancellation observed, or error)
//! ```
//!
//! `compute` always clears previously derived state before starting, so a
//! second call is a reset followed by a fresh run. Results read after an
//! `Aborted` run are whatever the run had produced when it stopped.

use crate::cancellation::CancellationScope;
use crate::config::AlgorithmConfig;
use crate::observer::{AlgorithmEvent, EventKind, ObserverRegistry};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use trellis_common::utils::error::{Error, Result};

/// Where a run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ComputationState {
    /// `compute` has not been called.
    #[default]
    NotStarted,
    /// `compute` is executing.
    Running,
    /// The last run completed.
    Finished,
    /// The last run stopped early.
    Aborted,
}

impl ComputationState {
    /// Returns true for `Finished` and `Aborted`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Aborted)
    }
}

/// Common interface of every algorithm.
pub trait GraphAlgorithm {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns the current lifecycle state.
    fn state(&self) -> ComputationState;

    /// Returns the cancellation scope polled by this algorithm.
    fn cancellation(&self) -> &CancellationScope;

    /// Returns true if cancellation has been requested.
    fn is_cancelling(&self) -> bool {
        self.cancellation().is_cancelling()
    }

    /// Clears all derived state (visited sets, maps, output sequences).
    ///
    /// The cancellation flag and registered observers are left untouched.
    fn initialize(&mut self);

    /// Runs the algorithm to completion or cancellation.
    ///
    /// Returns `Finished` or `Aborted`. Structural violations are returned
    /// as errors and leave the algorithm `Aborted`.
    fn compute(&mut self) -> Result<ComputationState>;
}

/// Per-instance run bookkeeping shared by the algorithm implementations.
///
/// Holds the lifecycle state, the cancellation scope, the configuration and
/// the observer registry.
#[derive(Debug)]
pub struct AlgorithmRun<V, E> {
    state: ComputationState,
    cancellation: CancellationScope,
    config: AlgorithmConfig,
    observers: ObserverRegistry<V, E>,
}

impl<V: Debug + 'static, E: Debug + 'static> AlgorithmRun<V, E> {
    /// Creates a run with its own cancellation scope.
    #[must_use]
    pub fn new(config: AlgorithmConfig) -> Self {
        Self {
            state: ComputationState::NotStarted,
            cancellation: CancellationScope::new(),
            config,
            observers: ObserverRegistry::new(),
        }
    }
}

impl<V: Debug, E: Debug> AlgorithmRun<V, E> {
    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ComputationState {
        self.state
    }

    /// Returns the cancellation scope.
    #[must_use]
    pub fn cancellation(&self) -> &CancellationScope {
        &self.cancellation
    }

    /// Replaces the cancellation scope, typically with a clone shared by the caller.
    pub fn set_cancellation(&mut self, scope: CancellationScope) {
        self.cancellation = scope;
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &AlgorithmConfig {
        &self.config
    }

    /// Returns the observer registry.
    #[must_use]
    pub fn observers(&self) -> &ObserverRegistry<V, E> {
        &self.observers
    }

    /// Returns true if cancellation has been requested.
    #[must_use]
    pub fn is_cancelling(&self) -> bool {
        self.cancellation.is_cancelling()
    }

    /// Resets the state to `NotStarted`.
    pub fn reset(&mut self) {
        self.state = ComputationState::NotStarted;
    }

    /// Enters `Running`.
    pub fn begin(&mut self, algorithm: &'static str, vertex_count: usize) {
        tracing::debug!(algorithm, vertex_count, "starting computation");
        self.state = ComputationState::Running;
    }

    /// Leaves `Running` after the main loop returned normally.
    pub fn finish(&mut self, algorithm: &'static str, aborted: bool) -> ComputationState {
        self.state = if aborted {
            tracing::warn!(algorithm, "computation aborted by cancellation");
            ComputationState::Aborted
        } else {
            tracing::debug!(algorithm, "computation finished");
            ComputationState::Finished
        };
        self.state
    }

    /// Leaves `Running` after a structural error.
    pub fn fail(&mut self, algorithm: &'static str, error: &Error) {
        tracing::warn!(algorithm, %error, "computation failed");
        self.state = ComputationState::Aborted;
    }

    /// Converts the main loop's outcome into the public result.
    pub fn conclude(
        &mut self,
        algorithm: &'static str,
        outcome: Result<bool>,
    ) -> Result<ComputationState> {
        match outcome {
            Ok(aborted) => Ok(self.finish(algorithm, aborted)),
            Err(error) => {
                self.fail(algorithm, &error);
                Err(error)
            }
        }
    }

    /// Dispatches an event if anyone listens to `kind`.
    ///
    /// The event is only built when a handler is attached.
    pub fn notify(&self, kind: EventKind, event: impl FnOnce() -> AlgorithmEvent<V, E>) {
        if !self.observers.has_observers(kind) && !self.config.trace_events {
            return;
        }
        let event = event();
        if self.config.trace_events {
            tracing::trace!(?event, "dispatching event");
        }
        self.observers.dispatch(&event);
    }
}
