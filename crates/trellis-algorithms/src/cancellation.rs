//! Cooperative cancellation.
//!
//! A run polls its scope at every outer loop boundary and stops with
//! [`ComputationState::Aborted`](crate::ComputationState::Aborted) once the
//! flag is raised. Nothing is preempted: the flag is only observed between
//! whole steps, so every structure the run owns stays consistent.
//!
//! There is no timeout primitive. Callers that want one raise the flag from
//! a timer thread or from an observer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A shared, cloneable cancellation flag.
///
/// Clones observe the same flag, so one clone can be handed to an observer
/// or another thread while the algorithm keeps polling its own.
#[derive(Debug, Clone, Default)]
pub struct CancellationScope {
    flag: Arc<AtomicBool>,
}

impl CancellationScope {
    /// Creates a scope with the flag lowered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Lowers the flag so the scope can drive another run.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Release);
    }

    /// Returns true once [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelling(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
