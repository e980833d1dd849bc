//! Sweep loop control: convergence, iteration cap, cancellation
//!
//! The controller counts completed sweeps and decides whether to keep
//! going. In the partitioned engine every worker runs its own replica over
//! the same reduced inputs, so all replicas transition identically and stop
//! on the same sweep.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Where the sweep loop stands after the most recent completed sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlState {
    /// Keep sweeping
    Running,
    /// The global maximum change dropped to the threshold or below
    Converged,
    /// The iteration cap was reached without convergence. A normal
    /// terminal state, not an error; the final delta tells them apart.
    IterationLimit,
    /// An external cancellation request was observed at a sweep boundary
    Cancelled,
}

impl ControlState {
    /// Terminal states end the run.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Cloneable handle requesting a stop at the next sweep boundary
///
/// Sweeps are uninterruptible and runs can last thousands of them; the
/// token is observed once per completed sweep. Observing it never alters
/// any computed value.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create an unset token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop. Every clone of the token observes it.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Drives the iteration loop for one worker
#[derive(Debug, Clone)]
pub struct IterationController {
    threshold: f64,
    max_iterations: u32,
    report_interval: u32,
    iteration: u32,
    state: ControlState,
}

impl IterationController {
    /// Controller starting before the first sweep.
    #[must_use]
    pub fn new(threshold: f64, max_iterations: u32, report_interval: u32) -> Self {
        Self {
            threshold,
            max_iterations,
            report_interval,
            iteration: 0,
            state: ControlState::Running,
        }
    }

    /// Record a completed sweep and evaluate the stop condition.
    ///
    /// Convergence wins over the iteration cap when both hold on the same
    /// sweep; cancellation is reported only when neither does.
    pub fn complete_sweep(&mut self, global_delta: f64, cancelled: bool) -> ControlState {
        debug_assert!(
            !self.state.is_terminal(),
            "sweep recorded after a terminal state"
        );
        self.iteration += 1;
        self.state = if global_delta <= self.threshold {
            ControlState::Converged
        } else if self.iteration >= self.max_iterations {
            ControlState::IterationLimit
        } else if cancelled {
            ControlState::Cancelled
        } else {
            ControlState::Running
        };
        self.state
    }

    /// Completed sweep count; once terminal, the stopping iteration.
    #[must_use]
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Current loop state.
    #[must_use]
    pub fn state(&self) -> ControlState {
        self.state
    }

    /// Whether the sweep just completed falls on the report interval.
    #[must_use]
    pub fn should_report(&self) -> bool {
        self.report_interval != 0 && self.iteration % self.report_interval == 0
    }
}
