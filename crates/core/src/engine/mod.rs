//! Relaxation engine: validated construction, backend dispatch, outcome
//!
//! [`RelaxationSolver`] validates its configuration up front, generates the
//! immutable boundary values once, and runs to a terminal state. A single
//! worker runs the serial baseline in place; more workers run the
//! row-partitioned engine. Both share the same kernel and controller, so a
//! run's observable results do not depend on the worker count.

mod serial;
mod threaded;

use crate::boundary::BoundaryValues;
use crate::config::SolverConfig;
use crate::controller::{CancelToken, ControlState};
use crate::error::ConfigError;
use crate::field::Field;
use crate::partition::Layout;
use crate::progress::{NullReporter, ProgressReporter};
use std::sync::Arc;
use tracing::info;

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Terminal state the controller stopped in
    pub state: ControlState,
    /// Sweep at which the run stopped
    pub iterations: u32,
    /// Global maximum change of the final sweep
    pub final_delta: f64,
    /// Interior temperatures after the final sweep
    pub field: Field,
}

/// Partitioned Jacobi relaxation solver for the heated plate
pub struct RelaxationSolver {
    config: SolverConfig,
    layout: Layout,
    boundary: BoundaryValues,
    initial: Option<Field>,
    reporter: Arc<dyn ProgressReporter>,
    cancel: CancelToken,
}

impl std::fmt::Debug for RelaxationSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelaxationSolver")
            .field("config", &self.config)
            .field("layout", &self.layout)
            .field("boundary", &self.boundary)
            .field("initial", &self.initial)
            .field("cancel", &self.cancel)
            .finish_non_exhaustive()
    }
}

impl RelaxationSolver {
    /// Validate the configuration and prepare the boundary values.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an empty grid, zero workers, a worker
    /// count that does not divide the rows, or a zero iteration cap —
    /// always before any computation starts.
    pub fn new(config: SolverConfig) -> Result<Self, ConfigError> {
        let layout = config.layout()?;
        let boundary = BoundaryValues::generate(config.rows, config.cols);
        info!(
            "relaxation solver ready: {}x{} interior, {} workers, threshold {}",
            config.rows, config.cols, config.workers, config.threshold
        );
        Ok(Self {
            config,
            layout,
            boundary,
            initial: None,
            reporter: Arc::new(NullReporter),
            cancel: CancelToken::new(),
        })
    }

    /// Replace the no-op progress reporter.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Start from a previously relaxed field instead of a cold plate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InitialSizeMismatch`] when the field does not
    /// match the configured interior.
    pub fn with_initial(mut self, initial: Field) -> Result<Self, ConfigError> {
        if initial.rows() != self.config.rows || initial.cols() != self.config.cols {
            return Err(ConfigError::InitialSizeMismatch {
                expected: (self.config.rows, self.config.cols),
                actual: (initial.rows(), initial.cols()),
            });
        }
        self.initial = Some(initial);
        Ok(self)
    }

    /// Handle for requesting a stop at the next sweep boundary.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// The immutable heating elements this run relaxes against.
    #[must_use]
    pub fn boundary(&self) -> &BoundaryValues {
        &self.boundary
    }

    /// Configured parameters.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Run to a terminal state: converged, iteration cap, or cancelled.
    #[must_use]
    pub fn run(&self) -> RunOutcome {
        let outcome = if self.config.workers == 1 {
            serial::run(self)
        } else {
            threaded::run(self)
        };
        info!(
            "relaxation stopped at sweep {} with delta {:.6}: {:?}",
            outcome.iterations, outcome.final_delta, outcome.state
        );
        outcome
    }
}
