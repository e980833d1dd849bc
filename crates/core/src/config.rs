//! Solver configuration
//!
//! The defaults match the classic workshop exercise: a 1000x1000 interior
//! relaxed to a maximum change of 0.01 (about 3400 sweeps), with a
//! checkpoint every 100 sweeps.

use crate::error::ConfigError;
use crate::partition::Layout;
use serde::{Deserialize, Serialize};

/// Parameters of one relaxation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Interior row count, excluding the two boundary rows
    pub rows: usize,
    /// Interior column count, excluding the two boundary columns
    pub cols: usize,
    /// Number of row-block workers; 1 runs the serial baseline
    pub workers: usize,
    /// Hard cap on relaxation sweeps
    pub max_iterations: u32,
    /// Convergence threshold on the global maximum temperature change
    pub threshold: f64,
    /// Invoke the checkpoint reporter every this many sweeps; 0 disables
    pub report_interval: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            rows: 1000,
            cols: 1000,
            workers: 1,
            max_iterations: 4000,
            threshold: 0.01,
            report_interval: 100,
        }
    }
}

impl SolverConfig {
    /// Validate the configuration and derive the row-block layout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroIterations`] for a zero iteration cap,
    /// and whatever [`Layout::new`] rejects for the grid and worker counts.
    pub fn layout(&self) -> Result<Layout, ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        Layout::new(self.rows, self.cols, self.workers)
    }
}
