//! Configuration error taxonomy
//!
//! Every variant is fatal before any computation starts: the solver refuses
//! to construct rather than truncating a partition or guessing a remainder
//! policy. Reaching the iteration cap without converging is a normal
//! terminal state, not an error.

use core::fmt;

/// Rejected solver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The interior grid has a zero dimension.
    EmptyGrid {
        /// Configured interior rows
        rows: usize,
        /// Configured interior columns
        cols: usize,
    },
    /// The worker count is zero.
    NoWorkers,
    /// The worker count does not evenly divide the interior rows.
    UnevenPartition {
        /// Configured interior rows
        rows: usize,
        /// Configured worker count
        workers: usize,
    },
    /// The iteration cap is zero, so no sweep could ever run.
    ZeroIterations,
    /// A restart field does not match the configured interior size.
    InitialSizeMismatch {
        /// Interior size the configuration expects
        expected: (usize, usize),
        /// Size of the supplied field
        actual: (usize, usize),
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { rows, cols } => {
                write!(f, "interior grid must be non-empty, got {rows}x{cols}")
            }
            Self::NoWorkers => write!(f, "worker count must be at least 1"),
            Self::UnevenPartition { rows, workers } => write!(
                f,
                "{workers} workers cannot evenly split {rows} interior rows"
            ),
            Self::ZeroIterations => write!(f, "maximum iteration count must be at least 1"),
            Self::InitialSizeMismatch { expected, actual } => write!(
                f,
                "initial field is {}x{}, expected {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
