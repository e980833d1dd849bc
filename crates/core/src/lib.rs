//! Steady-state heat-plate relaxation
//!
//! Solves the steady-state heat equation on a rectangular plate by Jacobi
//! relaxation: every interior cell is repeatedly replaced by the average of
//! its four neighbors until the largest temperature change in a sweep drops
//! to the convergence threshold, or an iteration cap is hit. The plate is
//! heated along its right and bottom edges by fixed linear ramps and held
//! cold along the top and left.
//!
//! The engine decomposes the interior into contiguous row blocks, one per
//! worker. Workers exchange one-row halos at the block cuts, publish their
//! local maximum changes into a shared reduction, and rendezvous at two
//! barriers per sweep so every value is computed from the previous
//! generation only. A single worker degenerates to the serial baseline with
//! no communication at all; its results are bit-identical to any other
//! worker count.

// Storage and decomposition
pub mod boundary;
pub mod field;
pub mod partition;

// Sweep machinery
pub mod kernel;
pub mod reduce;

// Run orchestration
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod progress;

// Re-export the run-facing types
pub use boundary::BoundaryValues;
pub use config::SolverConfig;
pub use controller::{CancelToken, ControlState, IterationController};
pub use engine::{RelaxationSolver, RunOutcome};
pub use error::ConfigError;
pub use field::Field;
pub use partition::{Layout, Partition};
pub use progress::{NullReporter, ProbeSample, ProgressReporter};
pub use reduce::DeltaSlots;
