//! Row-block decomposition of the interior grid
//!
//! Maps the interior rows onto a fixed number of workers. Blocks are
//! contiguous, non-overlapping, and cover the interior exactly. A worker
//! count that does not divide the row count is rejected up front rather than
//! silently truncated.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// One worker's contiguous block of interior rows
///
/// Whether a block touches a physical edge is carried on the value itself,
/// so the kernel never compares worker identities to find the heated edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Worker index in `0..workers`
    pub worker_id: usize,
    /// Number of rows owned by this worker
    pub local_rows: usize,
    /// Global index of the first owned row
    pub row_offset: usize,
    /// Block includes the row under the cold top edge
    pub has_top_edge: bool,
    /// Block includes the row above the heated bottom edge
    pub has_bottom_edge: bool,
}

impl Partition {
    /// Translate a local row index into its global row index.
    ///
    /// # Panics
    ///
    /// Panics if `local_row` is outside the block.
    #[must_use]
    pub fn global_row(&self, local_row: usize) -> usize {
        assert!(
            local_row < self.local_rows,
            "local row {local_row} outside a block of {} rows",
            self.local_rows
        );
        self.row_offset + local_row
    }

    /// Whether this block owns the given global row.
    #[must_use]
    pub fn owns(&self, global_row: usize) -> bool {
        (self.row_offset..self.row_offset + self.local_rows).contains(&global_row)
    }
}

/// Decomposition of the interior into equal row blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    rows: usize,
    cols: usize,
    workers: usize,
    rows_per_worker: usize,
}

impl Layout {
    /// Split `rows` interior rows across `workers` equal blocks.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyGrid`] for a zero dimension,
    /// [`ConfigError::NoWorkers`] for zero workers, and
    /// [`ConfigError::UnevenPartition`] when the rows do not split evenly.
    pub fn new(rows: usize, cols: usize, workers: usize) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid { rows, cols });
        }
        if workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if rows % workers != 0 {
            return Err(ConfigError::UnevenPartition { rows, workers });
        }
        Ok(Self {
            rows,
            cols,
            workers,
            rows_per_worker: rows / workers,
        })
    }

    /// Total interior rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total interior columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of row blocks.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Rows in every block.
    #[must_use]
    pub fn rows_per_worker(&self) -> usize {
        self.rows_per_worker
    }

    /// The block owned by `worker_id`.
    ///
    /// # Panics
    ///
    /// Panics if `worker_id` is out of range.
    #[must_use]
    pub fn partition(&self, worker_id: usize) -> Partition {
        assert!(
            worker_id < self.workers,
            "worker {worker_id} out of range for {} workers",
            self.workers
        );
        Partition {
            worker_id,
            local_rows: self.rows_per_worker,
            row_offset: worker_id * self.rows_per_worker,
            has_top_edge: worker_id == 0,
            has_bottom_edge: worker_id == self.workers - 1,
        }
    }

    /// The worker owning a global interior row.
    ///
    /// # Panics
    ///
    /// Panics if `global_row` is outside the interior.
    #[must_use]
    pub fn owner_of(&self, global_row: usize) -> usize {
        assert!(
            global_row < self.rows,
            "row {global_row} outside an interior of {} rows",
            self.rows
        );
        global_row / self.rows_per_worker
    }
}
