//! Fixed heating-element boundary values
//!
//! The plate is heated along its right edge and bottom edge by linear ramps
//! from 0 up to [`MAX_EDGE_TEMP`]; the top and left edges are held cold at
//! [`COLD_EDGE_TEMP`]. Both ramps are generated once, before the first
//! sweep, and never change for the lifetime of a run.

use serde::{Deserialize, Serialize};

/// Peak heating-element temperature, reached at the bottom-right corner
pub const MAX_EDGE_TEMP: f64 = 100.0;

/// Temperature of the cold top and left edges
pub const COLD_EDGE_TEMP: f64 = 0.0;

/// Immutable heating elements along the right and bottom plate edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryValues {
    vertical: Vec<f64>,
    horizontal: Vec<f64>,
}

impl BoundaryValues {
    /// Generate both heating ramps for an interior of `rows` x `cols`.
    ///
    /// The vertical element sits to the right of the plate, the horizontal
    /// element below it; both rise linearly to [`MAX_EDGE_TEMP`] at the far
    /// corner. One global formula is used regardless of how the rows are
    /// later partitioned, so every worker count sees identical boundary
    /// bits.
    #[must_use]
    pub fn generate(rows: usize, cols: usize) -> Self {
        Self {
            vertical: ramp(rows),
            horizontal: ramp(cols),
        }
    }

    /// Right-edge heating values, one per interior row.
    #[must_use]
    pub fn vertical(&self) -> &[f64] {
        &self.vertical
    }

    /// Bottom-edge heating values, one per interior column. Consulted only
    /// by the block owning the bottom edge.
    #[must_use]
    pub fn horizontal(&self) -> &[f64] {
        &self.horizontal
    }
}

fn ramp(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| MAX_EDGE_TEMP * (i + 1) as f64 / len as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ramps_reach_the_peak_at_the_far_corner() {
        let boundary = BoundaryValues::generate(1000, 500);
        assert_eq!(boundary.vertical().len(), 1000);
        assert_eq!(boundary.horizontal().len(), 500);
        assert_eq!(boundary.vertical()[999], MAX_EDGE_TEMP);
        assert_eq!(boundary.horizontal()[499], MAX_EDGE_TEMP);
    }

    #[test]
    fn ramps_rise_strictly() {
        let boundary = BoundaryValues::generate(64, 64);
        for pair in boundary.vertical().windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn first_step_is_one_ramp_increment() {
        let boundary = BoundaryValues::generate(1000, 1000);
        assert_relative_eq!(boundary.vertical()[0], 0.1);
        assert_relative_eq!(boundary.horizontal()[0], 0.1);
    }

    #[test]
    fn global_ramp_agrees_with_per_block_interpolation() {
        // Interpolating each block between its w*100/W endpoints lands on
        // the same values as the global formula, so blocks could generate
        // their own ramp segments independently.
        let rows = 100;
        let workers = 4;
        let block = rows / workers;
        let boundary = BoundaryValues::generate(rows, rows);
        for worker in 0..workers {
            let t_min = MAX_EDGE_TEMP * worker as f64 / workers as f64;
            let t_max = MAX_EDGE_TEMP * (worker + 1) as f64 / workers as f64;
            for i in 0..block {
                let expected = t_min + (t_max - t_min) * (i + 1) as f64 / block as f64;
                assert_relative_eq!(
                    boundary.vertical()[worker * block + i],
                    expected,
                    epsilon = 1e-12
                );
            }
        }
    }
}
