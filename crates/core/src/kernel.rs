//! Jacobi relaxation sweep over one partition's rows
//!
//! Every new value is the average of the four previous-generation neighbor
//! values. Left and right neighbors always live in the same row; above and
//! below may cross a partition cut, in which case they come from the halo
//! rows in [`BlockContext`]. Physical edges resolve to the fixed boundary
//! values instead.

use crate::boundary::{BoundaryValues, COLD_EDGE_TEMP};
use crate::partition::Partition;

/// Neighbor sources for one block's sweep
pub struct BlockContext<'a> {
    /// The rows being swept
    pub partition: Partition,
    /// Immutable heating elements
    pub boundary: &'a BoundaryValues,
    /// Previous-generation copy of the neighbor row above the block.
    /// `None` exactly when the block has the physical top edge.
    pub halo_above: Option<&'a [f64]>,
    /// Previous-generation copy of the neighbor row below the block.
    /// `None` exactly when the block has the physical bottom edge.
    pub halo_below: Option<&'a [f64]>,
}

/// One Jacobi sweep over a block: read `src`, write `dst`, and return the
/// block's maximum absolute temperature change.
///
/// Reads only previous-generation values, so no in-progress update is ever
/// visible inside a sweep. The summation order is fixed; together with the
/// halo discipline this keeps results bit-identical across worker counts.
pub fn sweep_block(src: &[f64], dst: &mut [f64], cols: usize, ctx: &BlockContext<'_>) -> f64 {
    let rows = ctx.partition.local_rows;
    debug_assert_eq!(src.len(), rows * cols);
    debug_assert_eq!(dst.len(), rows * cols);
    debug_assert_eq!(ctx.halo_above.is_none(), ctx.partition.has_top_edge);
    debug_assert_eq!(ctx.halo_below.is_none(), ctx.partition.has_bottom_edge);
    if let Some(halo) = ctx.halo_above {
        debug_assert_eq!(halo.len(), cols);
    }
    if let Some(halo) = ctx.halo_below {
        debug_assert_eq!(halo.len(), cols);
    }

    let vertical = ctx.boundary.vertical();
    let horizontal = ctx.boundary.horizontal();
    let mut max_delta = 0.0_f64;

    for i in 0..rows {
        let global_row = ctx.partition.row_offset + i;
        let base = i * cols;
        for j in 0..cols {
            let idx = base + j;
            let north = if i > 0 {
                src[idx - cols]
            } else {
                ctx.halo_above.map_or(COLD_EDGE_TEMP, |halo| halo[j])
            };
            let south = if i + 1 < rows {
                src[idx + cols]
            } else {
                ctx.halo_below.map_or(horizontal[j], |halo| halo[j])
            };
            let west = if j > 0 { src[idx - 1] } else { COLD_EDGE_TEMP };
            let east = if j + 1 < cols {
                src[idx + 1]
            } else {
                vertical[global_row]
            };

            let next = 0.25 * (south + north + east + west);
            dst[idx] = next;
            max_delta = max_delta.max((next - src[idx]).abs());
        }
    }

    max_delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::Layout;

    fn whole_plate(rows: usize, cols: usize) -> (Partition, BoundaryValues) {
        let layout = Layout::new(rows, cols, 1).unwrap();
        (layout.partition(0), BoundaryValues::generate(rows, cols))
    }

    #[test]
    fn first_sweep_matches_hand_computation() {
        // 4x4 interior, cold start: only cells next to the heating
        // elements move.
        let (partition, boundary) = whole_plate(4, 4);
        let src = vec![0.0; 16];
        let mut dst = vec![0.0; 16];
        let ctx = BlockContext {
            partition,
            boundary: &boundary,
            halo_above: None,
            halo_below: None,
        };
        let delta = sweep_block(&src, &mut dst, 4, &ctx);

        // Bottom-right cell averages two cold neighbors and the two
        // 100-degree element corners.
        assert_eq!(dst[15], 0.25 * (0.0 + 100.0 + 0.0 + 100.0));
        // Top-right cell sees vertical[0] = 25 to its east.
        assert_eq!(dst[3], 0.25 * 25.0);
        // Bottom-left cell sees horizontal[0] = 25 below.
        assert_eq!(dst[12], 0.25 * 25.0);
        // A cell away from the heat stays cold after one sweep.
        assert_eq!(dst[5], 0.0);
        assert_eq!(delta, 50.0);
    }

    #[test]
    fn halo_rows_feed_the_block_edges() {
        let layout = Layout::new(6, 3, 3).unwrap();
        let partition = layout.partition(1);
        let boundary = BoundaryValues::generate(6, 3);
        let src = vec![1.0; 6];
        let above = vec![7.0; 3];
        let below = vec![9.0; 3];
        let mut dst = vec![0.0; 6];
        let ctx = BlockContext {
            partition,
            boundary: &boundary,
            halo_above: Some(&above),
            halo_below: Some(&below),
        };
        sweep_block(&src, &mut dst, 3, &ctx);

        // First local row, middle column: north comes from the halo.
        assert_eq!(dst[1], 0.25 * (1.0 + 7.0 + 1.0 + 1.0));
        // Last local row, middle column: south comes from the halo.
        assert_eq!(dst[4], 0.25 * (9.0 + 1.0 + 1.0 + 1.0));
    }

    #[test]
    fn single_row_block_reads_both_halos() {
        let layout = Layout::new(3, 2, 3).unwrap();
        let partition = layout.partition(1);
        let boundary = BoundaryValues::generate(3, 2);
        let src = vec![4.0, 4.0];
        let above = vec![2.0, 2.0];
        let below = vec![6.0, 6.0];
        let mut dst = vec![0.0; 2];
        let ctx = BlockContext {
            partition,
            boundary: &boundary,
            halo_above: Some(&above),
            halo_below: Some(&below),
        };
        sweep_block(&src, &mut dst, 2, &ctx);

        assert_eq!(dst[0], 0.25 * (6.0 + 2.0 + 4.0 + 0.0));
        assert_eq!(dst[1], 0.25 * (6.0 + 2.0 + boundary.vertical()[1] + 4.0));
    }

    #[test]
    fn boundary_storage_survives_sweeps_untouched() {
        let (partition, boundary) = whole_plate(4, 4);
        let reference = boundary.clone();
        let mut src = vec![0.0; 16];
        let mut dst = vec![0.0; 16];
        for _ in 0..25 {
            let ctx = BlockContext {
                partition,
                boundary: &boundary,
                halo_above: None,
                halo_below: None,
            };
            sweep_block(&src, &mut dst, 4, &ctx);
            std::mem::swap(&mut src, &mut dst);
        }
        assert_eq!(boundary, reference);
    }
}
