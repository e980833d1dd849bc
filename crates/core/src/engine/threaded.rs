//! Row-partitioned engine: scoped worker threads, halo exchange, barriers
//!
//! Each worker exclusively owns one contiguous row block of both
//! generations; nothing is written through shared state except the halo
//! buffers, each of which has exactly one writer and one reader. Two
//! barriers order every sweep: halos are fully published before any worker
//! reads one, and every sweep plus its delta publication is complete before
//! any worker evaluates the stop condition or republishes.

use super::{RelaxationSolver, RunOutcome};
use crate::boundary::BoundaryValues;
use crate::controller::{CancelToken, ControlState, IterationController};
use crate::field::Field;
use crate::kernel::{sweep_block, BlockContext};
use crate::partition::Partition;
use crate::progress::{corner_probe, ProgressReporter};
use crate::reduce::DeltaSlots;
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Barrier, Mutex, MutexGuard};
use std::thread;
use tracing::debug;

/// Halo buffers for one cut between adjacent blocks
///
/// `upper_row` is written by the block above the cut (a copy of its last
/// owned row) and read by the block below; `lower_row` the reverse. The
/// sweep barriers keep writer and reader in disjoint phases.
struct HaloLink {
    upper_row: Mutex<Vec<f64>>,
    lower_row: Mutex<Vec<f64>>,
}

impl HaloLink {
    fn new(cols: usize) -> Self {
        Self {
            upper_row: Mutex::new(vec![0.0; cols]),
            lower_row: Mutex::new(vec![0.0; cols]),
        }
    }
}

/// Everything one worker needs besides its own two row blocks
struct WorkerCtx<'a> {
    partition: Partition,
    cols: usize,
    total_rows: usize,
    boundary: &'a BoundaryValues,
    link_above: Option<&'a HaloLink>,
    link_below: Option<&'a HaloLink>,
    slots: &'a DeltaSlots,
    barrier: &'a Barrier,
    cancel: &'a CancelToken,
    cancel_latch: &'a AtomicBool,
    reporter: &'a dyn ProgressReporter,
    threshold: f64,
    max_iterations: u32,
    report_interval: u32,
}

/// What each worker hands back when its loop terminates
struct WorkerReport {
    rows: Vec<f64>,
    state: ControlState,
    iterations: u32,
    final_delta: f64,
}

pub(super) fn run(solver: &RelaxationSolver) -> RunOutcome {
    let config = &solver.config;
    let workers = config.workers;
    let cols = config.cols;
    let block_len = solver.layout.rows_per_worker() * cols;
    let cells = config.rows * cols;

    let mut src_all = match &solver.initial {
        Some(field) => field.as_slice().to_vec(),
        None => vec![0.0; cells],
    };
    let mut dst_all = vec![0.0; cells];

    let slots = DeltaSlots::new(workers);
    let barrier = Barrier::new(workers);
    let cancel_latch = AtomicBool::new(false);
    let links: Vec<HaloLink> = (0..workers - 1).map(|_| HaloLink::new(cols)).collect();

    debug!(
        "spawning {} relaxation workers, {} rows each",
        workers,
        solver.layout.rows_per_worker()
    );

    let reports: Vec<WorkerReport> = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        let blocks = src_all
            .chunks_mut(block_len)
            .zip(dst_all.chunks_mut(block_len));
        for (worker_id, (src, dst)) in blocks.enumerate() {
            let ctx = WorkerCtx {
                partition: solver.layout.partition(worker_id),
                cols,
                total_rows: config.rows,
                boundary: &solver.boundary,
                link_above: worker_id.checked_sub(1).map(|cut| &links[cut]),
                link_below: links.get(worker_id),
                slots: &slots,
                barrier: &barrier,
                cancel: &solver.cancel,
                cancel_latch: &cancel_latch,
                reporter: solver.reporter.as_ref(),
                threshold: config.threshold,
                max_iterations: config.max_iterations,
                report_interval: config.report_interval,
            };
            handles.push(scope.spawn(move || worker_loop(src, dst, &ctx)));
        }
        handles
            .into_iter()
            .map(|handle| handle.join().expect("relaxation worker panicked"))
            .collect()
    });

    // Every controller replica saw the same reduced deltas, so all workers
    // stopped on the same sweep in the same state.
    let state = reports[0].state;
    let iterations = reports[0].iterations;
    let final_delta = reports[0].final_delta;
    debug_assert!(reports
        .iter()
        .all(|r| r.state == state && r.iterations == iterations));

    let mut data = Vec::with_capacity(cells);
    for report in reports {
        data.extend_from_slice(&report.rows);
    }
    RunOutcome {
        state,
        iterations,
        final_delta,
        field: Field::from_parts(data, config.rows, cols),
    }
}

fn worker_loop<'a>(mut src: &'a mut [f64], mut dst: &'a mut [f64], ctx: &WorkerCtx<'_>) -> WorkerReport {
    let cols = ctx.cols;
    let last_row_start = (ctx.partition.local_rows - 1) * cols;
    let mut controller =
        IterationController::new(ctx.threshold, ctx.max_iterations, ctx.report_interval);
    let mut halo_above = vec![0.0; if ctx.link_above.is_some() { cols } else { 0 }];
    let mut halo_below = vec![0.0; if ctx.link_below.is_some() { cols } else { 0 }];

    loop {
        // Publish previous-generation edge rows for the neighbors.
        if let Some(link) = ctx.link_above {
            lock(&link.lower_row).copy_from_slice(&src[..cols]);
        }
        if let Some(link) = ctx.link_below {
            lock(&link.upper_row).copy_from_slice(&src[last_row_start..]);
        }

        // Rendezvous: every halo is published before anyone reads one.
        ctx.barrier.wait();

        if let Some(link) = ctx.link_above {
            halo_above.copy_from_slice(&lock(&link.upper_row));
        }
        if let Some(link) = ctx.link_below {
            halo_below.copy_from_slice(&lock(&link.lower_row));
        }

        let block = BlockContext {
            partition: ctx.partition,
            boundary: ctx.boundary,
            halo_above: ctx.link_above.is_some().then_some(&halo_above[..]),
            halo_below: ctx.link_below.is_some().then_some(&halo_below[..]),
        };
        let local_delta = sweep_block(src, dst, cols, &block);
        ctx.slots.record(ctx.partition.worker_id, local_delta);
        if ctx.partition.worker_id == 0 {
            // Latched by one worker so every controller replica sees the
            // same value for this sweep.
            ctx.cancel_latch
                .store(ctx.cancel.is_cancelled(), Ordering::Relaxed);
        }

        // Rendezvous: every sweep, delta slot and the cancel latch is
        // complete before any stop decision or republication.
        ctx.barrier.wait();

        let global_delta = ctx.slots.global_max();
        let state =
            controller.complete_sweep(global_delta, ctx.cancel_latch.load(Ordering::Relaxed));

        if ctx.partition.has_bottom_edge {
            ctx.reporter
                .sweep_finished(controller.iteration(), global_delta);
            if controller.should_report() {
                let samples = corner_probe(dst, &ctx.partition, ctx.total_rows, cols);
                ctx.reporter.checkpoint(controller.iteration(), &samples);
            }
        }

        if state.is_terminal() {
            return WorkerReport {
                rows: dst.to_vec(),
                state,
                iterations: controller.iteration(),
                final_delta: global_delta,
            };
        }

        // Generation swap, local to this block; halos are republished from
        // the swapped-in generation at the top of the next sweep.
        mem::swap(&mut src, &mut dst);
    }
}

fn lock(row: &Mutex<Vec<f64>>) -> MutexGuard<'_, Vec<f64>> {
    row.lock().expect("halo buffer lock poisoned")
}
