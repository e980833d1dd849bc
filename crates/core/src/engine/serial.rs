//! Serial baseline: one partition, no communication
//!
//! The degenerate case of the partitioned engine. The single block owns
//! both physical edges, so the kernel resolves every neighbor locally and
//! no halo or reduction machinery is needed; its local maximum change is
//! already the global one.

use super::{RelaxationSolver, RunOutcome};
use crate::controller::IterationController;
use crate::field::Field;
use crate::kernel::{sweep_block, BlockContext};
use crate::progress::corner_probe;
use std::mem;

pub(super) fn run(solver: &RelaxationSolver) -> RunOutcome {
    let config = &solver.config;
    let partition = solver.layout.partition(0);
    let cols = config.cols;

    let mut src = match &solver.initial {
        Some(field) => field.as_slice().to_vec(),
        None => vec![0.0; config.rows * cols],
    };
    let mut dst = vec![0.0; config.rows * cols];
    let mut controller = IterationController::new(
        config.threshold,
        config.max_iterations,
        config.report_interval,
    );

    loop {
        let ctx = BlockContext {
            partition,
            boundary: &solver.boundary,
            halo_above: None,
            halo_below: None,
        };
        let delta = sweep_block(&src, &mut dst, cols, &ctx);
        let state = controller.complete_sweep(delta, solver.cancel.is_cancelled());

        solver.reporter.sweep_finished(controller.iteration(), delta);
        if controller.should_report() {
            let samples = corner_probe(&dst, &partition, config.rows, cols);
            solver.reporter.checkpoint(controller.iteration(), &samples);
        }

        if state.is_terminal() {
            return RunOutcome {
                state,
                iterations: controller.iteration(),
                final_delta: delta,
                field: Field::from_parts(dst, config.rows, cols),
            };
        }

        // Generation swap: the sweep just written becomes the previous
        // generation of the next one.
        mem::swap(&mut src, &mut dst);
    }
}
