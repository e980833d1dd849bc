//! Console runner for the heat-plate relaxation engine
//!
//! Runs the plate to convergence or an iteration cap, prints probe
//! checkpoints while sweeping, and optionally appends a tab-separated
//! summary line for benchmarking scripts. All of the I/O lives here; the
//! engine itself never touches the console or the filesystem.

use anyhow::Context;
use clap::Parser;
use heat_relax_core::{
    ControlState, NullReporter, ProbeSample, ProgressReporter, RelaxationSolver, RunOutcome,
    SolverConfig,
};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Jacobi relaxation of a heated plate
#[derive(Parser, Debug)]
#[command(name = "demo-headless")]
#[command(about = "Jacobi relaxation of a heated plate", long_about = None)]
struct Args {
    /// Suppress progress and summary console output
    #[arg(short, long)]
    quiet: bool,

    /// Maximum iteration count; prompts on stdin when omitted
    #[arg(short = 'm', long = "max-iterations")]
    max_iterations: Option<u32>,

    /// Append a one-line run summary to this file
    #[arg(short = 's', long = "summary")]
    summary: Option<PathBuf>,

    /// Number of row-partition workers; 1 runs the serial baseline
    #[arg(short = 'w', long = "workers", default_value_t = 1)]
    workers: usize,
}

/// Prints checkpoints in the classic workshop layout
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn checkpoint(&self, iteration: u32, samples: &[ProbeSample]) {
        println!("---------- Iteration number: {iteration} ------------");
        for sample in samples {
            print!("[{},{}]: {:5.2}  ", sample.row, sample.col, sample.value);
        }
        println!();
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let max_iterations = match args.max_iterations {
        Some(value) => value,
        None => prompt_max_iterations()?,
    };

    let config = SolverConfig {
        workers: args.workers,
        max_iterations,
        ..SolverConfig::default()
    };
    let variant = if config.workers == 1 {
        "serial"
    } else {
        "threaded"
    };

    let reporter: Arc<dyn ProgressReporter> = if args.quiet {
        Arc::new(NullReporter)
    } else {
        Arc::new(ConsoleReporter)
    };
    let solver = RelaxationSolver::new(config.clone())
        .context("invalid solver configuration")?
        .with_reporter(reporter);

    let start = Instant::now();
    let outcome = solver.run();
    let elapsed = start.elapsed().as_secs_f64();

    if !args.quiet {
        print_results(&outcome, elapsed);
    }

    if let Some(path) = &args.summary {
        let line = summary_line(variant, &config, &outcome, elapsed);
        if let Err(err) = append_summary(path, &line) {
            // A broken summary file never aborts a finished computation.
            eprintln!(
                "warning: could not append summary to {}: {err}",
                path.display()
            );
        }
    }

    Ok(())
}

fn prompt_max_iterations() -> anyhow::Result<u32> {
    println!("Maximum iterations [100-4000]?");
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("reading the iteration count from stdin")?;
    line.trim()
        .parse()
        .with_context(|| format!("'{}' is not a valid iteration count", line.trim()))
}

fn print_results(outcome: &RunOutcome, elapsed: f64) {
    let status = match outcome.state {
        ControlState::Converged => "converged",
        ControlState::IterationLimit => "iteration limit reached",
        ControlState::Cancelled => "cancelled",
        ControlState::Running => unreachable!("run() only returns terminal states"),
    };
    println!(
        "\nMax error at iteration {} was {:.6} ({status})",
        outcome.iterations, outcome.final_delta
    );
    println!("Total time was {elapsed:.6} seconds.");

    // Closing probe of the hottest corner, in global coordinates.
    let field = &outcome.field;
    let depth = field.rows().min(field.cols()).min(6);
    for step in (1..=depth).rev() {
        let (row, col) = (field.rows() - step, field.cols() - step);
        print!("[{row},{col}]: {:5.2}  ", field.get(row, col));
    }
    println!();
}

fn summary_line(variant: &str, config: &SolverConfig, outcome: &RunOutcome, elapsed: f64) -> String {
    format!(
        "{variant}\t{}\t{}\t{}\t{:.6}\t{}\n",
        config.workers, config.max_iterations, outcome.iterations, outcome.final_delta, elapsed
    )
}

fn append_summary(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    file.write_all(line.as_bytes())
}
