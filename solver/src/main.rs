use std::ops::ControlFlow;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use pipes::parser::parse_from_file;
use pipes::{solve_while, Grid, SolverFailure};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct Args {
    /// Path to the grid file to solve
    #[clap(value_name = "FILE")]
    grid_file: PathBuf,

    /// Pause between steps, in milliseconds
    #[clap(long, default_value_t = 0)]
    delay_ms: u64,

    /// Stop after this many steps
    #[clap(long)]
    max_steps: Option<usize>,

    /// Only print the final grid
    #[clap(long)]
    quiet: bool,
}

fn render(grid: &Grid) {
    println!("{}", grid);
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut grid = parse_from_file(&args.grid_file)
        .with_context(|| format!("could not load {}", args.grid_file.display()))?;
    if !args.quiet {
        render(&grid);
    }

    let mut steps = 0;
    if args.max_steps != Some(0) {
        let outcome = solve_while(&mut grid, |grid, step| {
            steps += 1;
            tracing::debug!(steps, label = %step.label, location = ?step.location, "placed");
            if !args.quiet {
                render(grid);
            }

            if args.max_steps.is_some_and(|max| steps >= max) {
                return ControlFlow::Break(());
            }
            if args.delay_ms > 0 {
                thread::sleep(Duration::from_millis(args.delay_ms));
            }
            ControlFlow::Continue(())
        });

        match outcome {
            Ok(_) => {}
            Err(SolverFailure::NoLegalMove) => tracing::warn!(steps, "no forced move left, stopping"),
            Err(err) => return Err(err).context("solver step failed"),
        }
    }

    if args.quiet {
        render(&grid);
    }

    if grid.is_complete() {
        tracing::info!(steps, "grid complete");
    } else {
        tracing::info!(steps, "grid left incomplete");
    }

    Ok(())
}
