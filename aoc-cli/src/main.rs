//! AOC CLI - runs the archived Advent of Code solutions

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aoc_solver::{SolverRegistry, SolverRegistryBuilder};
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::{Executor, WorkItem};
use output::OutputFormatter;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.quiet);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => die(e),
    }
}

/// Report a fatal error and exit with status 2
fn die(e: CliError) -> ExitCode {
    if let CliError::MissingInputs(paths) = &e {
        for path in paths {
            eprintln!("  - {}", path.display());
        }
    }
    eprintln!("Error: {}", e);
    ExitCode::from(2)
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`, `warn` when quiet)
fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    debug!(?config, "resolved configuration");

    let registry = build_registry(&config.tags)?;
    let executor = Executor::new(registry, &config).map_err(|e| CliError::Executor(e.into()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        return Err(CliError::Config(
            "no solutions match the selected year/day/part/tags".to_string(),
        ));
    }

    let missing: Vec<_> = work_items
        .iter()
        .filter(|w| !executor.inputs().contains(w.year, w.day))
        .map(|w| executor.inputs().path(w.year, w.day))
        .collect();
    if !missing.is_empty() {
        return Err(CliError::MissingInputs(missing));
    }

    run_executor(executor, &work_items, config.quiet)
}

/// Run the executor, printing results in (year, day, part) order as they complete
fn run_executor(executor: Executor, work_items: &[WorkItem], quiet: bool) -> Result<(), CliError> {
    let parts: usize = work_items.iter().map(|w| w.parts.len()).sum();
    info!(days = work_items.len(), parts, "running solutions");

    let expected_keys: Vec<aggregator::ResultKey> = work_items
        .iter()
        .flat_map(|w| {
            w.parts.clone().map(move |part| aggregator::ResultKey {
                year: w.year,
                day: w.day,
                part,
            })
        })
        .collect();

    let (tx, rx) = std::sync::mpsc::channel();
    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    let executed = std::thread::scope(|s| {
        let handle = s.spawn(|| executor.execute(tx));

        for result in rx {
            for ready in aggregator.add(result) {
                formatter.print_result(&ready);
                results.push(ready);
            }
        }

        handle.join()
    });

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }
    if !aggregator.is_complete() {
        tracing::warn!("not all expected results were received");
    }

    match executed {
        Ok(outcome) => outcome?,
        Err(_) => {
            return Err(CliError::Config("executor thread panicked".to_string()));
        }
    }

    let summary = formatter.print_summary(&results);
    if summary.failed > 0 {
        return Err(CliError::Failed {
            failed: summary.failed,
            total: results.len(),
        });
    }
    Ok(())
}

/// Build registry, keeping only solvers carrying every requested tag
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
