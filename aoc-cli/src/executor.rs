//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use tracing::{debug, info_span, warn};

/// Result from a single part
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    /// Time spent parsing, when parsing succeeded
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: ArcExecutorError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    plan: Plan,
    thread_pool: rayon::ThreadPool,
}

/// Everything a worker thread needs, shared by reference across the pool
struct Plan {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            plan: Plan {
                registry,
                inputs: config.input_store(),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn inputs(&self) -> &InputStore {
        &self.plan.inputs
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let plan = &self.plan;
        plan.registry
            .storage()
            .iter_info()
            .filter(|info| plan.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| plan.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(plan.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Execute all work items and send results to channel
    ///
    /// Failed parts are reported through the channel; the returned error
    /// only covers the executor itself.
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let plan = &self.plan;

        match plan.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work(&work, &tx, plan) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.thread_pool.install(|| {
                    by_year
                        .into_par_iter()
                        .map(|items| {
                            items.iter().fold(None, |err, work| match run_work(work, &tx, plan) {
                                Ok(()) => err,
                                Err(e) => Some(ArcExecutorError::combine_opt(err, e)),
                            })
                        })
                        .reduce(|| None, merge_errors)
                        .map_or(Ok(()), Err)
                })
            }
            ParallelizeBy::Day | ParallelizeBy::Part => self.thread_pool.install(|| {
                work_items
                    .par_iter()
                    .map(|work| run_work(work, &tx, plan).err())
                    .reduce(|| None, merge_errors)
                    .map_or(Ok(()), Err)
            }),
        }
    }
}

/// Parts to run given the `--part` filter and the solver's part count
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn merge_errors(
    first: Option<ArcExecutorError>,
    second: Option<ArcExecutorError>,
) -> Option<ArcExecutorError> {
    match (first, second) {
        (Some(a), Some(b)) => Some(ArcExecutorError::combine(a, b)),
        (a, b) => a.or(b),
    }
}

/// Read the input for one day and run its parts
fn run_work(work: &WorkItem, tx: &Sender<SolverResult>, plan: &Plan) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let _span = info_span!("day", year, day).entered();

    let input = match plan.inputs.read(year, day) {
        Ok(input) => input,
        Err(source) => {
            warn!(year, day, error = %source, "input unavailable");
            let error: ArcExecutorError = ExecutorError::Input { year, day, source }.into();
            for part in work.parts.clone() {
                send(tx, SolverResult::failed(year, day, part, error.clone()))?;
            }
            return Ok(());
        }
    };
    debug!(year, day, bytes = input.len(), "input loaded");

    if matches!(plan.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, tx, &plan.registry)
    } else {
        run_parts_sequential(work, &input, tx, &plan.registry)
    }
}

/// Every part parses its own copy of the input; results are re-ordered by part
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let mut results: Vec<SolverResult> = work
        .parts
        .clone()
        .into_par_iter()
        .map(|part| match registry.create_solver(year, day, input) {
            Ok(mut solver) => solve_part(&mut *solver, part),
            Err(e) => SolverResult::failed(year, day, part, ExecutorError::from(e).into()),
        })
        .collect();
    results.sort_by_key(|r| r.part);

    results.into_iter().try_for_each(|result| send(tx, result))
}

/// Parse once, then solve parts in order on a scoped thread, forwarding each
/// answer as soon as it is ready
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (solve_tx, solve_rx) = std::sync::mpsc::channel();
    let (year, day) = (work.year, work.day);
    let parts = work.parts.clone();

    std::thread::scope(|s| {
        let worker = s.spawn(move || match registry.create_solver(year, day, input) {
            Ok(mut solver) => {
                for part in parts {
                    if solve_tx.send(solve_part(&mut *solver, part)).is_err() {
                        break;
                    }
                }
            }
            Err(e) => {
                warn!(year, day, error = %e, "parse failed");
                let error: ArcExecutorError = ExecutorError::from(e).into();
                for part in parts {
                    if solve_tx
                        .send(SolverResult::failed(year, day, part, error.clone()))
                        .is_err()
                    {
                        break;
                    }
                }
            }
        });

        for result in solve_rx {
            send(tx, result)?;
        }

        worker
            .join()
            .map_err(|_| ArcExecutorError::from(ExecutorError::Panicked { year, day }))
    })
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Solve a single part on an already parsed solver
fn solve_part(solver: &mut dyn DynSolver, part: u8) -> SolverResult {
    let (year, day) = (solver.year(), solver.day());
    let parse_duration = Some(solver.parse_duration());

    match solver.solve(part) {
        Ok(result) => {
            debug!(year, day, part, answer = %result.answer, "solved");
            SolverResult {
                year,
                day,
                part,
                parse_duration,
                solve_duration: result.elapsed,
                answer: Ok(result.answer),
            }
        }
        Err(e) => {
            warn!(year, day, part, error = %e, "solve failed");
            SolverResult {
                year,
                day,
                part,
                parse_duration,
                solve_duration: TimeDelta::zero(),
                answer: Err(ExecutorError::from(aoc_solver::SolverError::from(e)).into()),
            }
        }
    }
}
