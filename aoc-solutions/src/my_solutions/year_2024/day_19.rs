use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::dp_cache::{DpCache, VecBackend};
use crate::utils::parse::{invalid_format, lines, sections};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 19, tags = ["dp"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData<'a> {
    towels: Vec<&'a str>,
    /// Arrangement count per design.
    ways: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (towels, designs) = sections(input)
            .ok_or_else(|| invalid_format("missing blank line after the towel list"))?;
        let towels: Vec<&str> = towels
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        let designs: Vec<&str> = lines(designs).map(str::trim).collect();
        let ways = designs
            .par_iter()
            .map(|design| arrangements(&towels, design))
            .collect();
        Ok(SharedData { towels, ways })
    }
}

fn arrangements(towels: &[&str], design: &str) -> u64 {
    let cache = DpCache::new(
        VecBackend::with_capacity(design.len() + 1),
        |&i: &usize| {
            towels
                .iter()
                .filter(|t| design[i..].starts_with(**t))
                .map(|t| i + t.len())
                .collect()
        },
        |&i: &usize, deps: Vec<u64>| {
            if i == design.len() { 1 } else { deps.iter().sum() }
        },
    );
    cache.get(&0)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.ways.iter().filter(|&&w| w > 0).count().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.ways.iter().sum::<u64>().to_string())
    }
}
