use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::parse::ints;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 11, tags = ["dp"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        ints(input)
    }
}

/// One blink applied to a single stone.
fn blink(stone: u64) -> Vec<u64> {
    if stone == 0 {
        return vec![1];
    }
    let digits = stone.ilog10() + 1;
    if digits % 2 == 0 {
        let half = 10u64.pow(digits / 2);
        vec![stone / half, stone % half]
    } else {
        vec![stone * 2024]
    }
}

/// Number of stones a single `(stone, blinks)` turns into.
struct StoneCount;

impl DpProblem<(u64, u32), u64> for StoneCount {
    fn deps(&self, &(stone, blinks): &(u64, u32)) -> Vec<(u64, u32)> {
        if blinks == 0 {
            return Vec::new();
        }
        blink(stone).into_iter().map(|s| (s, blinks - 1)).collect()
    }

    fn compute(&self, _index: &(u64, u32), deps: Vec<u64>) -> u64 {
        if deps.is_empty() { 1 } else { deps.iter().sum() }
    }
}

fn count_after(stones: &[u64], blinks: u32) -> u64 {
    let cache = DpCache::with_problem(HashMapBackend::new(), StoneCount);
    stones.iter().map(|&s| cache.get(&(s, blinks))).sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_after(shared, 25).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_after(shared, 75).to_string())
    }
}
