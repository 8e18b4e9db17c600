use std::collections::HashMap;

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 1, tags = ["lists"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    left: Vec<u32>,
    right: Vec<u32>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let pairs = parse_lines(input, |line| {
            let mut it = line.split_whitespace();
            match (it.next(), it.next(), it.next()) {
                (Some(a), Some(b), None) => Ok((a.parse::<u32>()?, b.parse::<u32>()?)),
                _ => Err(anyhow!("expected two location IDs")),
            }
        })?;
        let (mut left, mut right): (Vec<u32>, Vec<u32>) = pairs.into_iter().unzip();
        left.sort_unstable();
        right.sort_unstable();
        Ok(SharedData { left, right })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared
            .left
            .iter()
            .zip(&shared.right)
            .map(|(a, b)| u64::from(a.abs_diff(*b)))
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut counts: HashMap<u32, u64> = HashMap::new();
        for &r in &shared.right {
            *counts.entry(r).or_default() += 1;
        }
        let similarity: u64 = shared
            .left
            .iter()
            .map(|&l| u64::from(l) * counts.get(&l).copied().unwrap_or(0))
            .sum();
        Ok(similarity.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "3   4\n4   3\n2   5\n1   3\n3   9\n3   3\n";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "11");
        assert_eq!(solve::<Solver, 2>(EXAMPLE), "31");
    }

    #[test]
    fn test_rejects_single_column() {
        assert!(Solver::parse("3\n4\n").is_err());
    }
}
