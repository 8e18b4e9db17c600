use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 2, tags = ["lists"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<i32>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            line.split_whitespace()
                .map(|level| level.parse::<i32>().map_err(anyhow::Error::from))
                .collect()
        })
    }
}

fn is_safe(levels: impl IntoIterator<Item = i32>) -> bool {
    let mut sign = 0;
    let mut prev: Option<i32> = None;
    for level in levels {
        if let Some(p) = prev {
            let diff = level - p;
            if !(1..=3).contains(&diff.abs()) || diff.signum() * sign < 0 {
                return false;
            }
            sign = diff.signum();
        }
        prev = Some(level);
    }
    true
}

fn is_safe_dampened(levels: &[i32]) -> bool {
    is_safe(levels.iter().copied())
        || (0..levels.len()).any(|skip| {
            is_safe(
                levels
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != skip)
                    .map(|(_, &v)| v),
            )
        })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let safe = shared
            .iter()
            .filter(|report| is_safe(report.iter().copied()))
            .count();
        Ok(safe.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let safe = shared.iter().filter(|report| is_safe_dampened(report)).count();
        Ok(safe.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "\
7 6 4 2 1
1 2 7 8 9
9 7 6 2 1
1 3 2 4 5
8 6 4 4 1
1 3 6 7 9
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "2");
        assert_eq!(solve::<Solver, 2>(EXAMPLE), "4");
    }

    #[test]
    fn test_safety_rules() {
        assert!(is_safe([1, 2, 3]));
        assert!(is_safe([5]));
        assert!(!is_safe([1, 1, 2]));
        assert!(!is_safe([1, 5]));
        assert!(is_safe_dampened(&[9, 1, 2, 3]));
    }
}
