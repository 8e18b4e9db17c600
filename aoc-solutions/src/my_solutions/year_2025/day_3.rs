use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 3, tags = ["greedy"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<u8>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let bank: Vec<u8> = line.trim().bytes().map(|b| b.wrapping_sub(b'0')).collect();
            if bank.iter().any(|&d| d > 9) {
                bail!("battery bank must be digits only");
            }
            Ok(bank)
        })
    }
}

/// Largest number formed by `k` batteries kept in order.
///
/// Each digit is the leftmost maximum among the positions that still leave
/// enough batteries for the rest.
fn joltage(bank: &[u8], k: usize) -> Option<u64> {
    if bank.len() < k {
        return None;
    }
    let mut start = 0;
    let mut value = 0u64;
    for remaining in (0..k).rev() {
        let window = &bank[start..bank.len() - remaining];
        let (offset, &digit) = window
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|&(_, &d)| d)?;
        start += offset + 1;
        value = value * 10 + u64::from(digit);
    }
    Some(value)
}

fn total(banks: &[Vec<u8>], k: usize) -> Result<u64, SolveError> {
    banks
        .iter()
        .map(|bank| {
            joltage(bank, k).ok_or_else(|| {
                SolveError::no_answer(format!("bank of {} batteries cannot supply {}", bank.len(), k))
            })
        })
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total(shared, 2)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total(shared, 12)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "987654321111111\n811111111111119\n234234234234278\n818181911112111\n";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "357");
        assert_eq!(solve::<Solver, 2>(EXAMPLE), "3121910778619");
    }

    #[test]
    fn test_leftmost_maximum_wins() {
        assert_eq!(joltage(&[9, 9, 1], 2), Some(99));
        assert_eq!(joltage(&[1, 2], 3), None);
    }
}
