use std::collections::HashSet;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::invalid_format;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 2, tags = ["math"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<(u64, u64)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(|range| {
                let (lo, hi) = range
                    .split_once('-')
                    .ok_or_else(|| invalid_format(format!("expected `lo-hi`, got {:?}", range)))?;
                let lo: u64 = lo.parse().map_err(invalid_format)?;
                let hi: u64 = hi.parse().map_err(invalid_format)?;
                if lo > hi {
                    return Err(invalid_format(format!("range {:?} is reversed", range)));
                }
                Ok((lo, hi))
            })
            .collect()
    }
}

/// IDs in `lo..=hi` made of a digit block repeated `r` times, for each `r` allowed by `repeats`.
fn invalid_ids(lo: u64, hi: u64, repeats: impl Fn(u32) -> bool, out: &mut HashSet<u64>) {
    let max_digits = hi.checked_ilog10().unwrap_or(0) + 1;
    for digits in 2..=max_digits {
        for block_len in 1..digits {
            let r = digits / block_len;
            if digits % block_len != 0 || !repeats(r) {
                continue;
            }
            // 1, 101, 10101, ... scaled to the block length.
            let unit: u64 = (0..r).map(|i| 10u64.pow(block_len * i)).sum();
            let min_block = 10u64.pow(block_len - 1);
            let max_block = 10u64.pow(block_len) - 1;
            let first = min_block.max(lo.div_ceil(unit));
            let last = max_block.min(hi / unit);
            out.extend((first..=last).map(|block| block * unit));
        }
    }
}

fn sum_invalid(ranges: &[(u64, u64)], repeats: impl Fn(u32) -> bool + Copy) -> u64 {
    let mut ids = HashSet::new();
    for &(lo, hi) in ranges {
        invalid_ids(lo, hi, repeats, &mut ids);
    }
    ids.iter().sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_invalid(shared, |r| r == 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_invalid(shared, |r| r >= 2).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "11-22,95-115,998-1012,1188511880-1188511890,222220-222224,\
1698522-1698528,446443-446449,38593856-38593862,565653-565659,\
824824821-824824827,2121212118-2121212124\n";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "1227775554");
        assert_eq!(solve::<Solver, 2>(EXAMPLE), "4174379265");
    }

    #[test]
    fn test_repeats_counted_once() {
        let mut ids = HashSet::new();
        invalid_ids(222220, 222224, |r| r >= 2, &mut ids);
        assert_eq!(ids, HashSet::from([222222]));
        ids.clear();
        invalid_ids(95, 115, |r| r >= 2, &mut ids);
        assert_eq!(ids, HashSet::from([99, 111]));
    }
}
