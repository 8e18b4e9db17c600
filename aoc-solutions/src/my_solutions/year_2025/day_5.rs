use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::{invalid_format, parse_lines, sections};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 5, tags = ["intervals"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    /// Merged, sorted and disjoint inclusive ranges.
    fresh: Vec<(u64, u64)>,
    available: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (ranges, ids) = sections(input)
            .ok_or_else(|| invalid_format("missing blank line between ranges and IDs"))?;
        let ranges = parse_lines(ranges, |line| {
            let (lo, hi) = line.trim().split_once('-').ok_or_else(|| anyhow!("expected `lo-hi`"))?;
            let (lo, hi) = (lo.parse::<u64>()?, hi.parse::<u64>()?);
            if lo > hi {
                bail!("range is reversed");
            }
            Ok((lo, hi))
        })?;
        let available = parse_lines(ids, |line| Ok(line.trim().parse::<u64>()?))?;
        Ok(SharedData {
            fresh: merge(ranges),
            available,
        })
    }
}

fn merge(mut ranges: Vec<(u64, u64)>) -> Vec<(u64, u64)> {
    ranges.sort_unstable();
    let mut merged: Vec<(u64, u64)> = Vec::with_capacity(ranges.len());
    for (lo, hi) in ranges {
        match merged.last_mut() {
            Some(last) if lo <= last.1.saturating_add(1) => last.1 = last.1.max(hi),
            _ => merged.push((lo, hi)),
        }
    }
    merged
}

impl SharedData {
    fn is_fresh(&self, id: u64) -> bool {
        let idx = self.fresh.partition_point(|&(lo, _)| lo <= id);
        idx > 0 && id <= self.fresh[idx - 1].1
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fresh = shared.available.iter().filter(|&&id| shared.is_fresh(id)).count();
        Ok(fresh.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared.fresh.iter().map(|&(lo, hi)| hi - lo + 1).sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "3-5\n10-14\n16-20\n12-18\n\n1\n5\n8\n11\n17\n32\n";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "3");
        assert_eq!(solve::<Solver, 2>(EXAMPLE), "14");
    }

    #[test]
    fn test_merge_adjacent_and_nested() {
        assert_eq!(merge(vec![(5, 6), (1, 4), (2, 3), (10, 10)]), vec![(1, 6), (10, 10)]);
    }
}
