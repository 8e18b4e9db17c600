use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 1, tags = ["simulation"])]
pub struct Solver;

const DIAL: i32 = 100;
const START: i32 = 50;

#[derive(Debug)]
pub struct SharedData {
    rotations: Vec<i32>,
    counts: Option<ZeroCounts>,
}

#[derive(Debug, Clone, Copy)]
pub struct ZeroCounts {
    /// Rotations that finish on 0.
    landed: u32,
    /// Clicks that point at 0, during or at the end of a rotation.
    passed: u32,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rotations = parse_lines(input, |line| {
            let line = line.trim();
            let sign = match line.as_bytes().first() {
                Some(b'L') => -1,
                Some(b'R') => 1,
                _ => bail!("rotation must start with 'L' or 'R'"),
            };
            let clicks: i32 = line[1..]
                .parse()
                .map_err(|e| anyhow!("bad rotation {:?}: {}", line, e))?;
            if clicks < 0 {
                bail!("rotation must be non-negative");
            }
            Ok(sign * clicks)
        })?;
        Ok(SharedData {
            rotations,
            counts: None,
        })
    }
}

fn count_zeros(rotations: &[i32]) -> ZeroCounts {
    let mut dial = START;
    let mut counts = ZeroCounts { landed: 0, passed: 0 };
    for &turn in rotations {
        let end = dial + turn;
        counts.passed += if turn >= 0 {
            (end.div_euclid(DIAL) - dial.div_euclid(DIAL)) as u32
        } else {
            // Moving left, count multiples of the dial size in [end, dial).
            ((dial - 1).div_euclid(DIAL) - (end - 1).div_euclid(DIAL)) as u32
        };
        dial = end.rem_euclid(DIAL);
        if dial == 0 {
            counts.landed += 1;
        }
    }
    counts
}

fn counts(shared: &mut SharedData) -> ZeroCounts {
    *shared
        .counts
        .get_or_insert_with(|| count_zeros(&shared.rotations))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(counts(shared).landed.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(counts(shared).passed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;
    use proptest::prelude::*;

    const EXAMPLE: &str = "L68\nL30\nR48\nL5\nR60\nL55\nL1\nL99\nR14\nL82\n";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "3");
        assert_eq!(solve::<Solver, 2>(EXAMPLE), "6");
    }

    #[test]
    fn test_full_turns() {
        assert_eq!(count_zeros(&[1000]).passed, 10);
        assert_eq!(count_zeros(&[-50]).passed, 1);
        assert_eq!(count_zeros(&[-50, -100]).passed, 2);
    }

    #[test]
    fn test_rejects_bad_direction() {
        assert!(Solver::parse("X10\n").is_err());
        assert!(Solver::parse("L-5\n").is_err());
    }

    proptest! {
        /// Closed-form counting agrees with clicking one step at a time.
        #[test]
        fn prop_matches_click_by_click(turns in prop::collection::vec(-300i32..300, 0..20)) {
            let mut dial = START;
            let mut passed = 0;
            for &t in &turns {
                for _ in 0..t.abs() {
                    dial = (dial + t.signum()).rem_euclid(DIAL);
                    if dial == 0 {
                        passed += 1;
                    }
                }
            }
            prop_assert_eq!(count_zeros(&turns).passed, passed);
        }
    }
}
