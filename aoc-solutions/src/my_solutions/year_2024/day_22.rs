use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 22, tags = ["simulation", "parallel"])]
pub struct Solver;

const PRUNE: u64 = 16_777_216;
const ROUNDS: usize = 2000;
/// Four price changes in -9..=9, packed base 19.
const SEQUENCES: usize = 19 * 19 * 19 * 19;

impl AocParser for Solver {
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| Ok(line.trim().parse::<u64>()?))
    }
}

fn next_secret(mut s: u64) -> u64 {
    s = ((s << 6) ^ s) % PRUNE;
    s = ((s >> 5) ^ s) % PRUNE;
    ((s << 11) ^ s) % PRUNE
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared
            .par_iter()
            .map(|&s| (0..ROUNDS).fold(s, |s, _| next_secret(s)))
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let totals = shared
            .par_iter()
            .enumerate()
            .fold(
                // Banana totals per sequence, and the last buyer that sold on it.
                || (vec![0u32; SEQUENCES], vec![usize::MAX; SEQUENCES]),
                |(mut totals, mut seen), (buyer, &secret)| {
                    let mut s = secret;
                    let mut price = (s % 10) as i32;
                    let mut key = 0usize;
                    for round in 0..ROUNDS {
                        s = next_secret(s);
                        let next = (s % 10) as i32;
                        key = (key * 19 + (next - price + 9) as usize) % SEQUENCES;
                        price = next;
                        if round >= 3 && seen[key] != buyer {
                            seen[key] = buyer;
                            totals[key] += price as u32;
                        }
                    }
                    (totals, seen)
                },
            )
            .map(|(totals, _)| totals)
            .reduce(
                || vec![0u32; SEQUENCES],
                |mut a, b| {
                    a.iter_mut().zip(b).for_each(|(x, y)| *x += y);
                    a
                },
            );
        Ok(totals.into_iter().max().unwrap_or(0).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    #[test]
    fn test_secret_sequence() {
        let mut s = 123;
        let expected = [15887950, 16495136, 527345, 704524, 1553684];
        for e in expected {
            s = next_secret(s);
            assert_eq!(s, e);
        }
    }

    #[test]
    fn test_example_part1() {
        assert_eq!(solve::<Solver, 1>("1\n10\n100\n2024\n"), "37327623");
    }

    #[test]
    fn test_example_part2() {
        assert_eq!(solve::<Solver, 2>("1\n2\n3\n2024\n"), "23");
    }
}
