use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 4, tags = ["grid"])]
pub struct Solver;

const CROWDED: usize = 4;

impl AocParser for Solver {
    type SharedData<'a> = Grid<bool>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse_with(input, |b| match b {
            b'@' => Some(true),
            b'.' => Some(false),
            _ => None,
        })
    }
}

fn neighbours(rolls: &Grid<bool>, p: Pos) -> usize {
    p.neighbors8()
        .into_iter()
        .filter(|&n| rolls.get(n) == Some(&true))
        .count()
}

fn accessible(rolls: &Grid<bool>) -> Vec<Pos> {
    rolls
        .iter()
        .filter(|&(p, &roll)| roll && neighbours(rolls, p) < CROWDED)
        .map(|(p, _)| p)
        .collect()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(accessible(shared).len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut rolls = shared.clone();
        let mut counts = rolls.map(|_| 0usize);
        for p in rolls.positions() {
            counts[p] = neighbours(&rolls, p);
        }
        // Removing a roll can only free its neighbours, so work from a queue.
        let mut queue = accessible(&rolls);
        let mut removed = 0;
        while let Some(p) = queue.pop() {
            if !rolls[p] {
                continue;
            }
            rolls[p] = false;
            removed += 1;
            for n in p.neighbors8() {
                if rolls.get(n) == Some(&true) {
                    counts[n] -= 1;
                    if counts[n] < CROWDED {
                        queue.push(n);
                    }
                }
            }
        }
        Ok(removed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "\
..@@.@@@@.
@@@.@.@.@@
@@@@@.@.@@
@.@@@@..@.
@@.@@@@.@@
.@@@@@@@.@
.@.@.@.@@@
@.@@@.@@@@
.@@@@@@@@.
@.@.@@@.@.
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "13");
        assert_eq!(solve::<Solver, 2>(EXAMPLE), "43");
    }
}
