use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::Grid;
use crate::utils::parse::invalid_format;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 7, tags = ["grid", "dp"])]
pub struct Solver;

#[derive(Debug, Clone, Copy)]
pub struct Beams {
    splits: u64,
    timelines: u64,
}

impl AocParser for Solver {
    type SharedData<'a> = Beams;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let manifold = Grid::parse_with(input, |b| matches!(b, b'.' | b'^' | b'S').then_some(b))?;
        let start = manifold
            .find_byte(b'S')
            .ok_or_else(|| invalid_format("no beam source `S`"))?;
        Ok(trace(&manifold, start.x as usize, start.y as usize))
    }
}

/// Send the beam down row by row, tracking how many timelines reach each column.
fn trace(manifold: &Grid<u8>, start_col: usize, start_row: usize) -> Beams {
    let width = manifold.width();
    let mut paths = vec![0u64; width];
    paths[start_col] = 1;
    let mut splits = 0;
    for row in manifold.rows().skip(start_row + 1) {
        let mut next = vec![0u64; width];
        for (x, &count) in paths.iter().enumerate().filter(|&(_, &c)| c > 0) {
            if row[x] == b'^' {
                splits += 1;
                if x > 0 {
                    next[x - 1] += count;
                }
                if x + 1 < width {
                    next[x + 1] += count;
                }
            } else {
                next[x] += count;
            }
        }
        paths = next;
    }
    Beams {
        splits,
        timelines: paths.iter().sum(),
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.splits.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.timelines.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "\
.......S.......
...............
.......^.......
...............
......^.^......
...............
.....^.^.^.....
...............
....^.^...^....
...............
...^.^...^.^...
...............
..^...^.....^..
...............
.^.^.^.^.^...^.
...............
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "21");
        assert_eq!(solve::<Solver, 2>(EXAMPLE), "40");
    }

    #[test]
    fn test_merging_beams_split_once() {
        let input = "..S..\n..^..\n.^.^.\n.....\n";
        let beams = Solver::parse(input).unwrap();
        assert_eq!(beams.splits, 3);
        assert_eq!(beams.timelines, 4);
    }
}
