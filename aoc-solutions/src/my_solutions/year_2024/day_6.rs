use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;
use tracing::debug;

use crate::utils::grid::{Direction, Grid, Pos};
use crate::utils::parse::{invalid_format, solve_failed};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 6, tags = ["grid", "parallel"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    /// `true` for obstacles.
    walls: Grid<bool>,
    start: Pos,
    /// Distinct cells on the unobstructed route, filled by part 1.
    route: Option<Vec<Pos>>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let raw = Grid::parse_with(input, |b| matches!(b, b'.' | b'#' | b'^').then_some(b))?;
        let start = raw
            .find_byte(b'^')
            .ok_or_else(|| invalid_format("no guard `^` on the map"))?;
        Ok(SharedData {
            walls: raw.map(|&b| b == b'#'),
            start,
            route: None,
        })
    }
}

enum Walk {
    Exited(Vec<Pos>),
    Looped,
}

/// Walk the guard from `start` facing up, with an optional extra obstacle.
fn walk(walls: &Grid<bool>, start: Pos, extra: Option<Pos>) -> Walk {
    // One bit per direction for each cell.
    let mut seen = Grid::new(walls.width(), walls.height(), 0u8);
    let mut pos = start;
    let mut dir = Direction::Up;
    loop {
        let mask = 1 << dir.index();
        if seen[pos] & mask != 0 {
            return Walk::Looped;
        }
        seen[pos] |= mask;
        let next = pos.step(dir);
        match walls.get(next) {
            None => break,
            Some(&true) => dir = dir.turn_right(),
            Some(&false) if Some(next) == extra => dir = dir.turn_right(),
            Some(&false) => pos = next,
        }
    }
    Walk::Exited(seen.iter().filter(|&(_, &m)| m != 0).map(|(p, _)| p).collect())
}

fn route(shared: &mut SharedData) -> Result<&Vec<Pos>, SolveError> {
    if shared.route.is_none() {
        match walk(&shared.walls, shared.start, None) {
            Walk::Exited(cells) => shared.route = Some(cells),
            Walk::Looped => {
                return Err(SolveError::no_answer("guard never leaves the map"));
            }
        }
    }
    shared
        .route
        .as_ref()
        .ok_or_else(|| solve_failed("route missing"))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(route(shared)?.len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let start = shared.start;
        let candidates: Vec<Pos> = route(shared)?
            .iter()
            .copied()
            .filter(|&p| p != start)
            .collect();
        debug!(candidates = candidates.len(), "testing obstruction positions");
        let loops = candidates
            .par_iter()
            .filter(|&&p| matches!(walk(&shared.walls, start, Some(p)), Walk::Looped))
            .count();
        Ok(loops.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "\
....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "41");
        assert_eq!(solve::<Solver, 2>(EXAMPLE), "6");
    }

    #[test]
    fn test_missing_guard() {
        assert!(Solver::parse("..#\n...\n").is_err());
    }
}
