use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 12, tags = ["grid"])]
pub struct Solver;

#[derive(Debug, Clone, Copy)]
pub struct Region {
    area: u64,
    perimeter: u64,
    sides: u64,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Region>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let garden = Grid::parse_with(input, |b| b.is_ascii_alphabetic().then_some(b))?;
        Ok(regions(&garden))
    }
}

fn regions(garden: &Grid<u8>) -> Vec<Region> {
    let mut seen = garden.map(|_| false);
    let mut out = Vec::new();
    for start in garden.positions() {
        if seen[start] {
            continue;
        }
        let plant = garden[start];
        let same = |p: Pos| garden.get(p) == Some(&plant);
        let mut region = Region {
            area: 0,
            perimeter: 0,
            sides: 0,
        };
        seen[start] = true;
        let mut stack = vec![start];
        while let Some(p) = stack.pop() {
            region.area += 1;
            for dir in Direction::ALL {
                let n = p.step(dir);
                if !same(n) {
                    region.perimeter += 1;
                } else if !seen[n] {
                    seen[n] = true;
                    stack.push(n);
                }
                // Sides equal corners; count the corner between `dir` and the next turn.
                let side = p.step(dir.turn_right());
                let diagonal = n + dir.turn_right().delta();
                let convex = !same(n) && !same(side);
                let concave = same(n) && same(side) && !same(diagonal);
                if convex || concave {
                    region.sides += 1;
                }
            }
        }
        out.push(region);
    }
    out
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let price: u64 = shared.iter().map(|r| r.area * r.perimeter).sum();
        Ok(price.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let price: u64 = shared.iter().map(|r| r.area * r.sides).sum();
        Ok(price.to_string())
    }
}
