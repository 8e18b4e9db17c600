use std::collections::HashSet;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 10, tags = ["grid", "graph"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    heights: Grid<u8>,
    /// Per trailhead: (distinct summits, distinct trails).
    trails: Vec<(usize, u64)>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let heights = Grid::parse_with(input, |b| b.is_ascii_digit().then(|| b - b'0'))?;
        let trails = heights
            .iter()
            .filter(|&(_, &h)| h == 0)
            .map(|(p, _)| explore(&heights, p))
            .collect();
        Ok(SharedData { heights, trails })
    }
}

fn explore(heights: &Grid<u8>, head: Pos) -> (usize, u64) {
    let mut summits = HashSet::new();
    let mut stack = vec![head];
    let mut paths = 0;
    while let Some(p) = stack.pop() {
        let h = heights[p];
        if h == 9 {
            summits.insert(p);
            paths += 1;
            continue;
        }
        stack.extend(heights.neighbors4(p).filter(|&n| heights[n] == h + 1));
    }
    (summits.len(), paths)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let score: usize = shared.trails.iter().map(|&(s, _)| s).sum();
        Ok(score.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let rating: u64 = shared.trails.iter().map(|&(_, r)| r).sum();
        Ok(rating.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "\
89010123
78121874
87430965
96549874
45678903
32019012
01329801
10456732
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "36");
        assert_eq!(solve::<Solver, 2>(EXAMPLE), "81");
    }

    #[test]
    fn test_map_is_kept() {
        let shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.heights.width(), 8);
        assert_eq!(shared.trails.len(), 9);
    }
}
