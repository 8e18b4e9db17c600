use std::collections::{HashMap, HashSet};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::grid::{Grid, Pos};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 8, tags = ["grid"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    map: Grid<u8>,
    antennas: HashMap<u8, Vec<Pos>>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let map = Grid::parse_with(input, |b| (b == b'.' || b.is_ascii_alphanumeric()).then_some(b))?;
        let mut antennas: HashMap<u8, Vec<Pos>> = HashMap::new();
        for (p, &b) in map.iter().filter(|&(_, &b)| b != b'.') {
            antennas.entry(b).or_default().push(p);
        }
        Ok(SharedData { map, antennas })
    }
}

/// Antinodes of every same-frequency pair.
///
/// Without harmonics only the points one gap beyond each antenna count;
/// with harmonics every in-bounds multiple of the gap does, antennas included.
fn antinodes(shared: &SharedData, harmonics: bool) -> usize {
    let mut found = HashSet::new();
    for positions in shared.antennas.values() {
        for (&a, &b) in positions.iter().tuple_combinations() {
            let gap = b - a;
            for (origin, delta) in [(b, gap), (a, -gap)] {
                let steps = if harmonics { 0..i32::MAX } else { 1..2 };
                for k in steps {
                    let p = origin + delta * k;
                    if !shared.map.contains(p) {
                        break;
                    }
                    found.insert(p);
                }
            }
        }
    }
    found.len()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(antinodes(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(antinodes(shared, true).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "\
............
........0...
.....0......
.......0....
....0.......
......A.....
............
............
........A...
.........A..
............
............
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "14");
        assert_eq!(solve::<Solver, 2>(EXAMPLE), "34");
    }
}
