use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::grid::{Grid, Pos};
use crate::utils::parse::{blocks, invalid_format};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2024, day = 25, tags = ["parsing"])]
pub struct Solver;

#[derive(Debug, Default)]
pub struct SharedData {
    locks: Vec<Vec<u8>>,
    keys: Vec<Vec<u8>>,
    /// Rows available to the pins, excluding the solid top and bottom rows.
    space: u8,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut shared = SharedData::default();
        for block in blocks(input) {
            let schematic = Grid::parse_with(block, |b| match b {
                b'#' => Some(true),
                b'.' => Some(false),
                _ => None,
            })?;
            let space = u8::try_from(schematic.height())
                .ok()
                .and_then(|h| h.checked_sub(2))
                .ok_or_else(|| invalid_format("schematic is too short"))?;
            shared.space = space;
            let heights = (0..schematic.width() as i32)
                .map(|x| {
                    let filled = (0..schematic.height() as i32)
                        .filter(|&y| schematic[Pos::new(x, y)])
                        .count();
                    filled.saturating_sub(1) as u8
                })
                .collect();
            let top_row_full = schematic.rows().next().is_some_and(|row| row.iter().all(|&b| b));
            if top_row_full {
                shared.locks.push(heights);
            } else {
                shared.keys.push(heights);
            }
        }
        Ok(shared)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fitting = shared
            .locks
            .iter()
            .cartesian_product(&shared.keys)
            .filter(|(lock, key)| lock.iter().zip(key.iter()).all(|(l, k)| l + k <= shared.space))
            .count();
        Ok(fitting.to_string())
    }
}
