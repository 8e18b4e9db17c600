use std::collections::VecDeque;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::grid::{Grid, Pos};
use crate::utils::parse::invalid_format;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 20, tags = ["grid", "parallel"])]
pub struct Solver;

const MIN_SAVING: u32 = 100;

#[derive(Debug)]
pub struct SharedData {
    /// Track cells in race order; the index is the time from the start.
    track: Vec<Pos>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let map = Grid::parse_with(input, |b| matches!(b, b'#' | b'.' | b'S' | b'E').then_some(b))?;
        let start = map.find_byte(b'S').ok_or_else(|| invalid_format("no start `S`"))?;
        let end = map.find_byte(b'E').ok_or_else(|| invalid_format("no end `E`"))?;

        let mut prev = map.map(|_| None::<Pos>);
        let mut queue = VecDeque::from([start]);
        let mut seen = map.map(|_| false);
        seen[start] = true;
        while let Some(p) = queue.pop_front() {
            for n in map.neighbors4(p) {
                if map[n] != b'#' && !seen[n] {
                    seen[n] = true;
                    prev[n] = Some(p);
                    queue.push_back(n);
                }
            }
        }
        if !seen[end] {
            return Err(invalid_format("end is not reachable from the start"));
        }
        let mut track = vec![end];
        while let Some(p) = prev[track[track.len() - 1]] {
            track.push(p);
        }
        track.reverse();
        Ok(SharedData { track })
    }
}

/// Cheats of length at most `radius` that save at least `min_saving` picoseconds.
fn count_cheats(track: &[Pos], radius: u32, min_saving: u32) -> usize {
    let min_saving = min_saving as usize;
    track
        .par_iter()
        .enumerate()
        .map(|(i, &a)| {
            track
                .iter()
                .enumerate()
                .skip(i + min_saving)
                .filter(|&(j, &b)| {
                    let d = a.manhattan(b);
                    d <= radius && j - i >= min_saving + d as usize
                })
                .count()
        })
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_cheats(&shared.track, 2, MIN_SAVING).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_cheats(&shared.track, 20, MIN_SAVING).to_string())
    }
}
