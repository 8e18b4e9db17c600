use std::cmp::Reverse;
use std::collections::BinaryHeap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Pos};
use crate::utils::parse::invalid_format;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 16, tags = ["grid", "graph"])]
pub struct Solver;

const STEP: u64 = 1;
const TURN: u64 = 1000;

#[derive(Debug)]
pub struct SharedData {
    maze: Grid<u8>,
    start: Pos,
    end: Pos,
    best: Option<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let maze = Grid::parse_with(input, |b| matches!(b, b'#' | b'.' | b'S' | b'E').then_some(b))?;
        let start = maze.find_byte(b'S').ok_or_else(|| invalid_format("no start tile `S`"))?;
        let end = maze.find_byte(b'E').ok_or_else(|| invalid_format("no end tile `E`"))?;
        Ok(SharedData {
            maze,
            start,
            end,
            best: None,
        })
    }
}

/// Per-direction distance table.
type Dist = Grid<[u64; 4]>;

/// Dijkstra over `(position, heading)`. With `reverse`, moves walk backwards so
/// the result is the cost from each state to the sources.
fn dijkstra(maze: &Grid<u8>, sources: &[(Pos, Direction)], reverse: bool) -> Dist {
    let mut dist = Grid::new(maze.width(), maze.height(), [u64::MAX; 4]);
    let mut heap = BinaryHeap::new();
    for &(p, d) in sources {
        dist[p][d.index()] = 0;
        heap.push(Reverse((0, p, d)));
    }
    while let Some(Reverse((cost, p, d))) = heap.pop() {
        if cost > dist[p][d.index()] {
            continue;
        }
        let forward = if reverse { p.step(d.opposite()) } else { p.step(d) };
        let moves = [
            (forward, d, STEP),
            (p, d.turn_left(), TURN),
            (p, d.turn_right(), TURN),
        ];
        for (np, nd, step) in moves {
            if maze.get(np).is_none_or(|&b| b == b'#') {
                continue;
            }
            let next = cost + step;
            if next < dist[np][nd.index()] {
                dist[np][nd.index()] = next;
                heap.push(Reverse((next, np, nd)));
            }
        }
    }
    dist
}

fn best_score(shared: &mut SharedData) -> Result<u64, SolveError> {
    if let Some(best) = shared.best {
        return Ok(best);
    }
    let dist = dijkstra(&shared.maze, &[(shared.start, Direction::Right)], false);
    let best = dist[shared.end].iter().copied().min().unwrap_or(u64::MAX);
    if best == u64::MAX {
        return Err(SolveError::no_answer("end is unreachable"));
    }
    shared.best = Some(best);
    Ok(best)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(best_score(shared)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let best = best_score(shared)?;
        let from_start = dijkstra(&shared.maze, &[(shared.start, Direction::Right)], false);
        let ends: Vec<_> = Direction::ALL.iter().map(|&d| (shared.end, d)).collect();
        let to_end = dijkstra(&shared.maze, &ends, true);
        let tiles = shared
            .maze
            .positions()
            .filter(|&p| {
                (0..4).any(|d| {
                    let (a, b) = (from_start[p][d], to_end[p][d]);
                    a != u64::MAX && b != u64::MAX && a + b == best
                })
            })
            .count();
        Ok(tiles.to_string())
    }
}
