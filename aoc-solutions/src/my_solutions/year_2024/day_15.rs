use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Direction, Grid, Pos};
use crate::utils::parse::{invalid_format, sections, solve_failed};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 15, tags = ["grid", "simulation"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    warehouse: Grid<u8>,
    moves: Vec<Direction>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (map, moves) = sections(input)
            .ok_or_else(|| invalid_format("missing blank line before the moves"))?;
        let warehouse = Grid::parse_with(map, |b| matches!(b, b'#' | b'.' | b'O' | b'@').then_some(b))?;
        if warehouse.find_byte(b'@').is_none() {
            return Err(invalid_format("no robot `@` in the warehouse"));
        }
        let moves = moves
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .map(|b| {
                Direction::from_arrow(b)
                    .ok_or_else(|| invalid_format(format!("unknown move {:?}", b as char)))
            })
            .collect::<Result<_, _>>()?;
        Ok(SharedData { warehouse, moves })
    }
}

fn widen(grid: &Grid<u8>) -> Grid<u8> {
    let mut wide = Grid::new(grid.width() * 2, grid.height(), b'.');
    for (p, &b) in grid.iter() {
        let pair = match b {
            b'O' => *b"[]",
            b'@' => *b"@.",
            b'#' => *b"##",
            _ => *b"..",
        };
        wide[Pos::new(p.x * 2, p.y)] = pair[0];
        wide[Pos::new(p.x * 2 + 1, p.y)] = pair[1];
    }
    wide
}

/// Cells that move when pushing from `robot` towards `dir`, or `None` if a wall blocks.
fn pushed(grid: &Grid<u8>, robot: Pos, dir: Direction) -> Option<Vec<Pos>> {
    let mut moving = vec![robot];
    let mut i = 0;
    while i < moving.len() {
        let next = moving[i].step(dir);
        i += 1;
        if moving.contains(&next) {
            continue;
        }
        match grid.get(next).copied() {
            None | Some(b'#') => return None,
            Some(b'O') => moving.push(next),
            Some(b'[') => {
                moving.push(next);
                if !dir.is_horizontal() {
                    moving.push(next.step(Direction::Right));
                }
            }
            Some(b']') => {
                moving.push(next);
                if !dir.is_horizontal() {
                    moving.push(next.step(Direction::Left));
                }
            }
            _ => {}
        }
    }
    Some(moving)
}

fn run(mut grid: Grid<u8>, moves: &[Direction]) -> Result<u64, SolveError> {
    let mut robot = grid
        .find_byte(b'@')
        .ok_or_else(|| solve_failed("robot vanished"))?;
    for &dir in moves {
        let Some(moving) = pushed(&grid, robot, dir) else {
            continue;
        };
        let cells: Vec<u8> = moving.iter().map(|&p| grid[p]).collect();
        for &p in &moving {
            grid[p] = b'.';
        }
        for (&p, cell) in moving.iter().zip(cells) {
            grid[p.step(dir)] = cell;
        }
        robot = robot.step(dir);
    }
    Ok(grid
        .iter()
        .filter(|&(_, &b)| b == b'O' || b == b'[')
        .map(|(p, _)| 100 * p.y as u64 + p.x as u64)
        .sum())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(run(shared.warehouse.clone(), &shared.moves)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(run(widen(&shared.warehouse), &shared.moves)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const SMALL: &str = "\
########
#..O.O.#
##@.O..#
#...O..#
#.#.O..#
#...O..#
#......#
########

<^^>>>vv<v>>v<<
";

    #[test]
    fn test_small_example() {
        assert_eq!(solve::<Solver, 1>(SMALL), "2028");
    }

    #[test]
    fn test_wide_boxes() {
        let input = "#######\n#...#.#\n#.....#\n#..OO@#\n#..O..#\n#.....#\n#######\n\n<vv<<^^<<^^\n";
        assert_eq!(solve::<Solver, 2>(input), "618");
    }
}
