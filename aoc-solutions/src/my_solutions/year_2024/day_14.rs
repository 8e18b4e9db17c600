use std::collections::HashSet;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

use crate::utils::grid::Pos;
use crate::utils::parse::{ints_exact, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 14, tags = ["simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy)]
pub struct Robot {
    pos: Pos,
    vel: Pos,
}

#[derive(Debug)]
pub struct SharedData {
    robots: Vec<Robot>,
    width: i32,
    height: i32,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let robots = parse_lines(input, |line| {
            let [px, py, vx, vy] = ints_exact::<i32, 4>(line)?;
            Ok(Robot {
                pos: Pos::new(px, py),
                vel: Pos::new(vx, vy),
            })
        })?;
        // The worked example uses a smaller room than the real puzzle.
        let small = robots.iter().all(|r| r.pos.x < 11 && r.pos.y < 7);
        let (width, height) = if small { (11, 7) } else { (101, 103) };
        Ok(SharedData {
            robots,
            width,
            height,
        })
    }
}

impl SharedData {
    fn positions_at(&self, t: i32) -> impl Iterator<Item = Pos> + '_ {
        self.robots.iter().map(move |r| {
            let p = r.pos + r.vel * t;
            Pos::new(p.x.rem_euclid(self.width), p.y.rem_euclid(self.height))
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (mid_x, mid_y) = (shared.width / 2, shared.height / 2);
        let mut quadrants = [0u64; 4];
        for p in shared.positions_at(100) {
            if p.x == mid_x || p.y == mid_y {
                continue;
            }
            let q = usize::from(p.x > mid_x) + 2 * usize::from(p.y > mid_y);
            quadrants[q] += 1;
        }
        Ok(quadrants.iter().product::<u64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // Positions repeat with period width * height.
        let period = shared.width * shared.height;
        (0..period)
            .find(|&t| {
                let mut occupied = HashSet::with_capacity(shared.robots.len());
                shared.positions_at(t).all(|p| occupied.insert(p))
            })
            .inspect(|t| debug!(second = t, "robots stopped overlapping"))
            .map(|t| t.to_string())
            .ok_or_else(|| SolveError::no_answer("robots always overlap"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "\
p=0,4 v=3,-3
p=6,3 v=-1,-3
p=10,3 v=-1,2
p=2,0 v=2,-1
p=0,0 v=1,3
p=3,0 v=-2,-2
p=7,6 v=-1,-3
p=3,0 v=-1,-2
p=9,3 v=2,3
p=7,3 v=-1,2
p=2,4 v=2,-3
p=9,5 v=-3,-3
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "12");
    }

    #[test]
    fn test_room_size_detection() {
        let shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!((shared.width, shared.height), (11, 7));
        let shared = Solver::parse("p=50,80 v=1,1\n").unwrap();
        assert_eq!((shared.width, shared.height), (101, 103));
    }

    #[test]
    fn test_single_robot_never_overlaps() {
        assert_eq!(solve::<Solver, 2>("p=2,4 v=2,-3\n"), "0");
    }

    #[test]
    fn test_wraparound() {
        let shared = Solver::parse("p=2,4 v=2,-3\n").unwrap();
        let at: Vec<Pos> = shared.positions_at(5).collect();
        assert_eq!(at, vec![Pos::new(1, 3)]);
    }
}
