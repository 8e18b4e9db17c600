use std::collections::VecDeque;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::grid::{Grid, Pos};
use crate::utils::parse::{ints_exact, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 18, tags = ["grid", "graph"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    bytes: Vec<Pos>,
    size: usize,
    first_fallen: usize,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let bytes = parse_lines(input, |line| {
            let [x, y] = ints_exact::<i32, 2>(line)?;
            if x < 0 || y < 0 {
                anyhow::bail!("negative coordinate");
            }
            Ok(Pos::new(x, y))
        })?;
        // The worked example is a 7x7 room with 12 fallen bytes.
        let small = bytes.iter().all(|p| p.x < 7 && p.y < 7);
        let (size, first_fallen) = if small { (7, 12) } else { (71, 1024) };
        if let Some(p) = bytes.iter().find(|p| p.x as usize >= size || p.y as usize >= size) {
            return Err(ParseError::InvalidFormat(format!("{},{} is outside the memory space", p.x, p.y)));
        }
        Ok(SharedData {
            bytes,
            size,
            first_fallen,
        })
    }
}

impl SharedData {
    /// Steps from the top-left to the bottom-right corner after `fallen` bytes.
    fn shortest_path(&self, fallen: usize) -> Option<usize> {
        let mut blocked = Grid::new(self.size, self.size, false);
        for &p in self.bytes.iter().take(fallen) {
            blocked[p] = true;
        }
        let goal = Pos::new(self.size as i32 - 1, self.size as i32 - 1);
        let start = Pos::new(0, 0);
        if blocked[start] {
            return None;
        }
        let mut dist = Grid::new(self.size, self.size, usize::MAX);
        dist[start] = 0;
        let mut queue = VecDeque::from([start]);
        while let Some(p) = queue.pop_front() {
            if p == goal {
                return Some(dist[p]);
            }
            for n in p.neighbors4() {
                if blocked.get(n) == Some(&false) && dist[n] == usize::MAX {
                    dist[n] = dist[p] + 1;
                    queue.push_back(n);
                }
            }
        }
        None
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .shortest_path(shared.first_fallen)
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::no_answer("exit is unreachable"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // Smallest byte count that cuts the path off.
        let (mut lo, mut hi) = (0, shared.bytes.len());
        if shared.shortest_path(hi).is_some() {
            return Err(SolveError::no_answer("the exit never gets cut off"));
        }
        while lo + 1 < hi {
            let mid = (lo + hi) / 2;
            if shared.shortest_path(mid).is_some() {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        let p = shared.bytes[hi - 1];
        Ok(format!("{},{}", p.x, p.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "\
5,4
4,2
4,5
3,0
2,1
6,3
2,4
1,5
0,6
3,3
2,6
5,1
1,2
5,5
2,5
6,5
1,4
0,4
6,4
1,1
6,1
1,0
0,5
1,6
2,0
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "22");
        assert_eq!(solve::<Solver, 2>(EXAMPLE), "6,1");
    }

    #[test]
    fn test_large_room_detected() {
        let shared = Solver::parse("70,70\n").unwrap();
        assert_eq!((shared.size, shared.first_fallen), (71, 1024));
    }
}
