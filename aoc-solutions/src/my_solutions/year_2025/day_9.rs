use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use tracing::debug;

use crate::utils::grid::{Grid, Pos};
use crate::utils::parse::{ints_exact, invalid_format, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 9, tags = ["geometry", "grid"])]
pub struct Solver;

impl AocParser for Solver {
    /// Red tiles in loop order.
    type SharedData<'a> = Vec<(i64, i64)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let tiles = parse_lines(input, |line| {
            let [x, y] = ints_exact::<i64, 2>(line)?;
            Ok((x, y))
        })?;
        if tiles.len() < 2 {
            return Err(invalid_format("need at least two red tiles"));
        }
        Ok(tiles)
    }
}

fn area(a: (i64, i64), b: (i64, i64)) -> i64 {
    ((a.0 - b.0).abs() + 1) * ((a.1 - b.1).abs() + 1)
}

/// Coordinate compression of one axis: value `v` at sorted index `i` maps to
/// `2i + 1`, leaving even indices for the gaps between distinct values.
struct Axis(Vec<i64>);

impl Axis {
    fn new(values: impl Iterator<Item = i64>) -> Self {
        Self(values.sorted_unstable().dedup().collect())
    }

    fn index(&self, v: i64) -> usize {
        2 * self.0.partition_point(|&x| x < v) + 1
    }

    fn cells(&self) -> usize {
        2 * self.0.len() + 1
    }
}

/// Prefix sums over tiles that lie outside the red/green loop.
struct Outside {
    sums: Vec<Vec<u32>>,
}

impl Outside {
    fn new(tiles: &[(i64, i64)], xs: &Axis, ys: &Axis) -> Self {
        let compressed = |&(x, y): &(i64, i64)| Pos::new(xs.index(x) as i32, ys.index(y) as i32);
        let mut boundary = Grid::new(xs.cells(), ys.cells(), false);
        for (a, b) in tiles.iter().map(compressed).circular_tuple_windows() {
            let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
            let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
            for y in y0..=y1 {
                for x in x0..=x1 {
                    boundary[Pos::new(x, y)] = true;
                }
            }
        }

        // The padding row and column guarantee (0, 0) is outside.
        let mut outside = boundary.map(|_| false);
        let mut stack = vec![Pos::new(0, 0)];
        outside[Pos::new(0, 0)] = true;
        while let Some(p) = stack.pop() {
            for n in boundary.neighbors4(p) {
                if !boundary[n] && !outside[n] {
                    outside[n] = true;
                    stack.push(n);
                }
            }
        }

        let (w, h) = (outside.width(), outside.height());
        let mut sums = vec![vec![0u32; w + 1]; h + 1];
        for (y, row) in outside.rows().enumerate() {
            for (x, &out) in row.iter().enumerate() {
                sums[y + 1][x + 1] = sums[y][x + 1] + sums[y + 1][x] - sums[y][x] + u32::from(out);
            }
        }
        Self { sums }
    }

    fn count(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> u32 {
        self.sums[y1 + 1][x1 + 1] + self.sums[y0][x0] - self.sums[y0][x1 + 1] - self.sums[y1 + 1][x0]
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let best = shared
            .iter()
            .tuple_combinations()
            .map(|(&a, &b)| area(a, b))
            .max()
            .unwrap_or(0);
        Ok(best.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let xs = Axis::new(shared.iter().map(|t| t.0));
        let ys = Axis::new(shared.iter().map(|t| t.1));
        debug!(width = xs.cells(), height = ys.cells(), "compressed floor");
        let outside = Outside::new(shared, &xs, &ys);
        let best = shared
            .iter()
            .tuple_combinations()
            .filter(|&(&a, &b)| {
                let (ax, bx) = (xs.index(a.0), xs.index(b.0));
                let (ay, by) = (ys.index(a.1), ys.index(b.1));
                outside.count(ax.min(bx), ay.min(by), ax.max(bx), ay.max(by)) == 0
            })
            .map(|(&a, &b)| area(a, b))
            .max()
            .unwrap_or(0);
        Ok(best.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "7,1\n11,1\n11,7\n9,7\n9,5\n2,5\n2,3\n7,3\n";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "50");
        assert_eq!(solve::<Solver, 2>(EXAMPLE), "24");
    }

    #[test]
    fn test_axis_compression() {
        let axis = Axis::new([7, 2, 11, 7].into_iter());
        assert_eq!(axis.cells(), 7);
        assert_eq!(axis.index(2), 1);
        assert_eq!(axis.index(11), 5);
    }
}
