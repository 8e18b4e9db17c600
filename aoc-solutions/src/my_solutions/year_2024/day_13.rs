use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::{blocks, ints_exact};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 13, tags = ["math"])]
pub struct Solver;

#[derive(Debug, Clone, Copy)]
pub struct Machine {
    a: (i64, i64),
    b: (i64, i64),
    prize: (i64, i64),
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Machine>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        blocks(input)
            .map(|block| {
                let [ax, ay, bx, by, px, py] = ints_exact::<i64, 6>(block)?;
                Ok(Machine {
                    a: (ax, ay),
                    b: (bx, by),
                    prize: (px, py),
                })
            })
            .collect()
    }
}

impl Machine {
    /// Cost of the unique integer press counts, by Cramer's rule.
    fn tokens(&self, offset: i64, max_presses: Option<i64>) -> Option<i64> {
        let (px, py) = (self.prize.0 + offset, self.prize.1 + offset);
        let det = self.a.0 * self.b.1 - self.a.1 * self.b.0;
        if det == 0 {
            return None;
        }
        let a_num = px * self.b.1 - py * self.b.0;
        let b_num = self.a.0 * py - self.a.1 * px;
        if a_num % det != 0 || b_num % det != 0 {
            return None;
        }
        let (a, b) = (a_num / det, b_num / det);
        if a < 0 || b < 0 || max_presses.is_some_and(|m| a > m || b > m) {
            return None;
        }
        Some(3 * a + b)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: i64 = shared.iter().filter_map(|m| m.tokens(0, Some(100))).sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: i64 = shared
            .iter()
            .filter_map(|m| m.tokens(10_000_000_000_000, None))
            .sum();
        Ok(total.to_string())
    }
}
