use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::invalid_format;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 6, tags = ["parsing"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Mul,
}

/// One worksheet problem: its operator and its block of digit rows.
#[derive(Debug)]
pub struct Problem {
    op: Op,
    /// Rows of the block, each padded to the block width with spaces.
    rows: Vec<Vec<u8>>,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Problem>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        // Leading spaces are significant, so only blank lines are dropped.
        let mut lines: Vec<&[u8]> = input
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::as_bytes)
            .collect();
        let ops = lines.pop().ok_or_else(|| invalid_format("empty worksheet"))?;
        let width = lines.iter().chain([&ops]).map(|l| l.len()).max().unwrap_or(0);
        let cell = |line: &[u8], x: usize| line.get(x).copied().unwrap_or(b' ');
        let blank = |x: usize| lines.iter().chain([&ops]).all(|&l| cell(l, x) == b' ');

        let mut problems = Vec::new();
        let mut x = 0;
        while x < width {
            if blank(x) {
                x += 1;
                continue;
            }
            let start = x;
            while x < width && !blank(x) {
                x += 1;
            }
            let op = match ops[start.min(ops.len())..x.min(ops.len())]
                .iter()
                .find(|b| !b.is_ascii_whitespace())
            {
                Some(b'+') => Op::Add,
                Some(b'*') => Op::Mul,
                other => {
                    return Err(invalid_format(format!(
                        "column {} has operator {:?}",
                        start + 1,
                        other.map(|&b| b as char)
                    )));
                }
            };
            let rows = lines
                .iter()
                .map(|&l| (start..x).map(|i| cell(l, i)).collect::<Vec<u8>>())
                .collect::<Vec<_>>();
            if let Some(bad) = rows.iter().flatten().find(|b| !b.is_ascii_digit() && **b != b' ') {
                return Err(invalid_format(format!("unexpected {:?} in worksheet", *bad as char)));
            }
            problems.push(Problem { op, rows });
        }
        Ok(problems)
    }
}

fn number(digits: impl Iterator<Item = u8>) -> Option<u64> {
    digits
        .filter(u8::is_ascii_digit)
        .fold(None, |acc, d| Some(acc.unwrap_or(0) * 10 + u64::from(d - b'0')))
}

impl Problem {
    fn apply(&self, operands: impl Iterator<Item = u64>) -> u64 {
        match self.op {
            Op::Add => operands.sum(),
            Op::Mul => operands.product(),
        }
    }

    /// Numbers read left to right along each row.
    fn by_rows(&self) -> u64 {
        self.apply(self.rows.iter().filter_map(|row| number(row.iter().copied())))
    }

    /// Numbers read top to bottom down each column.
    fn by_columns(&self) -> u64 {
        let width = self.rows.first().map_or(0, Vec::len);
        self.apply((0..width).rev().filter_map(|x| number(self.rows.iter().map(|row| row[x]))))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(Problem::by_rows).sum::<u64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(Problem::by_columns).sum::<u64>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "123 328  51 64 \n 45 64  387 23 \n  6 98  215 314\n*   +   *   +  \n";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "4277556");
        assert_eq!(solve::<Solver, 2>(EXAMPLE), "3263827");
    }

    #[test]
    fn test_problem_count() {
        let problems = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(problems.len(), 4);
        assert_eq!(problems[0].op, Op::Mul);
        assert_eq!(problems[0].by_rows(), 33210);
    }

    #[test]
    fn test_missing_operator() {
        assert!(Solver::parse("12 3\n+   \n").is_err());
    }
}
