use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 7, tags = ["search"])]
pub struct Solver;

#[derive(Debug)]
pub struct Equation {
    target: u64,
    operands: Vec<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Equation>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let (target, rest) = line
                .split_once(':')
                .ok_or_else(|| anyhow!("expected `target: operands`"))?;
            let operands = rest
                .split_whitespace()
                .map(|v| v.parse::<u64>().map_err(anyhow::Error::from))
                .collect::<anyhow::Result<Vec<_>>>()?;
            if operands.is_empty() {
                return Err(anyhow!("no operands"));
            }
            Ok(Equation {
                target: target.trim().parse()?,
                operands,
            })
        })
    }
}

/// Undo operators from the right: a `*` must divide, a `+` must not
/// underflow and a `||` must be a decimal suffix.
fn solvable(target: u64, operands: &[u64], concat: bool) -> bool {
    let Some((&last, rest)) = operands.split_last() else {
        return false;
    };
    if rest.is_empty() {
        return target == last;
    }
    if last != 0 && target % last == 0 && solvable(target / last, rest, concat) {
        return true;
    }
    if target >= last && solvable(target - last, rest, concat) {
        return true;
    }
    if concat {
        let modulus = 10u64.pow(last.checked_ilog10().unwrap_or(0) + 1);
        if target > last && target % modulus == last {
            return solvable(target / modulus, rest, concat);
        }
    }
    false
}

fn calibration(equations: &[Equation], concat: bool) -> u64 {
    equations
        .par_iter()
        .filter(|eq| solvable(eq.target, &eq.operands, concat))
        .map(|eq| eq.target)
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(calibration(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(calibration(shared, true).to_string())
    }
}
