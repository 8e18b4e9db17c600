use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;

use crate::utils::parse::invalid_format;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 3, tags = ["regex"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Mul(u32, u32),
    Do,
    Dont,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let re = Regex::new(r"mul\((\d{1,3}),(\d{1,3})\)|do\(\)|don't\(\)").map_err(invalid_format)?;
        re.captures_iter(input)
            .map(|caps| match &caps[0] {
                "do()" => Ok(Instruction::Do),
                "don't()" => Ok(Instruction::Dont),
                _ => Ok(Instruction::Mul(
                    caps[1].parse().map_err(invalid_format)?,
                    caps[2].parse().map_err(invalid_format)?,
                )),
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared
            .iter()
            .map(|ins| match *ins {
                Instruction::Mul(a, b) => u64::from(a) * u64::from(b),
                _ => 0,
            })
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (_, total) = shared.iter().fold((true, 0u64), |(enabled, total), ins| match *ins {
            Instruction::Do => (true, total),
            Instruction::Dont => (false, total),
            Instruction::Mul(a, b) if enabled => (enabled, total + u64::from(a) * u64::from(b)),
            Instruction::Mul(..) => (enabled, total),
        });
        Ok(total.to_string())
    }
}
