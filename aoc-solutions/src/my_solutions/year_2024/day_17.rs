use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse::{ints, invalid_format, solve_failed};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 17, tags = ["vm"])]
pub struct Solver;

#[derive(Debug, Clone)]
pub struct Computer {
    registers: [u64; 3],
    program: Vec<u8>,
}

impl AocParser for Solver {
    type SharedData<'a> = Computer;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (regs, prog) = input
            .split_once("Program:")
            .ok_or_else(|| invalid_format("missing `Program:` line"))?;
        let registers: [u64; 3] = ints::<u64>(regs)?
            .try_into()
            .map_err(|v: Vec<u64>| invalid_format(format!("expected 3 registers, found {}", v.len())))?;
        let program = ints::<u8>(prog)?;
        if let Some(bad) = program.iter().find(|&&v| v > 7) {
            return Err(invalid_format(format!("{} is not a 3-bit value", bad)));
        }
        Ok(Computer { registers, program })
    }
}

fn combo(lit: u8, [a, b, c]: [u64; 3]) -> Result<u64, SolveError> {
    match lit {
        0..=3 => Ok(u64::from(lit)),
        4 => Ok(a),
        5 => Ok(b),
        6 => Ok(c),
        _ => Err(solve_failed("reserved combo operand 7")),
    }
}

/// Division by a power of two; shifts past the width give zero.
fn shr(value: u64, by: u64) -> u64 {
    u32::try_from(by)
        .ok()
        .and_then(|by| value.checked_shr(by))
        .unwrap_or(0)
}

/// Instructions a single run may execute before it is treated as non-halting.
const STEP_LIMIT: usize = 1 << 20;

impl Computer {
    fn run(&self, a: u64) -> Result<Vec<u8>, SolveError> {
        let [mut a, mut b, mut c] = [a, self.registers[1], self.registers[2]];
        let mut out = Vec::new();
        let mut ip = 0;
        let mut steps = 0;
        while ip + 1 < self.program.len() {
            steps += 1;
            if steps > STEP_LIMIT {
                return Err(SolveError::no_answer(format!(
                    "program still running after {} instructions",
                    STEP_LIMIT
                )));
            }
            let (op, lit) = (self.program[ip], self.program[ip + 1]);
            ip += 2;
            match op {
                0 => a = shr(a, combo(lit, [a, b, c])?),
                1 => b ^= u64::from(lit),
                2 => b = combo(lit, [a, b, c])? % 8,
                3 if a != 0 => ip = usize::from(lit),
                3 => {}
                4 => b ^= c,
                5 => out.push((combo(lit, [a, b, c])? % 8) as u8),
                6 => b = shr(a, combo(lit, [a, b, c])?),
                _ => c = shr(a, combo(lit, [a, b, c])?),
            }
        }
        Ok(out)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.run(shared.registers[0])?.iter().join(","))
    }
}

impl PartSolver<2> for Solver {
    /// Each loop iteration consumes three bits of `A`, so build `A` from the
    /// last output backwards, keeping every prefix that reproduces the suffix.
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let program = &shared.program;
        let mut candidates = vec![0u64];
        for len in 1..=program.len() {
            let suffix = &program[program.len() - len..];
            let mut next = Vec::new();
            for &prefix in &candidates {
                for bits in 0..8 {
                    let a = (prefix << 3) | bits;
                    if shared.run(a)? == suffix {
                        next.push(a);
                    }
                }
            }
            candidates = next;
        }
        candidates
            .into_iter()
            .min()
            .map(|a| a.to_string())
            .ok_or_else(|| SolveError::no_answer("no register value reproduces the program"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    #[test]
    fn test_example_part1() {
        let input = "Register A: 729\nRegister B: 0\nRegister C: 0\n\nProgram: 0,1,5,4,3,0\n";
        assert_eq!(solve::<Solver, 1>(input), "4,6,3,5,6,3,5,2,1,0");
    }

    #[test]
    fn test_example_part2() {
        let input = "Register A: 2024\nRegister B: 0\nRegister C: 0\n\nProgram: 0,3,5,4,3,0\n";
        assert_eq!(solve::<Solver, 2>(input), "117440");
    }

    #[test]
    fn test_small_programs() {
        let computer = Solver::parse("Register A: 10\nRegister B: 0\nRegister C: 0\n\nProgram: 5,0,5,1,5,4\n").unwrap();
        assert_eq!(computer.run(10).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_endless_program_stops_at_step_limit() {
        let mut computer = Solver::parse("Register A: 1\nRegister B: 0\nRegister C: 0\n\nProgram: 3,0\n").unwrap();
        assert!(matches!(
            <Solver as PartSolver<1>>::solve(&mut computer),
            Err(SolveError::NoAnswer(_))
        ));
        assert!(matches!(
            <Solver as PartSolver<2>>::solve(&mut computer),
            Err(SolveError::NoAnswer(_))
        ));
    }
}
