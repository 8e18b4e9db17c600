use std::collections::{BTreeSet, HashMap};

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse::{invalid_format, parse_lines, sections};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 24, tags = ["logic"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    And,
    Or,
    Xor,
}

#[derive(Debug, Clone, Copy)]
pub struct Gate<'a> {
    lhs: &'a str,
    op: Op,
    rhs: &'a str,
    out: &'a str,
}

#[derive(Debug)]
pub struct SharedData<'a> {
    initial: HashMap<&'a str, bool>,
    gates: Vec<Gate<'a>>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (wires, gates) = sections(input)
            .ok_or_else(|| invalid_format("missing blank line between wires and gates"))?;
        let initial = parse_lines(wires, |line| {
            let (name, value) = line.split_once(':').ok_or_else(|| anyhow!("expected `wire: value`"))?;
            match value.trim() {
                "0" => Ok((name.trim(), false)),
                "1" => Ok((name.trim(), true)),
                other => bail!("wire value must be 0 or 1, got {:?}", other),
            }
        })?
        .into_iter()
        .collect();
        let gates = parse_lines(gates, |line| {
            let Some((lhs, op, rhs, "->", out)) = line.split_whitespace().collect_tuple() else {
                bail!("expected `a OP b -> c`");
            };
            let op = match op {
                "AND" => Op::And,
                "OR" => Op::Or,
                "XOR" => Op::Xor,
                other => bail!("unknown gate {:?}", other),
            };
            Ok(Gate { lhs, op, rhs, out })
        })?;
        Ok(SharedData { initial, gates })
    }
}

fn simulate<'a>(shared: &SharedData<'a>) -> Result<HashMap<&'a str, bool>, SolveError> {
    let mut values = shared.initial.clone();
    let mut pending: Vec<Gate<'a>> = shared.gates.clone();
    while !pending.is_empty() {
        let before = pending.len();
        pending.retain(|g| match (values.get(g.lhs), values.get(g.rhs)) {
            (Some(&a), Some(&b)) => {
                let v = match g.op {
                    Op::And => a & b,
                    Op::Or => a | b,
                    Op::Xor => a ^ b,
                };
                values.insert(g.out, v);
                false
            }
            _ => true,
        });
        if pending.len() == before {
            return Err(SolveError::no_answer(format!(
                "{} gates never receive both inputs",
                before
            )));
        }
    }
    Ok(values)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let values = simulate(shared)?;
        let number = values
            .iter()
            .filter(|(name, _)| name.starts_with('z'))
            .sorted()
            .rev()
            .fold(0u64, |acc, (_, &bit)| (acc << 1) | u64::from(bit));
        Ok(number.to_string())
    }
}

fn is_input(wire: &str) -> bool {
    wire.starts_with('x') || wire.starts_with('y')
}

/// Gates that break the ripple-carry adder pattern.
fn misplaced<'a>(gates: &[Gate<'a>]) -> BTreeSet<&'a str> {
    let top_z = gates
        .iter()
        .map(|g| g.out)
        .filter(|o| o.starts_with('z'))
        .max()
        .unwrap_or("z00");
    let feeds = |wire: &str, op: Op| {
        gates
            .iter()
            .any(|g| g.op == op && (g.lhs == wire || g.rhs == wire))
    };
    let first_bit = |g: &Gate<'_>| g.lhs.ends_with("00") && g.rhs.ends_with("00");

    gates
        .iter()
        .filter(|g| {
            // Sum bits come from an XOR, except the final carry.
            (g.out.starts_with('z') && g.op != Op::Xor && g.out != top_z)
                // Second-level XORs combine carries and must write a sum bit.
                || (g.op == Op::Xor && !g.out.starts_with('z') && !is_input(g.lhs) && !is_input(g.rhs))
                // Half-sums feed the next XOR.
                || (g.op == Op::Xor && is_input(g.lhs) && !first_bit(*g) && !feeds(g.out, Op::Xor))
                // Carries feed the carry OR.
                || (g.op == Op::And && !first_bit(*g) && !feeds(g.out, Op::Or))
        })
        .map(|g| g.out)
        .collect()
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(misplaced(&shared.gates).iter().join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const SMALL: &str = "\
x00: 1
x01: 1
x02: 1
y00: 0
y01: 1
y02: 0

x00 AND y00 -> z00
x01 XOR y01 -> z01
x02 OR y02 -> z02
";

    /// Three-bit ripple-carry adder, with names chosen so a swap is easy to spot.
    const ADDER: &str = "\
x00: 1
x01: 0
x02: 1
y00: 1
y01: 1
y02: 0

x00 XOR y00 -> z00
x00 AND y00 -> c00
x01 XOR y01 -> s01
x01 AND y01 -> a01
s01 XOR c00 -> z01
s01 AND c00 -> b01
a01 OR b01 -> c01
x02 XOR y02 -> s02
x02 AND y02 -> a02
s02 XOR c01 -> z02
s02 AND c01 -> b02
a02 OR b02 -> z03
";

    #[test]
    fn test_small_example() {
        assert_eq!(solve::<Solver, 1>(SMALL), "4");
    }

    #[test]
    fn test_adder_adds() {
        // 5 + 3
        assert_eq!(solve::<Solver, 1>(ADDER), "8");
        assert_eq!(solve::<Solver, 2>(ADDER), "");
    }

    #[test]
    fn test_swapped_outputs_are_flagged() {
        let swapped = ADDER
            .replace("x02 XOR y02 -> s02", "x02 XOR y02 -> tmp")
            .replace("x02 AND y02 -> a02", "x02 AND y02 -> s02")
            .replace("-> tmp", "-> a02");
        assert_eq!(solve::<Solver, 2>(&swapped), "a02,s02");
    }

    #[test]
    fn test_crlf_input() {
        let crlf = SMALL.replace('\n', "\r\n");
        assert_eq!(solve::<Solver, 1>(&crlf), "4");
    }
}
