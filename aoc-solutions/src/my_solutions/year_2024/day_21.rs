use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::grid::Pos;
use crate::utils::parse::{invalid_format, lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 21, tags = ["dp"])]
pub struct Solver;

const NUMERIC: [&[u8]; 4] = [b"789", b"456", b"123", b" 0A"];
const DIRECTIONAL: [&[u8]; 2] = [b" ^A", b"<v>"];

#[derive(Debug)]
pub struct Code<'a> {
    keys: &'a str,
    value: u64,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Code<'a>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        lines(input)
            .map(str::trim)
            .map(|keys| {
                if let Some(b) = keys.bytes().find(|&b| b == b' ' || key_pos(&NUMERIC, b).is_none()) {
                    return Err(invalid_format(format!("{:?} is not on the numeric keypad", b as char)));
                }
                let digits: String = keys.chars().filter(char::is_ascii_digit).collect();
                let value = digits.parse().map_err(invalid_format)?;
                Ok(Code { keys, value })
            })
            .collect()
    }
}

fn key_pos(pad: &[&[u8]], key: u8) -> Option<Pos> {
    pad.iter().enumerate().find_map(|(y, row)| {
        row.iter()
            .position(|&k| k == key)
            .map(|x| Pos::new(x as i32, y as i32))
    })
}

/// Key sequences (each ending in `A`) that move from `from` to `to` in one
/// straight leg per axis without crossing the gap.
fn routes(pad: &[&[u8]], from: u8, to: u8) -> Vec<Vec<u8>> {
    let (Some(a), Some(b), Some(gap)) = (key_pos(pad, from), key_pos(pad, to), key_pos(pad, b' ')) else {
        return Vec::new();
    };
    let d = b - a;
    let horizontal = vec![if d.x < 0 { b'<' } else { b'>' }; d.x.unsigned_abs() as usize];
    let vertical = vec![if d.y < 0 { b'^' } else { b'v' }; d.y.unsigned_abs() as usize];

    let mut out = Vec::new();
    if Pos::new(b.x, a.y) != gap {
        out.push([horizontal.as_slice(), &vertical, b"A"].concat());
    }
    if Pos::new(a.x, b.y) != gap && !(d.x == 0 || d.y == 0) {
        out.push([vertical.as_slice(), &horizontal, b"A"].concat());
    }
    out
}

/// `(a, b)` pairs for typing `seq` starting from `A`.
fn presses(seq: &[u8]) -> impl Iterator<Item = (u8, u8)> + '_ {
    std::iter::once(b'A').chain(seq.iter().copied()).zip(seq.iter().copied())
}

/// Human presses needed to move from `from` to `to` and press it on a
/// directional keypad that sits `depth` robots away from the human.
struct PressCost;

impl DpProblem<(u8, u8, u8), u64> for PressCost {
    fn deps(&self, &(from, to, depth): &(u8, u8, u8)) -> Vec<(u8, u8, u8)> {
        if depth == 0 {
            return Vec::new();
        }
        routes(&DIRECTIONAL, from, to)
            .iter()
            .flat_map(|r| presses(r).map(|(a, b)| (a, b, depth - 1)).collect::<Vec<_>>())
            .collect()
    }

    fn compute(&self, &(from, to, depth): &(u8, u8, u8), deps: Vec<u64>) -> u64 {
        if depth == 0 {
            return 1;
        }
        let mut rest = deps.as_slice();
        routes(&DIRECTIONAL, from, to)
            .iter()
            .map(|r| {
                let (costs, tail) = rest.split_at(r.len());
                rest = tail;
                costs.iter().sum()
            })
            .min()
            .unwrap_or(u64::MAX)
    }
}

fn complexity(codes: &[Code<'_>], robots: u8) -> u64 {
    let cache = DpCache::with_problem(HashMapBackend::new(), PressCost);
    codes
        .iter()
        .map(|code| {
            let len: u64 = presses(code.keys.as_bytes())
                .map(|(a, b)| {
                    routes(&NUMERIC, a, b)
                        .iter()
                        .map(|r| presses(r).map(|(x, y)| cache.get(&(x, y, robots))).sum::<u64>())
                        .min()
                        .unwrap_or(0)
                })
                .sum();
            len * code.value
        })
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(complexity(shared, 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(complexity(shared, 25).to_string())
    }
}
