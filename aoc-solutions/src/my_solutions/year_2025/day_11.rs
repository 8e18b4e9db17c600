use std::collections::HashMap;

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::dp_cache::{DpCache, HashMapBackend};
use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 11, tags = ["graph", "dp"])]
pub struct Solver;

type Devices<'a> = HashMap<&'a str, Vec<&'a str>>;

impl AocParser for Solver {
    type SharedData<'a> = Devices<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(parse_lines(input, |line| {
            let (device, outputs) = line
                .split_once(':')
                .ok_or_else(|| anyhow!("expected `device: outputs`"))?;
            Ok((device.trim(), outputs.split_whitespace().collect()))
        })?
        .into_iter()
        .collect())
    }
}

/// Number of distinct paths from `from` to `to`; the device graph is acyclic.
fn count_paths<'a>(devices: &Devices<'a>, from: &'a str, to: &'a str) -> u64 {
    let cache = DpCache::new(
        HashMapBackend::new(),
        |&node: &&'a str| {
            if node == to {
                Vec::new()
            } else {
                devices.get(node).cloned().unwrap_or_default()
            }
        },
        |&node: &&'a str, deps: Vec<u64>| if node == to { 1 } else { deps.iter().sum() },
    );
    cache.get(&from)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_paths(shared, "you", "out").to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let via = |a: &str, b: &str| {
            count_paths(shared, "svr", a) * count_paths(shared, a, b) * count_paths(shared, b, "out")
        };
        Ok((via("dac", "fft") + via("fft", "dac")).to_string())
    }
}
