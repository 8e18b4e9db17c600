use std::collections::HashMap;

use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;
use tracing::debug;

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 10, tags = ["dp", "parallel"])]
pub struct Solver;

#[derive(Debug)]
pub struct Machine {
    /// Indicator pattern as a bit mask.
    lights: u32,
    /// Counters each button touches.
    buttons: Vec<Vec<usize>>,
    joltage: Vec<u16>,
}

fn bracketed<'a>(token: &'a str, open: char, close: char) -> anyhow::Result<&'a str> {
    token
        .strip_prefix(open)
        .and_then(|t| t.strip_suffix(close))
        .ok_or_else(|| anyhow!("expected {}...{} but found {:?}", open, close, token))
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Machine>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let [first, middle @ .., last] = tokens.as_slice() else {
                bail!("expected lights, buttons and joltage");
            };
            let pattern = bracketed(first, '[', ']')?;
            if pattern.len() > 32 {
                bail!("too many indicator lights");
            }
            if middle.len() >= 32 {
                bail!("too many buttons");
            }
            let lights = pattern
                .bytes()
                .enumerate()
                .try_fold(0u32, |mask, (i, b)| match b {
                    b'#' => Ok(mask | 1 << i),
                    b'.' => Ok(mask),
                    _ => Err(anyhow!("unexpected {:?} in lights", b as char)),
                })?;
            let buttons = middle
                .iter()
                .map(|t| {
                    bracketed(t, '(', ')')?
                        .split(',')
                        .map(|c| {
                            let c: usize = c.parse().with_context(|| format!("button {:?}", t))?;
                            if c >= pattern.len() {
                                bail!("button {:?} wires a missing counter", t);
                            }
                            Ok(c)
                        })
                        .collect::<anyhow::Result<Vec<_>>>()
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            let joltage = bracketed(last, '{', '}')?
                .split(',')
                .map(|v| v.parse::<u16>().map_err(anyhow::Error::from))
                .collect::<anyhow::Result<Vec<_>>>()?;
            if joltage.len() != pattern.len() {
                bail!("{} lights but {} joltage counters", pattern.len(), joltage.len());
            }
            Ok(Machine {
                lights,
                buttons,
                joltage,
            })
        })
    }
}

impl Machine {
    fn button_mask(&self, i: usize) -> u32 {
        self.buttons[i].iter().fold(0, |m, &c| m | 1 << c)
    }

    /// Every subset of buttons pressed once, grouped by the parity it leaves
    /// on the counters: `(presses, per-counter increments)`.
    fn single_presses(&self) -> HashMap<u32, Vec<(u64, Vec<u16>)>> {
        let mut by_parity: HashMap<u32, Vec<(u64, Vec<u16>)>> = HashMap::new();
        for subset in 0u32..1 << self.buttons.len() {
            let mut effect = vec![0u16; self.joltage.len()];
            for (i, button) in self.buttons.iter().enumerate() {
                if subset & (1 << i) != 0 {
                    for &c in button {
                        effect[c] += 1;
                    }
                }
            }
            let parity = effect.iter().enumerate().fold(0, |m, (i, &e)| m | u32::from(e & 1) << i);
            by_parity
                .entry(parity)
                .or_default()
                .push((u64::from(subset.count_ones()), effect));
        }
        by_parity
    }

    fn fewest_light_presses(&self) -> Option<u64> {
        (0u32..1 << self.buttons.len())
            .filter(|subset| {
                let lit = (0..self.buttons.len())
                    .filter(|&i| subset & (1 << i) != 0)
                    .fold(0, |m, i| m ^ self.button_mask(i));
                lit == self.lights
            })
            .map(|subset| u64::from(subset.count_ones()))
            .min()
    }
}

/// Fewest presses to reach a joltage target.
///
/// Buttons pressed an odd number of times are fixed by the target's parity;
/// after pressing them once each, every remaining press comes in pairs, so
/// the rest is the same problem on half the target.
struct Joltage {
    by_parity: HashMap<u32, Vec<(u64, Vec<u16>)>>,
}

const UNREACHABLE: u64 = u64::MAX;

impl Joltage {
    fn parity(target: &[u16]) -> u32 {
        target.iter().enumerate().fold(0, |m, (i, &t)| m | u32::from(t & 1) << i)
    }

    fn options<'s>(&'s self, target: &'s [u16]) -> impl Iterator<Item = (u64, Vec<u16>)> + 's {
        self.by_parity
            .get(&Self::parity(target))
            .into_iter()
            .flatten()
            .filter(move |(_, effect)| effect.iter().zip(target).all(|(e, t)| e <= t))
            .map(move |(presses, effect)| {
                let rest = target.iter().zip(effect).map(|(t, e)| (t - e) / 2).collect();
                (*presses, rest)
            })
    }
}

impl DpProblem<Vec<u16>, u64> for Joltage {
    fn deps(&self, target: &Vec<u16>) -> Vec<Vec<u16>> {
        if target.iter().all(|&t| t == 0) {
            return Vec::new();
        }
        self.options(target).map(|(_, rest)| rest).collect()
    }

    fn compute(&self, target: &Vec<u16>, deps: Vec<u64>) -> u64 {
        if target.iter().all(|&t| t == 0) {
            return 0;
        }
        self.options(target)
            .zip(deps)
            .filter(|&(_, rest)| rest != UNREACHABLE)
            .map(|((presses, _), rest)| presses + 2 * rest)
            .min()
            .unwrap_or(UNREACHABLE)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 0;
        for (i, machine) in shared.iter().enumerate() {
            total += machine.fewest_light_presses().ok_or_else(|| {
                SolveError::no_answer(format!("machine {} cannot match its lights", i + 1))
            })?;
        }
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let presses = shared
            .par_iter()
            .enumerate()
            .map(|(i, machine)| {
                let cache = DpCache::with_problem(
                    HashMapBackend::new(),
                    Joltage {
                        by_parity: machine.single_presses(),
                    },
                );
                let presses = cache.get(&machine.joltage);
                debug!(machine = i + 1, presses, states = cache.cached_len(), "configured joltage");
                if presses == UNREACHABLE {
                    Err(SolveError::no_answer(format!(
                        "machine {} cannot reach its joltage",
                        i + 1
                    )))
                } else {
                    Ok(presses)
                }
            })
            .collect::<Result<Vec<u64>, SolveError>>()?;
        Ok(presses.iter().sum::<u64>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "\
[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}
[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "7");
        assert_eq!(solve::<Solver, 2>(EXAMPLE), "33");
    }

    #[test]
    fn test_rejects_unknown_counter() {
        assert!(Solver::parse("[.#] (0,2) {1,1}\n").is_err());
    }

    #[test]
    fn test_rejects_too_many_buttons() {
        let line = format!("[#]{} {{1}}\n", " (0)".repeat(32));
        let err = Solver::parse(&line).unwrap_err();
        assert_eq!(err.line(), Some(1));
        assert!(Solver::parse(&format!("[#]{} {{1}}\n", " (0)".repeat(31))).is_ok());
    }

    #[test]
    fn test_options_keep_matching_parity() {
        let machines = Solver::parse("[..] (0) (1) {3,1}\n").unwrap();
        let joltage = Joltage {
            by_parity: machines[0].single_presses(),
        };
        let target = vec![3u16, 1];
        let options: Vec<_> = joltage.options(&target).collect();
        assert_eq!(options, vec![(2, vec![1, 0])]);

        let cache = DpCache::with_problem(HashMapBackend::new(), joltage);
        assert_eq!(cache.get(&target), 4);
    }

    #[test]
    fn test_unreachable_joltage() {
        let mut machines = Solver::parse("[#.] (0) {1,1}\n").unwrap();
        assert!(<Solver as PartSolver<2>>::solve(&mut machines).is_err());
    }
}
