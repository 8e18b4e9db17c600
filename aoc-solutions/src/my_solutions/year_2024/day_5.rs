use std::cmp::Ordering;
use std::collections::HashSet;

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::{invalid_format, parse_lines, sections};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 5, tags = ["sorting"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    /// `(a, b)` means page `a` must come before page `b`.
    rules: HashSet<(u32, u32)>,
    updates: Vec<Vec<u32>>,
}

impl SharedData {
    fn order(&self, a: u32, b: u32) -> Ordering {
        if self.rules.contains(&(a, b)) {
            Ordering::Less
        } else if self.rules.contains(&(b, a)) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    fn is_sorted(&self, update: &[u32]) -> bool {
        update.is_sorted_by(|&a, &b| self.order(a, b) != Ordering::Greater)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (rules, updates) = sections(input)
            .ok_or_else(|| invalid_format("missing blank line between rules and updates"))?;
        let rules = parse_lines(rules, |line| {
            let (a, b) = line
                .trim()
                .split_once('|')
                .ok_or_else(|| anyhow!("rule must look like `a|b`"))?;
            Ok((a.parse::<u32>()?, b.parse::<u32>()?))
        })?
        .into_iter()
        .collect();
        let updates = parse_lines(updates, |line| {
            let pages = line
                .trim()
                .split(',')
                .map(|p| p.parse::<u32>().map_err(anyhow::Error::from))
                .collect::<anyhow::Result<Vec<_>>>()?;
            if pages.len() % 2 == 0 {
                return Err(anyhow!("update has no middle page"));
            }
            Ok(pages)
        })?;
        Ok(SharedData { rules, updates })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .updates
            .iter()
            .filter(|u| shared.is_sorted(u))
            .map(|u| u[u.len() / 2])
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .updates
            .iter()
            .filter(|u| !shared.is_sorted(u))
            .map(|u| {
                let mut fixed = u.clone();
                fixed.sort_by(|&a, &b| shared.order(a, b));
                fixed[fixed.len() / 2]
            })
            .sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "\
47|53
97|13
97|61
97|47
75|29
61|13
75|53
29|13
97|29
53|29
61|53
97|53
61|29
47|13
75|47
97|75
47|61
75|61
47|29
75|13
53|13

75,47,61,53,29
97,61,53,29,13
75,29,13
75,97,47,61,53
61,13,29
97,13,75,29,47
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "143");
        assert_eq!(solve::<Solver, 2>(EXAMPLE), "123");
    }

    #[test]
    fn test_even_update_rejected() {
        assert!(Solver::parse("1|2\n\n1,2\n").is_err());
    }
}
