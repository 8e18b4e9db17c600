use std::collections::{BTreeSet, HashMap};

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 23, tags = ["graph"])]
pub struct Solver;

type Graph<'a> = HashMap<&'a str, BTreeSet<&'a str>>;

impl AocParser for Solver {
    type SharedData<'a> = Graph<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let edges = parse_lines(input, |line| {
            line.trim()
                .split_once('-')
                .ok_or_else(|| anyhow!("expected `a-b`"))
        })?;
        let mut graph: Graph<'a> = HashMap::new();
        for (a, b) in edges {
            graph.entry(a).or_default().insert(b);
            graph.entry(b).or_default().insert(a);
        }
        Ok(graph)
    }
}

/// Bron–Kerbosch with pivoting; keeps the largest clique found.
fn bron_kerbosch<'a>(
    graph: &Graph<'a>,
    r: &mut Vec<&'a str>,
    mut p: BTreeSet<&'a str>,
    mut x: BTreeSet<&'a str>,
    best: &mut Vec<&'a str>,
) {
    if p.is_empty() && x.is_empty() {
        if r.len() > best.len() {
            *best = r.clone();
        }
        return;
    }
    if r.len() + p.len() <= best.len() {
        return;
    }
    let pivot = p
        .union(&x)
        .max_by_key(|v| graph[*v].intersection(&p).count())
        .copied();
    let candidates: Vec<&str> = match pivot {
        Some(u) => p.difference(&graph[u]).copied().collect(),
        None => p.iter().copied().collect(),
    };
    for v in candidates {
        let neighbours = &graph[v];
        r.push(v);
        bron_kerbosch(
            graph,
            r,
            p.intersection(neighbours).copied().collect(),
            x.intersection(neighbours).copied().collect(),
            best,
        );
        r.pop();
        p.remove(v);
        x.insert(v);
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut count = 0;
        for (&a, neighbours) in shared.iter() {
            for (&b, &c) in neighbours.iter().filter(|&&b| b > a).tuple_combinations() {
                let has_t = [a, b, c].iter().any(|n| n.starts_with('t'));
                if has_t && shared[b].contains(c) {
                    count += 1;
                }
            }
        }
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut best = Vec::new();
        let nodes: BTreeSet<&str> = shared.keys().copied().collect();
        bron_kerbosch(shared, &mut Vec::new(), nodes, BTreeSet::new(), &mut best);
        best.sort_unstable();
        Ok(best.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "\
kh-tc
qp-kh
de-cg
ka-co
yn-aq
qp-ub
cg-tb
vc-aq
tb-ka
wh-tc
yn-cg
kh-ub
ta-co
de-co
tc-td
tb-wq
wh-td
ta-ka
td-qp
aq-cg
wq-ub
ub-vc
de-ta
wq-aq
wq-vc
wh-yn
ka-de
kh-ta
co-tc
wh-qp
tb-vc
td-yn
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "7");
        assert_eq!(solve::<Solver, 2>(EXAMPLE), "co,de,ka,ta");
    }
}
