use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

use crate::utils::parse::{ints_exact, parse_lines};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 8, tags = ["graph", "union-find"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    boxes: Vec<[i64; 3]>,
    /// Box index pairs, closest first.
    pairs: Vec<(usize, usize)>,
    connections: usize,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let boxes = parse_lines(input, |line| Ok(ints_exact::<i64, 3>(line)?))?;
        let mut pairs: Vec<(i64, usize, usize)> = (0..boxes.len())
            .tuple_combinations()
            .map(|(i, j)| {
                let d: i64 = boxes[i].iter().zip(&boxes[j]).map(|(a, b)| (a - b) * (a - b)).sum();
                (d, i, j)
            })
            .collect();
        pairs.sort_unstable();
        // The worked example has 20 boxes and makes 10 connections.
        let connections = if boxes.len() <= 20 { 10 } else { 1000 };
        Ok(SharedData {
            boxes,
            pairs: pairs.into_iter().map(|(_, i, j)| (i, j)).collect(),
            connections,
        })
    }
}

struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets of `a` and `b`; `false` if they were already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
        true
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut circuits = DisjointSet::new(shared.boxes.len());
        for &(i, j) in shared.pairs.iter().take(shared.connections) {
            circuits.union(i, j);
        }
        let roots: Vec<usize> = (0..shared.boxes.len())
            .filter(|&i| circuits.find(i) == i)
            .collect();
        let sizes: Vec<usize> = roots
            .into_iter()
            .map(|i| circuits.size[i])
            .sorted_unstable_by(|a, b| b.cmp(a))
            .collect();
        Ok(sizes.iter().take(3).product::<usize>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut circuits = DisjointSet::new(shared.boxes.len());
        let mut remaining = shared.boxes.len();
        for &(i, j) in &shared.pairs {
            if circuits.union(i, j) {
                remaining -= 1;
                if remaining == 1 {
                    return Ok((shared.boxes[i][0] * shared.boxes[j][0]).to_string());
                }
            }
        }
        Err(SolveError::no_answer("fewer than two junction boxes"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::solve;

    const EXAMPLE: &str = "\
162,817,812
57,618,57
906,360,560
592,479,940
352,342,300
466,668,158
542,29,236
431,825,988
739,650,466
52,470,668
216,146,977
819,987,18
117,168,530
805,96,715
346,949,466
970,615,88
941,993,340
862,61,35
984,92,344
425,690,689
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver, 1>(EXAMPLE), "40");
        assert_eq!(solve::<Solver, 2>(EXAMPLE), "25272");
    }

    #[test]
    fn test_disjoint_set() {
        let mut set = DisjointSet::new(4);
        assert!(set.union(0, 1));
        assert!(set.union(2, 3));
        assert!(!set.union(1, 0));
        assert!(set.union(1, 3));
        let root = set.find(2);
        assert_eq!(set.size[root], 4);
    }
}
