//! Helpers shared opportunistically between days.

pub mod dp_cache;
pub mod grid;
pub mod parse;

#[cfg(test)]
pub(crate) mod testing {
    use aoc_solver::PartSolver;

    /// Parse `input` and solve part `N`, panicking with the error on failure.
    pub(crate) fn solve<S, const N: u8>(input: &str) -> String
    where
        S: PartSolver<N>,
    {
        let mut shared = S::parse(input).unwrap_or_else(|e| panic!("example failed to parse: {e}"));
        S::solve(&mut shared).unwrap_or_else(|e| panic!("part {} failed: {}", N, e))
    }
}
