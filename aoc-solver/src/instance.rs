//! Parsed puzzles and the object-safe view the runner drives

use std::time::Instant;

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::TimeDelta;

/// One answered part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResult {
    pub part: u8,
    pub answer: String,
    /// Time spent in the part's solver, excluding parsing
    pub elapsed: TimeDelta,
}

/// Run `f`, measuring it on the monotonic clock
fn timed<T>(f: impl FnOnce() -> T) -> (T, TimeDelta) {
    let start = Instant::now();
    let value = f();
    let elapsed = TimeDelta::from_std(start.elapsed()).unwrap_or(TimeDelta::MAX);
    (value, elapsed)
}

/// A day's input, parsed once and ready to be solved part by part.
///
/// Owns the shared data, so anything part 1 leaves behind is visible to
/// part 2 on the same instance.
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parse_time: TimeDelta,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let (shared, parse_time) = timed(|| S::parse(input));
        Ok(Self {
            year,
            day,
            shared: shared?,
            parse_time,
        })
    }
}

/// Type-erased interface for working with any solver through dynamic dispatch
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn report(mut solver: Box<dyn DynSolver>) -> Result<(), aoc_solver::SolveError> {
///     for result in solver.solve_all()? {
///         println!("Part {}: {} ({})", result.part, result.answer, result.elapsed);
///     }
///     println!("parsed in {}", solver.parse_duration());
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Solve one part; parts outside `1..=parts()` are rejected
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    /// Number of parts this day answers
    fn parts(&self) -> u8;

    /// How long the input took to parse
    fn parse_duration(&self) -> TimeDelta;

    /// Solve every part in order, stopping at the first failure
    fn solve_all(&mut self) -> Result<Vec<SolveResult>, SolveError> {
        (1..=self.parts()).map(|part| self.solve(part)).collect()
    }
}

impl<'a, S: SolverExt> DynSolver for SolverInstance<'a, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let (answer, elapsed) = timed(|| S::solve_part_checked_range(&mut self.shared, part));
        Ok(SolveResult {
            part,
            answer: answer?,
            elapsed,
        })
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }

    fn parse_duration(&self) -> TimeDelta {
        self.parse_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{AocParser, Solver};

    /// Counts how many times each part ran against the same shared data
    struct Counter;

    impl AocParser for Counter {
        type SharedData<'a> = (&'a str, u32);

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            if input.is_empty() {
                return Err(ParseError::MissingData("empty input".into()));
            }
            Ok((input, 0))
        }
    }

    impl Solver for Counter {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            shared.1 += 1;
            Ok(format!("{}:{}:{}", shared.0, part, shared.1))
        }
    }

    #[test]
    fn test_parts_share_state() {
        let mut instance = SolverInstance::<Counter>::new(2024, 5, "abc").unwrap();
        let results = instance.solve_all().unwrap();
        let answers: Vec<&str> = results.iter().map(|r| r.answer.as_str()).collect();
        assert_eq!(answers, vec!["abc:1:1", "abc:2:2"]);
        assert_eq!(results[1].part, 2);
        assert!(results.iter().all(|r| r.elapsed >= TimeDelta::zero()));
    }

    #[test]
    fn test_out_of_range_part_does_not_touch_state() {
        let mut instance = SolverInstance::<Counter>::new(2024, 5, "abc").unwrap();
        assert!(matches!(instance.solve(3), Err(SolveError::PartOutOfRange(3))));
        assert_eq!(instance.solve(1).unwrap().answer, "abc:1:1");
    }

    #[test]
    fn test_parse_failure_surfaces() {
        assert!(matches!(
            SolverInstance::<Counter>::new(2024, 5, ""),
            Err(ParseError::MissingData(_))
        ));
    }
}
