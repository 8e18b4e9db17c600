//! Core solver traits

use crate::error::{ParseError, SolveError};

/// Turns a day's raw puzzle input into the data every part works on.
///
/// The input outlives the parsed data, so `SharedData` may borrow from it:
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// /// Rucksack-style lines split into their two halves.
/// struct Halves;
///
/// impl AocParser for Halves {
///     type SharedData<'a> = Vec<(&'a str, &'a str)>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .enumerate()
///             .map(|(i, line)| {
///                 if line.len() % 2 != 0 {
///                     return Err(ParseError::at_line(i + 1, "odd length"));
///                 }
///                 Ok(line.split_at(line.len() / 2))
///             })
///             .collect()
///     }
/// }
///
/// assert_eq!(Halves::parse("abcd\nxy").unwrap(), vec![("ab", "cd"), ("x", "y")]);
/// assert_eq!(Halves::parse("abc").unwrap_err().line(), Some(1));
/// ```
pub trait AocParser {
    /// Parsed input plus anything the parts want to hand each other.
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Answers part `N` of a day.
///
/// Parts get the shared data mutably, so part 1 can leave results behind for
/// part 2 (a visited route, a memo table).
///
/// ```
/// use aoc_solver::{AocParser, PartSolver, ParseError, SolveError};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .enumerate()
///             .map(|(i, l)| l.parse().map_err(|e| ParseError::at_line(i + 1, e)))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Depths {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         Ok(shared.windows(2).filter(|w| w[1] > w[0]).count().to_string())
///     }
/// }
///
/// let mut depths = Depths::parse("199\n200\n208\n210\n200").unwrap();
/// assert_eq!(<Depths as PartSolver<1>>::solve(&mut depths).unwrap(), "3");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    /// The answer exactly as the puzzle expects it typed in.
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A whole day: parsing plus dispatch by part number.
///
/// Derived with `#[derive(AocSolver)]`, which forwards part `k` to
/// `PartSolver<k>` and rejects anything outside `1..=max_parts`.
pub trait Solver: AocParser {
    /// Number of parts this day answers (the last day of a year has one)
    const PARTS: u8;

    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range check in front of [`Solver::solve_part`] for hand-written solvers
pub trait SolverExt: Solver {
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
