//! Error types for the solver library

use std::fmt::Display;

use thiserror::Error;

/// Malformed puzzle input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input format doesn't match expected structure
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// Required data is missing from input
    #[error("Missing data: {0}")]
    MissingData(String),
    /// A single input line was rejected (1-based)
    #[error("line {line}: {message}")]
    Line { line: usize, message: String },
}

impl ParseError {
    /// Reject line `line` (1-based) of the input
    pub fn at_line(line: usize, err: impl Display) -> Self {
        ParseError::Line {
            line,
            message: err.to_string(),
        }
    }

    /// The offending line, when the error points at one
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Line { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Failure while answering one part of a parsed puzzle
#[derive(Debug, Error)]
pub enum SolveError {
    /// The requested part number is out of range (exceeds the solver's parts)
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    /// The input parsed but admits no answer (unreachable goal, no fixed point...)
    #[error("No answer: {0}")]
    NoAnswer(String),
    /// An error occurred while solving the part
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SolveError {
    pub fn no_answer(reason: impl Into<String>) -> Self {
        SolveError::NoAnswer(reason.into())
    }
}

/// Error type for registry lookups and runs through [`crate::DynSolver`]
#[derive(Debug, Error)]
pub enum SolverError {
    /// No solver registered for the given year and day
    #[error("No solver registered for {0}/{1:02}")]
    NotFound(u16, u8),
    /// Year or day outside the supported storage range
    #[error("Year {0} day {1} is outside the supported range")]
    InvalidYearDay(u16, u8),
    /// Error occurred during parsing
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    /// Error occurred during solving
    #[error("Solve error: {0}")]
    SolveError(#[from] SolveError),
}

/// Error type for registration failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Attempted to register a solver for a year-day combination that already exists
    #[error("Duplicate solver registration for {0}/{1:02}")]
    DuplicateSolver(u16, u8),
    /// Year or day outside the supported storage range
    #[error("Cannot register year {0} day {1}: outside the supported range")]
    InvalidYearDay(u16, u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_errors_carry_position() {
        let err = ParseError::at_line(3, "invalid digit found in string");
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.to_string(), "line 3: invalid digit found in string");
        assert_eq!(ParseError::MissingData("grid".into()).line(), None);
    }

    #[test]
    fn test_solver_error_messages() {
        let err = SolverError::from(SolveError::no_answer("exit is unreachable"));
        assert_eq!(err.to_string(), "Solve error: No answer: exit is unreachable");
        assert_eq!(
            SolverError::NotFound(2024, 7).to_string(),
            "No solver registered for 2024/07"
        );
    }
}
