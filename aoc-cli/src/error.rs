//! Error types for the CLI

use std::path::PathBuf;

use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// One or more selected days have no input file
    #[error("Missing {} input file(s)", .0.len())]
    MissingInputs(Vec<PathBuf>),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// Some parts did not produce an answer
    #[error("{failed} of {total} part(s) failed")]
    Failed { failed: usize, total: usize },

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Errors reading a puzzle input file
#[derive(Error, Debug)]
pub enum InputError {
    /// No file at the expected path
    #[error("no input at {}", .0.display())]
    Missing(PathBuf),

    /// The file exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Input could not be read
    #[error("Input for {year}/{day:02} unavailable: {source}")]
    Input {
        year: u16,
        day: u8,
        #[source]
        source: InputError,
    },

    /// Parsing or solving failed
    #[error("{0}")]
    Solver(#[from] aoc_solver::SolverError),

    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// A solver thread panicked
    #[error("Solver for {year}/{day:02} panicked")]
    Panicked { year: u16, day: u8 },

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merge two errors into one `Multiple`, flattening either side
    /// that is already a `Multiple` and keeping `first` before `second`.
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let mut errors = first.flatten();
        errors.extend(second.flatten());
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }

    fn flatten(self) -> Vec<ArcExecutorError> {
        if let ExecutorError::Multiple(errors) = self.inner() {
            return errors.clone();
        }
        vec![self]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_error(name: &str) -> ArcExecutorError {
        ExecutorError::ThreadPool(name.to_string()).into()
    }

    fn names(err: &ArcExecutorError) -> Vec<String> {
        match err.inner() {
            ExecutorError::Multiple(errors) => errors.iter().map(|e| e.to_string()).collect(),
            other => vec![other.to_string()],
        }
    }

    #[test]
    fn test_combine_flattens_and_keeps_order() {
        let ab = ArcExecutorError::combine(pool_error("a"), pool_error("b"));
        let cd = ArcExecutorError::combine(pool_error("c"), pool_error("d"));
        let all = ArcExecutorError::combine(ab, cd);

        assert_eq!(all.to_string(), "Multiple errors occurred (4 total)");
        assert_eq!(
            names(&all),
            ["a", "b", "c", "d"].map(|n| format!("Thread pool creation failed: {}", n))
        );
    }

    #[test]
    fn test_combine_opt_without_existing_is_identity() {
        let err = ArcExecutorError::combine_opt(None, pool_error("only"));
        assert!(matches!(err.inner(), ExecutorError::ThreadPool(_)));
    }

    #[test]
    fn test_input_error_names_the_day() {
        let err: ArcExecutorError = ExecutorError::Input {
            year: 2024,
            day: 3,
            source: InputError::Missing(PathBuf::from("inputs/2024/day03.txt")),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Input for 2024/03 unavailable: no input at inputs/2024/day03.txt"
        );
    }
}
