//! Advent of Code Solver Library
//!
//! The framework every daily puzzle plugs into. A day is a type that knows how
//! to parse its puzzle input and how to answer each of its parts; the registry
//! turns those types into factories the runner can look up by year and day.
//!
//! # Overview
//!
//! - [`AocParser`] parses raw input into the day's shared data
//! - [`PartSolver`] answers a single part, [`Solver`] dispatches by part number
//! - [`DynSolver`] is the type-erased view used by the runner, with timings
//! - [`SolverRegistryBuilder`] / [`SolverRegistry`] map (year, day) to factories
//! - [`SolverPlugin`] + `inventory` let days register themselves
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Sums;
//!
//! impl AocParser for Sums {
//!     type SharedData<'a> = Vec<i64>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Sums {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i64>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Sums {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().product::<i64>().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register_solver::<Sums>(2015, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2015, 1, "1\n2\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "6");
//! assert_eq!(solver.solve(2).unwrap().answer, "6");
//! ```
//!
//! # Plugin registration
//!
//! ```ignore
//! #[derive(AocSolver, AutoRegisterSolver)]
//! #[aoc_solver(max_parts = 2)]
//! #[aoc(year = 2024, day = 1, tags = ["grid"])]
//! pub struct Solver;
//! ```
//!
//! Days that need to carry intermediate results from part 1 into part 2 keep
//! them in their `SharedData` (it is handed out mutably to every part).

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder, BASE_YEAR, DAYS_PER_YEAR, MAX_YEARS,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-export inventory for use by the derive macro
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
