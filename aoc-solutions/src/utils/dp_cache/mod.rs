//! Memoisation for recurrences whose sub-problems form a DAG.
//!
//! A [`DpProblem`] says which sub-problems an index depends on and how to
//! combine their values; [`DpCache`] evaluates it lazily, computing every
//! index at most once. Storage is pluggable:
//!
//! - [`VecBackend`]: dense `usize` indices
//! - [`HashMapBackend`]: anything `Hash + Eq`
//!
//! Cycles are not detected. A cyclic problem recurses until the stack
//! overflows.
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
//!
//! struct GridPaths;
//!
//! impl DpProblem<(usize, usize), u64> for GridPaths {
//!     fn deps(&self, &(r, c): &(usize, usize)) -> Vec<(usize, usize)> {
//!         let mut deps = Vec::new();
//!         if r > 0 { deps.push((r - 1, c)); }
//!         if c > 0 { deps.push((r, c - 1)); }
//!         deps
//!     }
//!     fn compute(&self, _pos: &(usize, usize), deps: Vec<u64>) -> u64 {
//!         if deps.is_empty() { 1 } else { deps.iter().sum() }
//!     }
//! }
//!
//! let cache = DpCache::with_problem(HashMapBackend::new(), GridPaths);
//! assert_eq!(cache.get(&(4, 4)), 70);
//! ```

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend, VecBackend};
pub use cache::DpCache;
pub use problem::{ClosureProblem, DpProblem};
