//! Problem definitions for the DP cache.

use std::marker::PhantomData;

/// The shape of a memoised recurrence.
///
/// `deps` names the sub-problems an index needs and `compute` folds their
/// values, given in the same order, into the value for the index. The
/// dependency graph must be acyclic.
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, VecBackend};
///
/// struct Fibonacci;
///
/// impl DpProblem<usize, u64> for Fibonacci {
///     fn deps(&self, n: &usize) -> Vec<usize> {
///         if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
///     }
///
///     fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
///         if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
///     }
/// }
///
/// let cache = DpCache::with_problem(VecBackend::new(), Fibonacci);
/// assert_eq!(cache.get(&10), 55);
/// ```
pub trait DpProblem<I, K> {
    /// Indices this index depends on; empty for base cases.
    fn deps(&self, index: &I) -> Vec<I>;

    fn compute(&self, index: &I, deps: Vec<K>) -> K;
}

/// A [`DpProblem`] built from a pair of closures.
pub struct ClosureProblem<I, K, D, C>
where
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    dep_fn: D,
    compute_fn: C,
    _phantom: PhantomData<fn(&I) -> K>,
}

impl<I, K, D, C> ClosureProblem<I, K, D, C>
where
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    pub fn new(dep_fn: D, compute_fn: C) -> Self {
        Self {
            dep_fn,
            compute_fn,
            _phantom: PhantomData,
        }
    }
}

impl<I, K, D, C> DpProblem<I, K> for ClosureProblem<I, K, D, C>
where
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    fn deps(&self, index: &I) -> Vec<I> {
        (self.dep_fn)(index)
    }

    fn compute(&self, index: &I, deps: Vec<K>) -> K {
        (self.compute_fn)(index, deps)
    }
}
