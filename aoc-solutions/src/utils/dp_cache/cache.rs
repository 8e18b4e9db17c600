//! Single-threaded DP cache.

use std::cell::RefCell;
use std::marker::PhantomData;

use super::backend::Backend;
use super::problem::{ClosureProblem, DpProblem};

/// Lazily evaluated memo table over a [`DpProblem`].
///
/// Each index is computed at most once; dependencies are resolved
/// recursively on first access. There is no cycle detection, so a cyclic
/// problem overflows the stack.
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{DpCache, VecBackend};
///
/// let cache = DpCache::new(
///     VecBackend::new(),
///     |n: &usize| if *n == 0 { vec![] } else { vec![n - 1] },
///     |n: &usize, deps: Vec<u64>| if *n == 0 { 1 } else { *n as u64 * deps[0] },
/// );
///
/// assert_eq!(cache.get(&5), 120);
/// ```
pub struct DpCache<I, K, B, P>
where
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    backend: RefCell<B>,
    problem: P,
    _phantom: PhantomData<fn(&I) -> K>,
}

impl<I, K, B, P> DpCache<I, K, B, P>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    pub fn with_problem(backend: B, problem: P) -> Self {
        Self {
            backend: RefCell::new(backend),
            problem,
            _phantom: PhantomData,
        }
    }

    /// Value for `index`, computing it and its dependencies if needed.
    pub fn get(&self, index: &I) -> K {
        if let Some(value) = self.backend.borrow().get(index) {
            return value.clone();
        }

        // No borrow may be held across the recursion.
        let dep_values: Vec<K> = self
            .problem
            .deps(index)
            .into_iter()
            .map(|dep| self.get(&dep))
            .collect();

        self.backend
            .borrow_mut()
            .get_or_insert(index.clone(), || self.problem.compute(index, dep_values))
            .clone()
    }

    /// Number of values computed so far.
    pub fn cached_len(&self) -> usize {
        self.backend.borrow().len()
    }
}

impl<I, K, B, D, C> DpCache<I, K, B, ClosureProblem<I, K, D, C>>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    /// Build a cache straight from a dependency closure and a compute closure.
    pub fn new(backend: B, dep_fn: D, compute_fn: C) -> Self {
        Self::with_problem(backend, ClosureProblem::new(dep_fn, compute_fn))
    }
}
