//! Storage backends for the DP cache.

use std::collections::HashMap;
use std::hash::Hash;

/// Where a [`DpCache`](super::DpCache) keeps finished values.
///
/// A backend only ever sees each index inserted once; the cache checks
/// [`Backend::get`] before computing.
pub trait Backend<I, K> {
    /// The stored value for `index`, if it has been computed.
    fn get(&self, index: &I) -> Option<&K>;

    /// Return the value for `index`, storing `compute()` first if absent.
    fn get_or_insert(&mut self, index: I, compute: impl FnOnce() -> K) -> &K;

    /// Number of stored values.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Dense storage for `usize` indices starting at zero.
///
/// The vector grows on demand to fit the largest index seen.
#[derive(Debug)]
pub struct VecBackend<K> {
    data: Vec<Option<K>>,
}

impl<K> VecBackend<K> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }
}

impl<K> Default for VecBackend<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Backend<usize, K> for VecBackend<K> {
    fn get(&self, index: &usize) -> Option<&K> {
        self.data.get(*index).and_then(Option::as_ref)
    }

    fn get_or_insert(&mut self, index: usize, compute: impl FnOnce() -> K) -> &K {
        if index >= self.data.len() {
            self.data.resize_with(index + 1, || None);
        }
        self.data[index].get_or_insert_with(compute)
    }

    fn len(&self) -> usize {
        self.data.iter().filter(|v| v.is_some()).count()
    }
}

/// Sparse storage for any hashable index.
#[derive(Debug)]
pub struct HashMapBackend<I, K> {
    data: HashMap<I, K>,
}

impl<I, K> HashMapBackend<I, K> {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }
}

impl<I, K> Default for HashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Hash + Eq, K> Backend<I, K> for HashMapBackend<I, K> {
    fn get(&self, index: &I) -> Option<&K> {
        self.data.get(index)
    }

    fn get_or_insert(&mut self, index: I, compute: impl FnOnce() -> K) -> &K {
        self.data.entry(index).or_insert_with(compute)
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
