//! Re-orders results arriving from parallel workers
//!
//! Results are held back until every key before them in (year, day, part)
//! order has been emitted.

use crate::executor::SolverResult;
use std::collections::{BTreeMap, VecDeque};

/// Key for ordering results (year, day, part) - ordered ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Aggregator that buffers results and emits them in sorted order
pub struct ResultAggregator {
    /// Keys still to be emitted, smallest first
    expected: VecDeque<ResultKey>,
    /// Results received ahead of their turn
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    /// Create aggregator from the keys that will be produced
    pub fn new(mut expected_keys: Vec<ResultKey>) -> Self {
        expected_keys.sort_unstable();
        expected_keys.dedup();
        Self {
            expected: expected_keys.into(),
            pending: BTreeMap::new(),
        }
    }

    /// Add a result and return any results ready for output (in order)
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let Some(next) = self.expected.front()
            && let Some(result) = self.pending.remove(next)
        {
            self.expected.pop_front();
            ready.push(result);
        }
        ready
    }

    /// Drain remaining results in order (for final output)
    pub fn drain(&mut self) -> Vec<SolverResult> {
        std::mem::take(&mut self.pending).into_values().collect()
    }

    /// Check if all expected results have been received
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn key(year: u16, day: u8, part: u8) -> ResultKey {
        ResultKey { year, day, part }
    }

    fn make_result(k: ResultKey) -> SolverResult {
        SolverResult {
            year: k.year,
            day: k.day,
            part: k.part,
            answer: Ok(format!("{}_{}_{}", k.year, k.day, k.part)),
            parse_duration: Some(TimeDelta::milliseconds(5)),
            solve_duration: TimeDelta::milliseconds(10),
        }
    }

    #[test]
    fn test_out_of_order_results_are_held_back() {
        let keys = vec![key(2024, 1, 1), key(2024, 1, 2), key(2024, 2, 1)];
        let mut agg = ResultAggregator::new(keys);

        assert!(agg.add(make_result(key(2024, 1, 2))).is_empty());
        assert!(agg.add(make_result(key(2024, 2, 1))).is_empty());

        let ready = agg.add(make_result(key(2024, 1, 1)));
        let order: Vec<ResultKey> = ready.iter().map(ResultKey::from).collect();
        assert_eq!(order, vec![key(2024, 1, 1), key(2024, 1, 2), key(2024, 2, 1)]);
        assert!(agg.is_complete());
    }

    #[test]
    fn test_drain_returns_stragglers_in_order() {
        let mut agg = ResultAggregator::new(vec![key(2025, 3, 1), key(2025, 3, 2), key(2025, 4, 1)]);

        agg.add(make_result(key(2025, 4, 1)));
        agg.add(make_result(key(2025, 3, 2)));
        assert!(!agg.is_complete());

        let remaining: Vec<ResultKey> = agg.drain().iter().map(ResultKey::from).collect();
        assert_eq!(remaining, vec![key(2025, 3, 2), key(2025, 4, 1)]);
        assert!(agg.drain().is_empty());
    }

    fn shuffled_keys() -> impl Strategy<Value = (Vec<ResultKey>, Vec<ResultKey>)> {
        prop::collection::btree_set((2024u16..=2025, 1u8..=25, 1u8..=2), 1..30).prop_flat_map(|set| {
            let keys: Vec<ResultKey> = set.into_iter().map(|(y, d, p)| key(y, d, p)).collect();
            (Just(keys.clone()), Just(keys).prop_shuffle())
        })
    }

    proptest! {
        #[test]
        fn prop_any_arrival_order_is_emitted_sorted((sorted, arrival) in shuffled_keys()) {
            let mut agg = ResultAggregator::new(arrival.clone());
            let mut emitted = Vec::new();
            for k in arrival {
                emitted.extend(agg.add(make_result(k)).iter().map(ResultKey::from));
            }
            prop_assert!(agg.is_complete());
            prop_assert_eq!(emitted, sorted);
        }
    }
}
