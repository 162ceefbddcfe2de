//! Memo table for the interval recurrence.
//!
//! Degrees are dense (every `n` from the top-level degree down to 2 gets
//! visited) while the indices reached for a given degree are sparse, so the
//! table is a single hash map keyed by the `(n, k)` pair.

use std::collections::HashMap;

use static_assertions::assert_impl_all;

#[derive(Clone, Debug, Default)]
pub struct Cache {
    values: HashMap<(i64, i64), f64>,
    hits: u64,
    misses: u64,
}

assert_impl_all!(Cache: Send, Sync, Default, Clone);

/// Snapshot of how much a cache has been used.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up `(n, k)`, counting the lookup as a hit or a miss.
    pub fn lookup(&mut self, n: i64, k: i64) -> Option<f64> {
        match self.values.get(&(n, k)) {
            Some(&value) => {
                self.hits += 1;
                Some(value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, n: i64, k: i64, value: f64) {
        self.values.insert((n, k), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.values.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}
