//! Caller-managed memoization for aggregation results.
//!
//! The data layer owns a version counter per record set; a cache keyed by
//! `(version, params)` recomputes an aggregation only when its inputs
//! change, without the cache having to inspect the records themselves.

use std::collections::HashMap;
use std::hash::Hash;

/// A memo cache whose entries are valid for exactly one record-set version.
///
/// Advancing the version drops every cached entry; keys only need to encode
/// the aggregation parameters.
#[derive(Debug)]
pub struct MemoCache<K, V> {
    version: u64,
    entries: HashMap<K, V>,
}

impl<K: Eq + Hash, V: Clone> MemoCache<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: 0,
            entries: HashMap::new(),
        }
    }

    /// Point the cache at a record-set version, invalidating everything if
    /// the version changed.
    pub fn advance_to(&mut self, version: u64) {
        if version != self.version {
            self.entries.clear();
            self.version = version;
        }
    }

    /// Fetch the cached value for `key`, computing and storing it on miss.
    pub fn get_or_insert_with<F>(&mut self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.entries.entry(key).or_insert_with(compute).clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash, V: Clone> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn second_lookup_skips_recompute() {
        let calls = Cell::new(0);
        let mut cache: MemoCache<u32, String> = MemoCache::new();
        let compute = || {
            calls.set(calls.get() + 1);
            "value".to_string()
        };
        assert_eq!(cache.get_or_insert_with(7, compute), "value");
        assert_eq!(cache.get_or_insert_with(7, compute), "value");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn distinct_params_are_cached_separately() {
        let mut cache: MemoCache<u32, u32> = MemoCache::new();
        assert_eq!(cache.get_or_insert_with(1, || 10), 10);
        assert_eq!(cache.get_or_insert_with(2, || 20), 20);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn advancing_version_invalidates() {
        let mut cache: MemoCache<u32, u32> = MemoCache::new();
        cache.get_or_insert_with(1, || 10);
        cache.advance_to(1);
        assert!(cache.is_empty());
        assert_eq!(cache.get_or_insert_with(1, || 11), 11);
    }

    #[test]
    fn same_version_keeps_entries() {
        let mut cache: MemoCache<u32, u32> = MemoCache::new();
        cache.advance_to(3);
        cache.get_or_insert_with(1, || 10);
        cache.advance_to(3);
        assert_eq!(cache.len(), 1);
    }
}
