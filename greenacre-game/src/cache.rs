//! Explicit memoization for the engine's pure queries.
//!
//! Cache keys are content hashes (XxHash64 over a canonical JSON
//! serialization) for value-type arguments. Function-typed arguments
//! (field predicates) contribute a stable identity token instead of a
//! structural serialization, so two structurally-similar predicates with
//! distinct tokens can never collide on a cache line.
//!
//! Caching here is a performance optimization, not a correctness
//! requirement: a changed input always hashes to a fresh key.

use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hasher;
use twox_hash::XxHash64;

use crate::crop::CropLifeStage;
use crate::field::PlotContent;

const KEY_HASH_SEED: u64 = 0;

/// Hash raw bytes into a cache key.
#[must_use]
pub fn hash_bytes(bytes: &[u8]) -> u64 {
    let mut hasher = XxHash64::with_seed(KEY_HASH_SEED);
    hasher.write(bytes);
    hasher.finish()
}

/// Content-hash a serializable value into a cache key.
#[must_use]
pub fn content_key<T: Serialize>(value: &T) -> u64 {
    let bytes = serde_json::to_vec(value).unwrap_or_default();
    hash_bytes(&bytes)
}

/// Combine several sub-keys into one composite key.
#[must_use]
pub fn composite_key(parts: &[u64]) -> u64 {
    let mut hasher = XxHash64::with_seed(KEY_HASH_SEED);
    for part in parts {
        hasher.write(&part.to_le_bytes());
    }
    hasher.finish()
}

/// A single memo table with hit/miss instrumentation.
#[derive(Debug, Default)]
pub struct QueryCache<V> {
    entries: HashMap<u64, V>,
    hits: u64,
    misses: u64,
}

impl<V: Clone> QueryCache<V> {
    /// Fetch the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(&mut self, key: u64, build: impl FnOnce() -> V) -> V {
        if let Some(value) = self.entries.get(&key) {
            self.hits = self.hits.saturating_add(1);
            return value.clone();
        }
        self.misses = self.misses.saturating_add(1);
        let value = build();
        self.entries.insert(key, value.clone());
        value
    }

    /// Number of cache hits served so far.
    #[must_use]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of cache misses (i.e. fresh computations) so far.
    #[must_use]
    pub const fn misses(&self) -> u64 {
        self.misses
    }

    /// Number of distinct keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-domain memo tables shared across the engine's query functions.
///
/// Interior mutability keeps the query API `&self`-clean; the engine is
/// single-threaded so `RefCell` borrows never contend.
#[derive(Debug, Default)]
pub struct SimCache {
    stage_ranges: RefCell<QueryCache<Vec<CropLifeStage>>>,
    lifecycle_durations: RefCell<QueryCache<u32>>,
    recipe_checks: RefCell<QueryCache<bool>>,
    field_finds: RefCell<QueryCache<Option<PlotContent>>>,
    field_filters: RefCell<QueryCache<Vec<PlotContent>>>,
    sorted_ids: RefCell<QueryCache<Vec<String>>>,
}

impl SimCache {
    /// Fresh cache with every table empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn stage_range(
        &self,
        key: u64,
        build: impl FnOnce() -> Vec<CropLifeStage>,
    ) -> Vec<CropLifeStage> {
        self.stage_ranges.borrow_mut().get_or_insert_with(key, build)
    }

    pub(crate) fn lifecycle_duration(&self, key: u64, build: impl FnOnce() -> u32) -> u32 {
        self.lifecycle_durations
            .borrow_mut()
            .get_or_insert_with(key, build)
    }

    pub(crate) fn recipe_check(&self, key: u64, build: impl FnOnce() -> bool) -> bool {
        self.recipe_checks.borrow_mut().get_or_insert_with(key, build)
    }

    pub(crate) fn field_find(
        &self,
        key: u64,
        build: impl FnOnce() -> Option<PlotContent>,
    ) -> Option<PlotContent> {
        self.field_finds.borrow_mut().get_or_insert_with(key, build)
    }

    pub(crate) fn field_filter(
        &self,
        key: u64,
        build: impl FnOnce() -> Vec<PlotContent>,
    ) -> Vec<PlotContent> {
        self.field_filters.borrow_mut().get_or_insert_with(key, build)
    }

    pub(crate) fn sorted_id_order(
        &self,
        key: u64,
        build: impl FnOnce() -> Vec<String>,
    ) -> Vec<String> {
        self.sorted_ids.borrow_mut().get_or_insert_with(key, build)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_serves_hits_without_recompute() {
        let mut cache = QueryCache::default();
        let mut builds = 0;
        let first = cache.get_or_insert_with(7, || {
            builds += 1;
            "value".to_string()
        });
        let second = cache.get_or_insert_with(7, || {
            builds += 1;
            "other".to_string()
        });
        assert_eq!(first, second);
        assert_eq!(builds, 1);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn content_key_tracks_semantic_equality() {
        let a = vec![1u32, 2, 3];
        let b = vec![1u32, 2, 3];
        let c = vec![3u32, 2, 1];
        assert_eq!(content_key(&a), content_key(&b));
        assert_ne!(content_key(&a), content_key(&c));
    }

    #[test]
    fn composite_key_is_order_sensitive() {
        assert_ne!(composite_key(&[1, 2]), composite_key(&[2, 1]));
        assert_eq!(composite_key(&[1, 2]), composite_key(&[1, 2]));
    }
}
