//! Shared test utilities for cache and gamification integration tests

use std::sync::Arc;

use quizkit::cache::CacheService;
use quizkit::storage::MemoryStore;

/// In-memory cache service plus a handle to its backing store, so tests can
/// poke at raw storage (corrupt entries, foreign keys) behind the cache.
pub fn memory_cache() -> (Arc<MemoryStore>, CacheService) {
    let store = Arc::new(MemoryStore::new());
    let cache = CacheService::new(store.clone());
    (store, cache)
}
