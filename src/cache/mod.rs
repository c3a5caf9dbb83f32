//! Stale-while-revalidate cache layer
//!
//! Wraps a [`crate::storage::KeyValueStore`] with expiration metadata and a
//! fetch protocol that favors responsiveness: callers get whatever is cached
//! immediately, and freshness is restored by a background task.

mod entry;
mod service;

pub use entry::CacheEntry;
pub use service::{CacheService, UpdateCallback, CACHE_PREFIX, DEFAULT_TTL};
