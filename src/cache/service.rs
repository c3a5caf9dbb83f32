//! Cache service - stale-while-revalidate fetch protocol
//!
//! The service gives callers an immediate answer from the store whenever one
//! exists, and restores freshness with a background fetch the caller never
//! waits on. Storage trouble of any kind degrades to cache-miss behavior;
//! the cache is an optimization, never a correctness requirement.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::entry::{CacheEntry, EntryMeta};
use crate::storage::KeyValueStore;

/// Namespace prefix for every cache entry, partitioning cache data from
/// anything else sharing the same store.
pub const CACHE_PREFIX: &str = "quizkit_cache:";

/// TTL applied when the caller does not specify one.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Callback invoked with the fresh value once a background revalidation
/// completes. The only channel through which a caller that already received
/// stale data learns about the refresh.
pub type UpdateCallback<T> = Box<dyn FnOnce(T) + Send + 'static>;

/// Read-through cache over a [`KeyValueStore`].
///
/// Cloning is cheap (shared store handle); background revalidation tasks
/// clone the service into themselves.
#[derive(Clone)]
pub struct CacheService {
    store: Arc<dyn KeyValueStore>,
    default_ttl: Duration,
}

impl CacheService {
    /// Create a service with the default TTL.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_ttl(store, DEFAULT_TTL)
    }

    /// Create a service with a custom default TTL.
    pub fn with_ttl(store: Arc<dyn KeyValueStore>, default_ttl: Duration) -> Self {
        Self { store, default_ttl }
    }

    fn storage_key(key: &str) -> String {
        format!("{CACHE_PREFIX}{key}")
    }

    fn now_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    /// Read the cached payload for a key, fresh or not.
    ///
    /// Missing, unreadable, and malformed entries are all a miss. A payload
    /// that deserializes to the wrong shape is a miss too, so a schema change
    /// in the app invalidates old entries instead of breaking callers.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.read(&Self::storage_key(key))?;

        match serde_json::from_str::<CacheEntry<T>>(&raw) {
            Ok(entry) => Some(entry.data),
            Err(err) => {
                tracing::warn!("malformed cache entry for '{}': {}", key, err);
                None
            }
        }
    }

    /// Whether a usable entry exists and has not expired.
    pub fn is_fresh(&self, key: &str) -> bool {
        let Some(raw) = self.store.read(&Self::storage_key(key)) else {
            return false;
        };

        match serde_json::from_str::<EntryMeta>(&raw) {
            Ok(meta) => Self::now_ms() < meta.expires_at,
            Err(err) => {
                tracing::warn!("malformed cache entry for '{}': {}", key, err);
                false
            }
        }
    }

    /// Store a value with the given TTL (default TTL when `None`).
    ///
    /// Best-effort: serialization and write failures (quota, backend) are
    /// logged and swallowed.
    pub fn set<T: Serialize>(&self, key: &str, data: &T, ttl: Option<Duration>) {
        let now = Self::now_ms();
        let ttl = ttl.unwrap_or(self.default_ttl);
        let entry = CacheEntry {
            data,
            timestamp: now,
            expires_at: now + ttl.as_millis() as i64,
        };

        let json = match serde_json::to_string(&entry) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!("failed to serialize cache entry for '{}': {}", key, err);
                return;
            }
        };

        if let Err(err) = self.store.write(&Self::storage_key(key), &json) {
            tracing::warn!("cache write failed for '{}': {}", key, err);
        }
    }

    /// Remove a single entry.
    pub fn remove(&self, key: &str) {
        if let Err(err) = self.store.delete(&Self::storage_key(key)) {
            tracing::warn!("cache delete failed for '{}': {}", key, err);
        }
    }

    /// Remove every entry under this service's namespace, leaving unrelated
    /// keys in the shared store untouched.
    pub fn clear_all(&self) {
        for key in self.store.keys() {
            if key.starts_with(CACHE_PREFIX) {
                if let Err(err) = self.store.delete(&key) {
                    tracing::warn!("cache delete failed for '{}': {}", key, err);
                }
            }
        }
    }

    /// Fetch a value through the cache, stale-while-revalidate style.
    ///
    /// - Fresh entry: returned immediately, `fetch_fn` never runs.
    /// - Stale entry: returned immediately; `fetch_fn` runs in a spawned
    ///   task that overwrites the entry and hands the fresh value to
    ///   `on_update`. A failed background fetch leaves the stale entry in
    ///   place and is only logged - the caller already has its answer.
    /// - No entry: `fetch_fn` is awaited, its result cached and returned;
    ///   this is the only path where a fetch error reaches the caller.
    ///
    /// Concurrent calls for the same stale key may each spawn their own
    /// revalidation; the final write wins and each completed fetch writes a
    /// valid entry, so this is wasteful but not incorrect.
    pub async fn fetch_with_cache<T, F, Fut>(
        &self,
        key: &str,
        fetch_fn: F,
        on_update: Option<UpdateCallback<T>>,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        if self.is_fresh(key) {
            if let Some(data) = self.get::<T>(key) {
                tracing::debug!("cache hit (fresh) for '{}'", key);
                return Ok(data);
            }
        }

        if let Some(stale) = self.get::<T>(key) {
            tracing::debug!("cache hit (stale) for '{}', revalidating", key);
            let service = self.clone();
            let key = key.to_string();
            let fetch = fetch_fn();
            tokio::spawn(async move {
                match fetch.await {
                    Ok(fresh) => {
                        service.set(&key, &fresh, None);
                        if let Some(callback) = on_update {
                            callback(fresh);
                        }
                    }
                    Err(err) => {
                        tracing::warn!("background revalidation failed for '{}': {:#}", key, err);
                    }
                }
            });
            return Ok(stale);
        }

        tracing::debug!("cache miss for '{}'", key);
        let data = fetch_fn()
            .await
            .with_context(|| format!("fetch failed for '{key}'"))?;
        self.set(key, &data, None);
        Ok(data)
    }
}
