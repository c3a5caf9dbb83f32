//! Cache entry envelope
//!
//! Stored values are wrapped in a JSON envelope carrying the write time and
//! expiration time, both as epoch milliseconds:
//! `{ "data": ..., "timestamp": ..., "expiresAt": ... }`.
//! Field names are camelCase on the wire so entries stay readable alongside
//! the API payloads they cache.

use serde::{Deserialize, Serialize};

/// A cached payload plus its expiration metadata.
///
/// Invariant: `expires_at >= timestamp`. Entries are created by
/// [`crate::cache::CacheService::set`] and never mutated in place; a newer
/// `set` replaces the whole envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry<T> {
    /// The cached value
    pub data: T,
    /// When the entry was written (epoch ms)
    pub timestamp: i64,
    /// When the entry stops being fresh (epoch ms)
    pub expires_at: i64,
}

impl<T> CacheEntry<T> {
    /// Whether the entry is still fresh at `now_ms`.
    ///
    /// Freshness is strict: an entry whose `expires_at` equals the current
    /// time is already stale.
    pub fn is_fresh(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at
    }
}

/// Expiration metadata alone, for freshness checks that should not pay for
/// deserializing the payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EntryMeta {
    pub expires_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness_is_strict() {
        let entry = CacheEntry {
            data: "v",
            timestamp: 1_000,
            expires_at: 2_000,
        };

        assert!(entry.is_fresh(1_000));
        assert!(entry.is_fresh(1_999));
        assert!(!entry.is_fresh(2_000), "expiry instant counts as stale");
        assert!(!entry.is_fresh(3_000));
    }

    #[test]
    fn test_wire_format_uses_camel_case() {
        let entry = CacheEntry {
            data: vec![1, 2, 3],
            timestamp: 10,
            expires_at: 20,
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""expiresAt":20"#), "got: {}", json);
        assert!(json.contains(r#""timestamp":10"#), "got: {}", json);
        assert!(json.contains(r#""data":[1,2,3]"#), "got: {}", json);
    }

    #[test]
    fn test_meta_parses_envelope_without_payload_type() {
        let json = r#"{"data":{"deeply":["nested",1]},"timestamp":5,"expiresAt":99}"#;
        let meta: EntryMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.expires_at, 99);
    }
}
