//! In-memory key-value cache with per-entry expiry.
//!
//! Entries are evicted lazily: a read at or past the expiry instant removes
//! the entry and reports a miss. There is no background sweep and no size
//! bound.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use sha2::{Digest, Sha256};
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Thread-safe TTL cache keyed by string.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

impl<V> Default for TtlCache<V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<V: Clone> TtlCache<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the stored value, or `None` when absent or expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.lock();
        if entries.get(key)?.is_expired(Instant::now()) {
            entries.remove(key);
            tracing::debug!(key, "cache entry expired");
            return None;
        }
        entries.get(key).map(|entry| entry.value.clone())
    }

    /// Store `value` under `key` until `ttl` elapses, replacing any previous entry.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.lock().insert(key.into(), entry);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut entries = self.lock();
        let removed = entries.len();
        entries.clear();
        tracing::info!(removed, "cache cleared");
    }

    /// Number of stored entries, including expired ones not yet read.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A poisoned map is still structurally sound; keep serving from it.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Deterministic cache key for one issue of one repository.
///
/// SHA-256 (lowercase hex) of `"{repo_url}#{issue_number}"`. The URL is
/// hashed exactly as given, so differently spelled URLs for the same
/// repository get distinct keys.
#[must_use]
pub fn generate_key(repo_url: &str, issue_number: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{repo_url}#{issue_number}").as_bytes());
    format!("{:x}", hasher.finalize())
}
