//! Read-through TTL cache
//!
//! Provides a `TtlCache` that stores computed values with an expiry instant.
//! Expired entries are never returned; the next read recomputes and overwrites
//! them.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use tokio::time::Instant;

/// A cached value and the instant it stops being live
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory cache keyed by `K`, where every entry carries its own TTL
///
/// Access is through `&mut self`, so a single owner serializes all writers.
/// Callers sharing one cache across tasks must wrap it in their own lock.
/// There is no eviction beyond expiry.
#[derive(Debug, Clone)]
pub struct TtlCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K, V> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key` if it exists and has not expired
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone())
    }

    /// Stores `value` under `key`, live for `ttl` from now
    pub fn insert(&mut self, key: K, value: V, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        self.entries.insert(key, CacheEntry { value, expires_at });
    }

    /// Returns the live value for `key`, or runs `compute` and caches its result.
    ///
    /// # Arguments
    /// * `key` - Cache key
    /// * `ttl` - How long a freshly computed value stays live
    /// * `compute` - Produces the value on a miss or after expiry
    ///
    /// # Returns
    /// * `Ok(V)` - The cached or freshly computed value
    /// * `Err(E)` - The error from `compute`; nothing is stored
    pub async fn get_or_compute<F, Fut, E>(
        &mut self,
        key: K,
        ttl: Duration,
        compute: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }

        let value = compute().await?;
        self.insert(key, value.clone(), ttl);
        Ok(value)
    }

    /// Removes expired entries, returning how many were dropped
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live(now));
        before - self.entries.len()
    }

    /// Number of stored entries, including expired ones not yet purged
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
