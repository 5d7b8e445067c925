//! Process-local `CacheStore` backed by `DashMap`.
//!
//! Entries carry an `Instant` deadline. Expired entries are evicted lazily
//! when read, or in bulk via [`MemoryCacheStore::purge_expired`].

use std::time::{Duration, Instant};

use afterglow_core::{CacheStore, CacheStoreError};
use dashmap::DashMap;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    /// `None` when the TTL is too large to represent; such entries never
    /// expire.
    deadline: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }
}

/// Concurrent in-memory cache with per-key expiry.
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use afterglow_core::CacheStore;
/// use afterglow_data::MemoryCacheStore;
///
/// # fn main() -> Result<(), afterglow_core::CacheStoreError> {
/// let cache = MemoryCacheStore::new();
/// cache.set("sunset_quality:11201", b"{}", Duration::from_secs(60))?;
/// assert_eq!(cache.get("sunset_quality:11201")?, Some(b"{}".to_vec()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryCacheStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including expired ones not yet evicted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evict every expired entry and return how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            log::debug!("purged {removed} expired cache entries");
        }
        removed
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheStoreError> {
        let now = Instant::now();
        let lookup = self
            .entries
            .get(key)
            .map(|entry| (!entry.is_expired(now)).then(|| entry.value.clone()));
        match lookup {
            Some(Some(value)) => Ok(Some(value)),
            Some(None) => {
                self.entries.remove_if(key, |_, entry| entry.is_expired(now));
                log::debug!("evicted expired cache entry {key}");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheStoreError> {
        let entry = CacheEntry {
            value: value.to_vec(),
            deadline: Instant::now().checked_add(ttl),
        };
        self.entries.insert(key.to_owned(), entry);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheStoreError> {
        self.entries.remove(key);
        Ok(())
    }
}
