//! Byte-oriented key/value store with per-key expiry.
//!
//! The quality service treats the store as an optimisation only: every
//! [`CacheStoreError`] is logged and recovered from, never surfaced.

use std::time::Duration;

use thiserror::Error;

/// Errors raised by a [`CacheStore`] backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheStoreError {
    /// The backend could not be reached.
    #[error("cache backend unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },
    /// The backend rejected the operation.
    #[error("cache operation on {key} failed: {message}")]
    Operation {
        /// Key the operation targeted.
        key: String,
        /// Description of the failure.
        message: String,
    },
}

/// Key/value store holding serialised results until their TTL lapses.
///
/// Entries whose TTL has elapsed must behave as absent on `get`. Stores are
/// shared across threads and must not require external locking.
pub trait CacheStore: Send + Sync {
    /// Read the bytes stored under `key`, if any and unexpired.
    ///
    /// # Errors
    /// Returns [`CacheStoreError`] when the backend fails.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheStoreError>;

    /// Store `value` under `key`, replacing any previous entry, for `ttl`.
    ///
    /// # Errors
    /// Returns [`CacheStoreError`] when the backend fails.
    fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheStoreError>;

    /// Remove the entry stored under `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    /// Returns [`CacheStoreError`] when the backend fails.
    fn delete(&self, key: &str) -> Result<(), CacheStoreError>;
}

impl<T: CacheStore + ?Sized> CacheStore for &T {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheStoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheStoreError> {
        (**self).set(key, value, ttl)
    }

    fn delete(&self, key: &str) -> Result<(), CacheStoreError> {
        (**self).delete(key)
    }
}

impl<T: CacheStore + ?Sized> CacheStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheStoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheStoreError> {
        (**self).set(key, value, ttl)
    }

    fn delete(&self, key: &str) -> Result<(), CacheStoreError> {
        (**self).delete(key)
    }
}
