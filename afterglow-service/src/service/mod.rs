//! `QualityService` cache-aside orchestration.

use std::time::Duration;

use afterglow_core::{
    CacheStore, Clock, LocationKey, QualityResult, QualityScorer, SystemClock, WeatherProvider,
    cache_key,
};
use chrono::{DateTime, TimeDelta, Utc};

use crate::QualityError;

/// Lifetime of a cached result unless configured otherwise.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Configuration for [`QualityService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityServiceConfig {
    /// How long results stay valid, both in the cache and in `expires_at`.
    pub cache_ttl: Duration,
    /// Whether callers may skip the cache lookup. Intended for debugging.
    pub allow_cache_bypass: bool,
}

impl Default for QualityServiceConfig {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
            allow_cache_bypass: false,
        }
    }
}

/// Cache-aside front for the scoring engine.
///
/// The service is generic over its collaborators: a weather provider, a
/// cache store, a quality scorer, and a clock. Collaborators are built once
/// and shared by every request; the service itself holds no mutable state,
/// so it can be shared by reference across threads.
///
/// Concurrent misses for the same location each recompute and overwrite the
/// cached entry; the last writer wins.
#[derive(Debug)]
pub struct QualityService<P, C, S, K = SystemClock>
where
    P: WeatherProvider,
    C: CacheStore,
    S: QualityScorer,
    K: Clock,
{
    provider: P,
    cache: C,
    scorer: S,
    clock: K,
    config: QualityServiceConfig,
}

impl<P, C, S> QualityService<P, C, S>
where
    P: WeatherProvider,
    C: CacheStore,
    S: QualityScorer,
{
    /// Construct a service using the system clock and default configuration.
    #[must_use]
    pub fn new(provider: P, cache: C, scorer: S) -> Self {
        Self::with_config(provider, cache, scorer, QualityServiceConfig::default())
    }

    /// Construct a service using the system clock and explicit configuration.
    #[must_use]
    pub const fn with_config(
        provider: P,
        cache: C,
        scorer: S,
        config: QualityServiceConfig,
    ) -> Self {
        Self {
            provider,
            cache,
            scorer,
            clock: SystemClock,
            config,
        }
    }
}

impl<P, C, S, K> QualityService<P, C, S, K>
where
    P: WeatherProvider,
    C: CacheStore,
    S: QualityScorer,
    K: Clock,
{
    /// Replace the clock used to stamp results.
    #[must_use]
    pub fn with_clock<K2: Clock>(self, clock: K2) -> QualityService<P, C, S, K2> {
        QualityService {
            provider: self.provider,
            cache: self.cache,
            scorer: self.scorer,
            clock,
            config: self.config,
        }
    }

    /// Configuration the service was built with.
    #[must_use]
    pub const fn config(&self) -> &QualityServiceConfig {
        &self.config
    }

    /// Return the quality result for `location`.
    ///
    /// A cached result is returned untouched when present. Otherwise fresh
    /// snapshots are fetched, scored, stamped with the current time and the
    /// configured TTL, written back to the cache, and returned.
    ///
    /// `bypass_cache` skips the lookup only when the service was configured
    /// with `allow_cache_bypass`; otherwise it is ignored. A bypassing request
    /// still publishes its fresh result.
    ///
    /// # Errors
    /// Returns [`QualityError::InvalidInput`] when `location` is not a valid
    /// key, and [`QualityError::CollaboratorFailure`] when the provider
    /// fails. Cache failures are never surfaced.
    pub fn get_quality(
        &self,
        location: &str,
        bypass_cache: bool,
    ) -> Result<QualityResult, QualityError> {
        let key = LocationKey::parse(location)?;
        let entry_key = cache_key(&key);

        if bypass_cache && !self.config.allow_cache_bypass {
            log::debug!("ignoring cache bypass for {key}: bypass is disabled");
        }
        let bypass = bypass_cache && self.config.allow_cache_bypass;
        if bypass {
            log::info!("bypassing cache for {key}");
        } else if let Some(hit) = self.lookup(&entry_key) {
            log::info!("cache hit for {key}");
            return Ok(hit);
        }

        log::info!("fetching conditions for {key}");
        let (weather, astronomy) = self.provider.fetch_snapshot(&key)?;
        let breakdown = self.scorer.score(&weather, &astronomy);
        let created = self.clock.now();
        let result = QualityResult::new(
            key,
            breakdown,
            weather,
            astronomy,
            created,
            expiry(created, self.config.cache_ttl),
        );
        self.publish(&entry_key, &result);
        Ok(result)
    }

    fn lookup(&self, entry_key: &str) -> Option<QualityResult> {
        let decoded = match self.cache.get(entry_key) {
            Ok(Some(bytes)) => serde_json::from_slice(&bytes)
                .map_err(|err| log::warn!("discarding undecodable cache entry {entry_key}: {err}"))
                .ok(),
            Ok(None) => None,
            Err(err) => {
                log::warn!("cache read for {entry_key} failed: {err}");
                None
            }
        };
        if decoded.is_none() {
            log::info!("cache miss for {entry_key}");
        }
        decoded
    }

    fn publish(&self, entry_key: &str, result: &QualityResult) {
        let bytes = match serde_json::to_vec(result) {
            Ok(bytes) => bytes,
            Err(err) => {
                log::warn!("failed to encode result for {entry_key}: {err}");
                return;
            }
        };
        if let Err(err) = self.cache.set(entry_key, &bytes, self.config.cache_ttl) {
            log::warn!("failed to cache result for {entry_key}: {err}");
        }
    }
}

/// Compute `created + ttl`, saturating at the latest representable instant.
fn expiry(created: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(ttl)
        .ok()
        .and_then(|delta| created.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
