//! Test doubles for the collaborator seams, used by unit and behaviour
//! tests across the workspace.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::{
    AstronomySnapshot, CacheStore, CacheStoreError, Clock, FactorScores, LocationKey,
    MoonObservation, QualityScorer, ScoreBreakdown, SnapshotPair, SolarEvents, SunPosition,
    WeatherProvider, WeatherProviderError, WeatherReadings, WeatherSnapshot,
};

/// Weather for a calm, partly cloudy evening in Brooklyn.
///
/// Cloud 50 %, humidity 55 %, visibility 12 km, AQI 40, no rain, 10 mph wind.
#[must_use]
pub fn sample_weather() -> WeatherSnapshot {
    let readings = WeatherReadings {
        cloud_cover_percentage: 50.0,
        humidity: 55.0,
        visibility_km: 12.0,
        air_quality_index: 40.0,
        precipitation_last_24h_mm: 0.0,
        wind_speed_mph: 10.0,
        temperature: 72.0,
    };
    WeatherSnapshot::new("Brooklyn, New York", sample_date(), readings)
}

/// Astronomy with the sun on the horizon.
#[must_use]
pub fn sample_astronomy() -> AstronomySnapshot {
    astronomy_at_altitude(0.0)
}

/// Astronomy for the sample date with the sun at `altitude_deg`.
#[must_use]
pub fn astronomy_at_altitude(altitude_deg: f64) -> AstronomySnapshot {
    let events = SolarEvents {
        sunrise: utc(2024, 6, 21, 9, 25),
        sunset: utc(2024, 6, 22, 0, 31),
    };
    AstronomySnapshot::new(
        SunPosition {
            altitude_deg,
            azimuth_deg: 302.0,
        },
        events,
        MoonObservation {
            phase: "Waxing Gibbous".to_owned(),
            illumination_percentage: 97.0,
        },
    )
}

/// Calendar date used by the sample snapshots.
#[must_use]
pub fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 21).unwrap_or_default()
}

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

/// `WeatherProvider` returning a canned outcome and counting calls.
#[derive(Debug)]
pub struct StubWeatherProvider {
    outcome: Result<SnapshotPair, WeatherProviderError>,
    calls: AtomicUsize,
}

impl StubWeatherProvider {
    /// Provider that always returns `weather` and `astronomy`.
    #[must_use]
    pub const fn returning(weather: WeatherSnapshot, astronomy: AstronomySnapshot) -> Self {
        Self {
            outcome: Ok((weather, astronomy)),
            calls: AtomicUsize::new(0),
        }
    }

    /// Provider that always returns the sample snapshots.
    #[must_use]
    pub fn sample() -> Self {
        Self::returning(sample_weather(), sample_astronomy())
    }

    /// Provider that always fails with `error`.
    #[must_use]
    pub const fn failing(error: WeatherProviderError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `fetch_snapshot` calls observed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl WeatherProvider for StubWeatherProvider {
    fn fetch_snapshot(&self, _location: &LocationKey) -> Result<SnapshotPair, WeatherProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Unbounded `CacheStore` that records the TTL of every write.
///
/// Entries never expire on their own; tests expire them with
/// [`MapCacheStore::expire`].
#[derive(Debug, Default)]
pub struct MapCacheStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    ttls: Mutex<Vec<Duration>>,
}

impl MapCacheStore {
    /// Store raw bytes under `key`, bypassing TTL bookkeeping.
    pub fn seed(&self, key: &str, value: &[u8]) {
        self.lock_entries().insert(key.to_owned(), value.to_vec());
    }

    /// Drop the entry under `key` as if its TTL had elapsed.
    pub fn expire(&self, key: &str) {
        self.lock_entries().remove(key);
    }

    /// Return a copy of the bytes stored under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.lock_entries().get(key).cloned()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// TTLs passed to `set`, in call order.
    #[must_use]
    pub fn recorded_ttls(&self) -> Vec<Duration> {
        self.ttls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CacheStore for MapCacheStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheStoreError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheStoreError> {
        self.seed(key, value);
        self.ttls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ttl);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheStoreError> {
        self.expire(key);
        Ok(())
    }
}

/// `CacheStore` whose every operation fails, counting attempts.
#[derive(Debug, Default)]
pub struct FailingCacheStore {
    calls: AtomicUsize,
}

impl FailingCacheStore {
    /// Number of operations attempted so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail(&self) -> CacheStoreError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        CacheStoreError::Unavailable {
            message: "connection refused".to_owned(),
        }
    }
}

impl CacheStore for FailingCacheStore {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheStoreError> {
        Err(self.fail())
    }

    fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> Result<(), CacheStoreError> {
        Err(self.fail())
    }

    fn delete(&self, _key: &str) -> Result<(), CacheStoreError> {
        Err(self.fail())
    }
}

/// `Clock` frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(utc(2024, 6, 21, 23, 0))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// `QualityScorer` returning the same factor contributions for any input.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedScorer(pub FactorScores);

impl QualityScorer for FixedScorer {
    fn score(&self, _weather: &WeatherSnapshot, _astronomy: &AstronomySnapshot) -> ScoreBreakdown {
        ScoreBreakdown::from_factors(self.0)
    }
}
