//! Core domain types for the Afterglow photo-quality engine.
//!
//! The crate defines the snapshot data model handed to the scoring engine,
//! the result records produced by the cache-aside service, and the traits
//! sitting at each collaborator seam:
//!
//! - [`QualityScorer`] turns a weather/astronomy snapshot pair into a
//!   [`ScoreBreakdown`].
//! - [`WeatherProvider`] supplies snapshots for a [`LocationKey`].
//! - [`CacheStore`] is a byte-oriented key/value store with per-key expiry.
//! - [`Clock`] supplies the wall-clock time used to stamp results.
//!
//! Snapshot constructors never validate; producers call the `validate`
//! helpers before handing data to the engine.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cache;
pub mod clock;
pub mod factors;
pub mod interpretation;
pub mod location;
pub mod provider;
pub mod quality;
pub mod scorer;
pub mod snapshot;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use cache::{CacheStore, CacheStoreError};
pub use clock::{Clock, SystemClock};
pub use factors::{FactorName, FactorScores};
pub use interpretation::Interpretation;
pub use location::{LocationKey, LocationKeyError};
pub use provider::{SnapshotPair, WeatherProvider, WeatherProviderError};
pub use quality::{CACHE_KEY_PREFIX, QualityResult, ScoreBreakdown, cache_key};
pub use scorer::{BASE_SCORE, MAX_SCORE, MIN_SCORE, QualityScorer};
pub use snapshot::{
    AstronomySnapshot, MoonObservation, SnapshotError, SolarEvents, SunPosition, WeatherReadings,
    WeatherSnapshot,
};
