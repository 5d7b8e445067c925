//! Facade crate for the Afterglow photo-quality engine.
//!
//! This crate re-exports the core domain types and exposes the scorer, the
//! cache-aside service and the bundled adapters behind feature flags.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use afterglow_core::{
    AstronomySnapshot, CacheStore, CacheStoreError, Clock, FactorName, FactorScores,
    Interpretation, LocationKey, LocationKeyError, MoonObservation, QualityResult, QualityScorer,
    ScoreBreakdown, SnapshotError, SolarEvents, SunPosition, SystemClock, WeatherProvider,
    WeatherProviderError, WeatherReadings, WeatherSnapshot,
};

#[cfg(feature = "test-support")]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub use afterglow_core::test_support;

#[cfg(feature = "scorer")]
#[cfg_attr(docsrs, doc(cfg(feature = "scorer")))]
pub use afterglow_scorer::{AirQualityCurve, FormulaParseError, PhotoQualityScorer, ScoringFormula};

#[cfg(feature = "service")]
#[cfg_attr(docsrs, doc(cfg(feature = "service")))]
pub use afterglow_service::{
    DEFAULT_CACHE_TTL, QualityError, QualityService, QualityServiceConfig, endpoint,
};

#[cfg(feature = "adapters")]
#[cfg_attr(docsrs, doc(cfg(feature = "adapters")))]
pub use afterglow_data::{FileWeatherProvider, MemoryCacheStore, SnapshotRecord, SnapshotRecordError};
