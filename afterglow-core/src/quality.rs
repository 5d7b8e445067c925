//! Scoring results and the cache record built from them.
//!
//! [`ScoreBreakdown`] is what a [`QualityScorer`](crate::QualityScorer)
//! returns. [`QualityResult`] wraps a breakdown with the snapshots it was
//! computed from and its validity window; it is the value the quality
//! service caches and returns to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scorer::{BASE_SCORE, sanitise_score};
use crate::{AstronomySnapshot, FactorScores, Interpretation, LocationKey, WeatherSnapshot};

/// Prefix prepended to every location key in the cache.
pub const CACHE_KEY_PREFIX: &str = "sunset_quality:";

/// Return the cache key under which results for `location` are stored.
///
/// # Examples
/// ```
/// use afterglow_core::{LocationKey, cache_key};
///
/// let key = LocationKey::parse("11201").expect("valid key");
/// assert_eq!(cache_key(&key), "sunset_quality:11201");
/// ```
#[must_use]
pub fn cache_key(location: &LocationKey) -> String {
    format!("{CACHE_KEY_PREFIX}{location}")
}

/// Output of one scoring run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// Overall score in `0.0..=100.0`.
    pub overall: f64,
    /// Contribution of each evaluated factor.
    pub factors: FactorScores,
    /// Band the overall score falls into.
    pub interpretation: Interpretation,
}

impl ScoreBreakdown {
    /// Derive the overall score and band from factor contributions.
    ///
    /// The overall score is the base score plus every evaluated factor,
    /// clamped to `0.0..=100.0`; non-finite sums become `0.0`.
    ///
    /// # Examples
    /// ```
    /// use afterglow_core::{FactorScores, Interpretation, ScoreBreakdown};
    ///
    /// let factors = FactorScores { humidity: 6.0, air_quality: 5.0, ..FactorScores::default() };
    /// let breakdown = ScoreBreakdown::from_factors(factors);
    /// assert_eq!(breakdown.overall, 61.0);
    /// assert_eq!(breakdown.interpretation, Interpretation::Good);
    /// ```
    #[expect(
        clippy::float_arithmetic,
        reason = "the overall score adds factor contributions to the base"
    )]
    #[must_use]
    pub fn from_factors(factors: FactorScores) -> Self {
        let overall = sanitise_score(BASE_SCORE + factors.total());
        Self {
            overall,
            factors,
            interpretation: Interpretation::from_score(overall),
        }
    }
}

/// Scored result for one location, as cached and returned to callers.
///
/// Results are immutable: a later cache miss supersedes a result with a new
/// one rather than updating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityResult {
    location_key: LocationKey,
    overall_quality: f64,
    factors: FactorScores,
    interpretation: Interpretation,
    weather_data: WeatherSnapshot,
    astronomy_data: AstronomySnapshot,
    last_updated: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl QualityResult {
    /// Assemble a result from a breakdown and the snapshots it scored.
    #[must_use]
    pub fn new(
        location_key: LocationKey,
        breakdown: ScoreBreakdown,
        weather: WeatherSnapshot,
        astronomy: AstronomySnapshot,
        last_updated: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            location_key,
            overall_quality: breakdown.overall,
            factors: breakdown.factors,
            interpretation: breakdown.interpretation,
            weather_data: weather,
            astronomy_data: astronomy,
            last_updated,
            expires_at,
        }
    }

    /// Location the result was computed for.
    #[must_use]
    pub const fn location_key(&self) -> &LocationKey {
        &self.location_key
    }

    /// Overall score in `0.0..=100.0`.
    #[must_use]
    pub const fn overall_quality(&self) -> f64 {
        self.overall_quality
    }

    /// Contribution of each evaluated factor.
    #[must_use]
    pub const fn factors(&self) -> &FactorScores {
        &self.factors
    }

    /// Band the overall score falls into.
    #[must_use]
    pub const fn interpretation(&self) -> Interpretation {
        self.interpretation
    }

    /// Weather snapshot the score was computed from.
    #[must_use]
    pub const fn weather(&self) -> &WeatherSnapshot {
        &self.weather_data
    }

    /// Astronomy snapshot the score was computed from.
    #[must_use]
    pub const fn astronomy(&self) -> &AstronomySnapshot {
        &self.astronomy_data
    }

    /// Instant the result was computed.
    #[must_use]
    pub const fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Instant after which the result should no longer be served.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Rebuild the breakdown carried by this result.
    #[must_use]
    pub const fn breakdown(&self) -> ScoreBreakdown {
        ScoreBreakdown {
            overall: self.overall_quality,
            factors: self.factors,
            interpretation: self.interpretation,
        }
    }
}
