//! Score a weather/astronomy snapshot pair for sunrise and sunset photography.
//!
//! The [`QualityScorer`] trait turns a snapshot pair into a
//! [`ScoreBreakdown`](crate::ScoreBreakdown): an overall score on a
//! `0.0..=100.0` scale, the itemised factor contributions, and the
//! qualitative band for the score.

use crate::{AstronomySnapshot, ScoreBreakdown, WeatherSnapshot};

/// Neutral score every formula starts from before factors are added.
pub const BASE_SCORE: f64 = 50.0;

/// Lowest overall score a breakdown may report.
pub const MIN_SCORE: f64 = 0.0;

/// Highest overall score a breakdown may report.
pub const MAX_SCORE: f64 = 100.0;

/// Calculate photographic quality for a snapshot pair.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so a single scorer
/// can serve concurrent requests. Scoring is infallible and deterministic:
/// the same inputs always yield the same breakdown, and no wall-clock or
/// random state may influence the result.
///
/// Implementations must:
/// - Produce a finite overall score.
/// - Clamp the overall score to `MIN_SCORE..=MAX_SCORE`.
/// - Report exactly the factors they evaluated.
///
/// [`ScoreBreakdown::from_factors`] applies these guards.
///
/// # Examples
///
/// ```rust
/// use afterglow_core::{
///     AstronomySnapshot, FactorScores, QualityScorer, ScoreBreakdown, WeatherSnapshot,
/// };
///
/// struct Neutral;
///
/// impl QualityScorer for Neutral {
///     fn score(&self, _weather: &WeatherSnapshot, _astronomy: &AstronomySnapshot) -> ScoreBreakdown {
///         ScoreBreakdown::from_factors(FactorScores::default())
///     }
/// }
///
/// assert_eq!(Neutral::sanitise(f64::NAN), 0.0);
/// assert_eq!(Neutral::sanitise(131.0), 100.0);
/// ```
pub trait QualityScorer: Send + Sync {
    /// Return the breakdown for `weather` and `astronomy`.
    fn score(&self, weather: &WeatherSnapshot, astronomy: &AstronomySnapshot) -> ScoreBreakdown;

    /// Clamp and validate a raw overall score.
    ///
    /// Returns `0.0` for non-finite values and clamps to
    /// `MIN_SCORE..=MAX_SCORE`.
    #[must_use]
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        sanitise_score(score)
    }
}

impl<T: QualityScorer + ?Sized> QualityScorer for &T {
    fn score(&self, weather: &WeatherSnapshot, astronomy: &AstronomySnapshot) -> ScoreBreakdown {
        (**self).score(weather, astronomy)
    }
}

impl<T: QualityScorer + ?Sized> QualityScorer for std::sync::Arc<T> {
    fn score(&self, weather: &WeatherSnapshot, astronomy: &AstronomySnapshot) -> ScoreBreakdown {
        (**self).score(weather, astronomy)
    }
}

pub(crate) fn sanitise_score(score: f64) -> f64 {
    if !score.is_finite() {
        return MIN_SCORE;
    }
    score.clamp(MIN_SCORE, MAX_SCORE)
}
