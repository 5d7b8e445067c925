//! Photo-quality scoring for sunrise and sunset conditions.
//!
//! [`PhotoQualityScorer`] implements
//! [`QualityScorer`](afterglow_core::QualityScorer) with an additive model:
//! each weather or astronomy reading maps onto a bounded contribution, the
//! contributions are summed onto a neutral base of `50`, and the result is
//! clamped to `0.0..=100.0`. A [`ScoringFormula`] selects which factors are
//! evaluated and how air quality is treated.
//!
//! | Factor | Maximum |
//! |---|---|
//! | cloud cover | 25 |
//! | humidity | 15 |
//! | visibility | 15 |
//! | air quality | 10 |
//! | sun angle | 15 (classic only) |
//! | recent rain | 5 |
//! | wind | 5 |
//!
//! # Examples
//!
//! ```
//! use afterglow_core::{Interpretation, QualityScorer};
//! use afterglow_core::test_support::{sample_astronomy, sample_weather};
//! use afterglow_scorer::PhotoQualityScorer;
//!
//! let scorer = PhotoQualityScorer::default();
//! let breakdown = scorer.score(&sample_weather(), &sample_astronomy());
//! assert_eq!(breakdown.overall, 100.0);
//! assert_eq!(breakdown.interpretation, Interpretation::Exceptional);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use afterglow_core::{AstronomySnapshot, FactorScores, QualityScorer, ScoreBreakdown, WeatherSnapshot};

mod curves;
mod error;
mod formula;

pub use error::FormulaParseError;
pub use formula::{AirQualityCurve, ScoringFormula};

/// Deterministic additive scorer for sunrise and sunset photography.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhotoQualityScorer {
    formula: ScoringFormula,
}

impl PhotoQualityScorer {
    /// Create a scorer applying `formula`.
    #[must_use]
    pub const fn new(formula: ScoringFormula) -> Self {
        Self { formula }
    }

    /// Formula this scorer applies.
    #[must_use]
    pub const fn formula(&self) -> ScoringFormula {
        self.formula
    }

    /// Evaluate every factor the formula includes.
    #[must_use]
    pub fn factors(&self, weather: &WeatherSnapshot, astronomy: &AstronomySnapshot) -> FactorScores {
        let readings = weather.readings();
        FactorScores {
            cloud: curves::cloud(readings.cloud_cover_percentage),
            humidity: curves::humidity(readings.humidity),
            visibility: curves::visibility(readings.visibility_km),
            air_quality: curves::air_quality(
                readings.air_quality_index,
                self.formula.air_quality_curve,
            ),
            sun_angle: self
                .formula
                .include_sun_angle
                .then(|| curves::sun_angle(astronomy.sun().altitude_deg)),
            recent_rain: curves::recent_rain(readings.precipitation_last_24h_mm),
            wind: curves::wind(readings.wind_speed_mph),
        }
    }
}

impl QualityScorer for PhotoQualityScorer {
    fn score(&self, weather: &WeatherSnapshot, astronomy: &AstronomySnapshot) -> ScoreBreakdown {
        ScoreBreakdown::from_factors(self.factors(weather, astronomy))
    }
}
