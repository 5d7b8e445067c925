//! Formula configuration for the photo-quality scorer.
//!
//! Two presets exist. [`ScoringFormula::CLASSIC`] scores the sun's altitude
//! and treats lower air-quality indices as strictly better.
//! [`ScoringFormula::HAZE`] ignores the sun and rewards moderate haze, which
//! tends to scatter warm light at low sun angles.

use std::fmt;
use std::str::FromStr;

use crate::FormulaParseError;

/// How the air-quality index maps onto its contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AirQualityCurve {
    /// `max(0, 10 - aqi / 10)`.
    LowerIsBetter,
    /// Flat `10` for `50..=100`, rising below and decaying above.
    ModerateHazeEnhances,
}

/// Selects which factors are evaluated and how air quality is scored.
///
/// # Examples
/// ```
/// use afterglow_scorer::ScoringFormula;
///
/// let formula: ScoringFormula = "haze".parse().expect("known preset");
/// assert_eq!(formula, ScoringFormula::HAZE);
/// assert!(!formula.include_sun_angle);
/// assert_eq!(ScoringFormula::default(), ScoringFormula::CLASSIC);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoringFormula {
    /// Whether the sun-angle factor contributes to the score.
    pub include_sun_angle: bool,
    /// Curve applied to the air-quality index.
    pub air_quality_curve: AirQualityCurve,
}

impl ScoringFormula {
    /// Sun angle scored, lower AQI is better.
    pub const CLASSIC: Self = Self {
        include_sun_angle: true,
        air_quality_curve: AirQualityCurve::LowerIsBetter,
    };

    /// Sun angle ignored, moderate haze rewarded.
    pub const HAZE: Self = Self {
        include_sun_angle: false,
        air_quality_curve: AirQualityCurve::ModerateHazeEnhances,
    };

    /// Return the preset name, or `None` for a custom combination.
    #[must_use]
    pub fn preset_name(self) -> Option<&'static str> {
        if self == Self::CLASSIC {
            Some("classic")
        } else if self == Self::HAZE {
            Some("haze")
        } else {
            None
        }
    }
}

impl Default for ScoringFormula {
    fn default() -> Self {
        Self::CLASSIC
    }
}

impl FromStr for ScoringFormula {
    type Err = FormulaParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::CLASSIC),
            "haze" => Ok(Self::HAZE),
            _ => Err(FormulaParseError { name: s.to_owned() }),
        }
    }
}

impl fmt::Display for ScoringFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.preset_name() {
            Some(name) => f.write_str(name),
            None => write!(
                f,
                "custom(sun_angle={}, air_quality={:?})",
                self.include_sun_angle, self.air_quality_curve
            ),
        }
    }
}
