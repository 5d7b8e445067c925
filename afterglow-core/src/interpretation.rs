//! Qualitative bands for an overall quality score.
//!
//! Bands are closed, ordered and non-overlapping. Each band includes its
//! lower bound, so a score of exactly `80.0` is [`Interpretation::Exceptional`]
//! while `79.999` is [`Interpretation::VeryGood`].
//!
//! # Examples
//! ```
//! use afterglow_core::Interpretation;
//!
//! assert_eq!(Interpretation::from_score(80.0), Interpretation::Exceptional);
//! assert_eq!(Interpretation::from_score(64.9).label(), "good");
//! ```

use serde::{Deserialize, Serialize};

/// Interpretation band for a clamped quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Interpretation {
    /// Below `35.0`.
    #[serde(rename = "poor")]
    Poor,
    /// `35.0..50.0`.
    #[serde(rename = "fair")]
    Fair,
    /// `50.0..65.0`.
    #[serde(rename = "good")]
    Good,
    /// `65.0..80.0`.
    #[serde(rename = "very good")]
    VeryGood,
    /// `80.0` and above.
    #[serde(rename = "exceptional")]
    Exceptional,
}

impl Interpretation {
    /// Bands from best to worst, paired with their inclusive lower bound.
    const THRESHOLDS: [(f64, Self); 4] = [
        (80.0, Self::Exceptional),
        (65.0, Self::VeryGood),
        (50.0, Self::Good),
        (35.0, Self::Fair),
    ];

    /// Map a score onto its band.
    ///
    /// Scores below every threshold, including NaN, are [`Self::Poor`].
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        Self::THRESHOLDS
            .into_iter()
            .find(|(lower, _)| score >= *lower)
            .map_or(Self::Poor, |(_, band)| band)
    }

    /// Short label used in serialised results.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Exceptional => "exceptional",
            Self::VeryGood => "very good",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }

    /// Sentence describing what a photographer can expect.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Exceptional => "Exceptional conditions for dramatic sunrise/sunset photography",
            Self::VeryGood => "Very good conditions, expect vibrant colors",
            Self::Good => "Good conditions, some color expected",
            Self::Fair => "Fair conditions, limited color possible",
            Self::Poor => "Poor conditions, minimal color expected",
        }
    }
}

impl std::fmt::Display for Interpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
