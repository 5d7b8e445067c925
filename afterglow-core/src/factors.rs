//! Itemised factor contributions produced by the scoring engine.
//!
//! Inside the engine each factor is a named field so the set of evaluated
//! factors is statically known. At the serialisation boundary the record is
//! turned into a flat `name -> contribution` mapping, omitting factors the
//! active formula did not evaluate.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier for each additive factor.
///
/// # Examples
/// ```
/// use afterglow_core::FactorName;
///
/// assert_eq!(FactorName::Cloud.as_str(), "cloud_score");
/// assert_eq!("wind_score".parse::<FactorName>(), Ok(FactorName::Wind));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FactorName {
    /// Cloud cover.
    Cloud,
    /// Relative humidity.
    Humidity,
    /// Horizontal visibility.
    Visibility,
    /// Air-quality index.
    AirQuality,
    /// Sun altitude near the horizon.
    SunAngle,
    /// Precipitation over the previous day.
    RecentRain,
    /// Wind speed.
    Wind,
}

impl FactorName {
    /// Every factor in evaluation order.
    pub const ALL: [Self; 7] = [
        Self::Cloud,
        Self::Humidity,
        Self::Visibility,
        Self::AirQuality,
        Self::SunAngle,
        Self::RecentRain,
        Self::Wind,
    ];

    /// Return the mapping key used in serialised results.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cloud => "cloud_score",
            Self::Humidity => "humidity_score",
            Self::Visibility => "visibility_score",
            Self::AirQuality => "air_quality_score",
            Self::SunAngle => "sun_angle_score",
            Self::RecentRain => "recent_rain_score",
            Self::Wind => "wind_score",
        }
    }
}

impl fmt::Display for FactorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FactorName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("unknown factor '{s}'"))
    }
}

/// Contribution of every evaluated factor to the overall score.
///
/// `sun_angle` is `None` when the active formula does not evaluate the sun
/// angle; it is then absent from [`FactorScores::iter`] and from the
/// serialised mapping rather than reported as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FactorScores {
    /// Cloud-cover contribution.
    pub cloud: f64,
    /// Humidity contribution.
    pub humidity: f64,
    /// Visibility contribution.
    pub visibility: f64,
    /// Air-quality contribution.
    pub air_quality: f64,
    /// Sun-angle contribution, when evaluated.
    pub sun_angle: Option<f64>,
    /// Recent-rain contribution.
    pub recent_rain: f64,
    /// Wind contribution.
    pub wind: f64,
}

impl FactorScores {
    /// Return the contribution for `name`, or `None` when it was not
    /// evaluated.
    #[must_use]
    pub const fn get(&self, name: FactorName) -> Option<f64> {
        match name {
            FactorName::Cloud => Some(self.cloud),
            FactorName::Humidity => Some(self.humidity),
            FactorName::Visibility => Some(self.visibility),
            FactorName::AirQuality => Some(self.air_quality),
            FactorName::SunAngle => self.sun_angle,
            FactorName::RecentRain => Some(self.recent_rain),
            FactorName::Wind => Some(self.wind),
        }
    }

    /// Iterate over evaluated factors in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (FactorName, f64)> + '_ {
        FactorName::ALL
            .into_iter()
            .filter_map(|name| self.get(name).map(|value| (name, value)))
    }

    /// Number of evaluated factors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always `false`: the mandatory factors are always evaluated.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Sum of all evaluated contributions, in evaluation order.
    #[expect(
        clippy::float_arithmetic,
        reason = "the overall score is an additive sum of factor contributions"
    )]
    #[must_use]
    pub fn total(&self) -> f64 {
        self.iter().fold(0.0, |acc, (_, value)| acc + value)
    }
}

impl Serialize for FactorScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name.as_str(), &value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FactorScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FactorScoresVisitor)
    }
}

struct FactorScoresVisitor;

impl<'de> Visitor<'de> for FactorScoresVisitor {
    type Value = FactorScores;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a mapping from factor name to contribution")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut cloud = None;
        let mut humidity = None;
        let mut visibility = None;
        let mut air_quality = None;
        let mut sun_angle = None;
        let mut recent_rain = None;
        let mut wind = None;
        while let Some(key) = access.next_key::<String>()? {
            let name: FactorName = key.parse().map_err(<A::Error as de::Error>::custom)?;
            let slot = match name {
                FactorName::Cloud => &mut cloud,
                FactorName::Humidity => &mut humidity,
                FactorName::Visibility => &mut visibility,
                FactorName::AirQuality => &mut air_quality,
                FactorName::SunAngle => &mut sun_angle,
                FactorName::RecentRain => &mut recent_rain,
                FactorName::Wind => &mut wind,
            };
            if slot.is_some() {
                return Err(<A::Error as de::Error>::duplicate_field(name.as_str()));
            }
            *slot = Some(access.next_value::<f64>()?);
        }
        Ok(FactorScores {
            cloud: require::<A::Error>(cloud, FactorName::Cloud)?,
            humidity: require::<A::Error>(humidity, FactorName::Humidity)?,
            visibility: require::<A::Error>(visibility, FactorName::Visibility)?,
            air_quality: require::<A::Error>(air_quality, FactorName::AirQuality)?,
            sun_angle,
            recent_rain: require::<A::Error>(recent_rain, FactorName::RecentRain)?,
            wind: require::<A::Error>(wind, FactorName::Wind)?,
        })
    }
}

fn require<E: de::Error>(value: Option<f64>, name: FactorName) -> Result<f64, E> {
    value.ok_or_else(|| E::missing_field(name.as_str()))
}
