//! Point-in-time weather and astronomy snapshots.
//!
//! Snapshots are immutable once constructed: fields are private and exposed
//! through accessors. Numeric readings are grouped into small `Copy` records
//! so producers can build them field-by-field before sealing the snapshot.
//!
//! The serialised form is a flat JSON object per snapshot, matching the
//! record layout persisted in the cache.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by the snapshot `validate` helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    /// A reading was NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A reading fell outside its documented domain.
    #[error("{field} must be within {min}..={max}, found {value}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied by the producer.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
    /// Sunrise was not strictly before sunset.
    #[error("sunrise {sunrise} must precede sunset {sunset}")]
    SunriseAfterSunset {
        /// Reported sunrise.
        sunrise: DateTime<Utc>,
        /// Reported sunset.
        sunset: DateTime<Utc>,
    },
}

/// Numeric meteorological readings for one location.
///
/// # Examples
///
/// ```
/// use afterglow_core::WeatherReadings;
///
/// let readings = WeatherReadings {
///     cloud_cover_percentage: 45.0,
///     humidity: 60.0,
///     visibility_km: 10.0,
///     ..WeatherReadings::default()
/// };
/// assert!(readings.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReadings {
    /// Cloud cover percentage in `0.0..=100.0`.
    pub cloud_cover_percentage: f64,
    /// Relative humidity percentage in `0.0..=100.0`.
    pub humidity: f64,
    /// Horizontal visibility in kilometres.
    pub visibility_km: f64,
    /// Air-quality index; `0.0` means the index is unknown.
    pub air_quality_index: f64,
    /// Precipitation over the previous 24 hours in millimetres.
    #[serde(rename = "precipitation_last_24h")]
    pub precipitation_last_24h_mm: f64,
    /// Wind speed in miles per hour.
    #[serde(rename = "wind_speed")]
    pub wind_speed_mph: f64,
    /// Air temperature in degrees Fahrenheit.
    pub temperature: f64,
}

impl WeatherReadings {
    /// Check every reading against its documented domain.
    ///
    /// # Errors
    /// Returns the first [`SnapshotError`] encountered, in field order.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let bounded = [
            ("cloud_cover_percentage", self.cloud_cover_percentage, 0.0, 100.0),
            ("humidity", self.humidity, 0.0, 100.0),
            ("visibility_km", self.visibility_km, 0.0, f64::MAX),
            ("air_quality_index", self.air_quality_index, 0.0, f64::MAX),
            (
                "precipitation_last_24h",
                self.precipitation_last_24h_mm,
                0.0,
                f64::MAX,
            ),
            ("wind_speed", self.wind_speed_mph, 0.0, f64::MAX),
            ("temperature", self.temperature, f64::MIN, f64::MAX),
        ];
        bounded
            .into_iter()
            .try_for_each(|(field, value, min, max)| check_range(field, value, min, max))
    }
}

/// Weather conditions observed for one location on one date.
///
/// # Examples
///
/// ```
/// use afterglow_core::{WeatherReadings, WeatherSnapshot};
/// use chrono::NaiveDate;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let date = NaiveDate::from_ymd_opt(2024, 6, 21).ok_or("invalid date")?;
/// let snapshot = WeatherSnapshot::new("Brooklyn, New York", date, WeatherReadings::default());
/// assert_eq!(snapshot.location(), "Brooklyn, New York");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(flatten)]
    readings: WeatherReadings,
    location: String,
    date: NaiveDate,
}

impl WeatherSnapshot {
    /// Seal a set of readings into a snapshot.
    #[must_use]
    pub fn new(location: impl Into<String>, date: NaiveDate, readings: WeatherReadings) -> Self {
        Self {
            readings,
            location: location.into(),
            date,
        }
    }

    /// Numeric readings captured by the snapshot.
    #[must_use]
    pub const fn readings(&self) -> &WeatherReadings {
        &self.readings
    }

    /// Free-text location label, e.g. `"Brooklyn, New York"`.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Calendar date the snapshot describes.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Position of the sun relative to the observer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SunPosition {
    /// Altitude in degrees; negative values are below the horizon.
    #[serde(rename = "sun_altitude")]
    pub altitude_deg: f64,
    /// Azimuth in degrees clockwise from north.
    #[serde(rename = "sun_azimuth")]
    pub azimuth_deg: f64,
}

/// Sunrise and sunset instants for the snapshot date, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolarEvents {
    /// Sunrise instant.
    #[serde(rename = "sunrise_time")]
    pub sunrise: DateTime<Utc>,
    /// Sunset instant.
    #[serde(rename = "sunset_time")]
    pub sunset: DateTime<Utc>,
}

/// Lunar conditions for the snapshot date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoonObservation {
    /// Phase label, e.g. `"Waxing Gibbous"`.
    #[serde(rename = "moon_phase")]
    pub phase: String,
    /// Illuminated fraction as a percentage in `0.0..=100.0`.
    #[serde(rename = "moon_illumination")]
    pub illumination_percentage: f64,
}

/// Astronomical conditions for one location on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstronomySnapshot {
    #[serde(flatten)]
    sun: SunPosition,
    #[serde(flatten)]
    events: SolarEvents,
    #[serde(flatten)]
    moon: MoonObservation,
}

impl AstronomySnapshot {
    /// Seal solar and lunar observations into a snapshot.
    #[must_use]
    pub const fn new(sun: SunPosition, events: SolarEvents, moon: MoonObservation) -> Self {
        Self { sun, events, moon }
    }

    /// Sun altitude and azimuth.
    #[must_use]
    pub const fn sun(&self) -> SunPosition {
        self.sun
    }

    /// Sunrise and sunset instants.
    #[must_use]
    pub const fn events(&self) -> SolarEvents {
        self.events
    }

    /// Moon phase and illumination.
    #[must_use]
    pub const fn moon(&self) -> &MoonObservation {
        &self.moon
    }

    /// Check the observations for internal consistency.
    ///
    /// # Errors
    /// Returns [`SnapshotError`] when a reading is non-finite or out of
    /// range, or when sunrise does not precede sunset.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        check_range("sun_altitude", self.sun.altitude_deg, -90.0, 90.0)?;
        check_range("sun_azimuth", self.sun.azimuth_deg, 0.0, 360.0)?;
        check_range(
            "moon_illumination",
            self.moon.illumination_percentage,
            0.0,
            100.0,
        )?;
        if self.events.sunrise >= self.events.sunset {
            return Err(SnapshotError::SunriseAfterSunset {
                sunrise: self.events.sunrise,
                sunset: self.events.sunset,
            });
        }
        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), SnapshotError> {
    if !value.is_finite() {
        return Err(SnapshotError::NonFinite { field });
    }
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SnapshotError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn events() -> SolarEvents {
        SolarEvents {
            sunrise: Utc.with_ymd_and_hms(2024, 6, 21, 9, 25, 0)
                .single()
                .expect("valid sunrise"),
            sunset: Utc.with_ymd_and_hms(2024, 6, 22, 0, 31, 0)
                .single()
                .expect("valid sunset"),
        }
    }

    #[rstest]
    #[case("cloud_cover_percentage", WeatherReadings { cloud_cover_percentage: 101.0, ..WeatherReadings::default() })]
    #[case("humidity", WeatherReadings { humidity: -1.0, ..WeatherReadings::default() })]
    #[case("visibility_km", WeatherReadings { visibility_km: -0.5, ..WeatherReadings::default() })]
    #[case("wind_speed", WeatherReadings { wind_speed_mph: -3.0, ..WeatherReadings::default() })]
    fn readings_reject_out_of_range(#[case] field: &str, #[case] readings: WeatherReadings) {
        let err = readings.validate().expect_err("reading should be rejected");
        match err {
            SnapshotError::OutOfRange { field: found, .. } => assert_eq!(found, field),
            other => panic!("expected OutOfRange, found {other:?}"),
        }
    }

    #[rstest]
    fn readings_reject_nan() {
        let readings = WeatherReadings {
            temperature: f64::NAN,
            ..WeatherReadings::default()
        };
        assert_eq!(
            readings.validate(),
            Err(SnapshotError::NonFinite {
                field: "temperature"
            })
        );
    }

    #[rstest]
    fn astronomy_rejects_inverted_events(events: SolarEvents) {
        let inverted = SolarEvents {
            sunrise: events.sunset,
            sunset: events.sunrise,
        };
        let snapshot = AstronomySnapshot::new(
            SunPosition::default(),
            inverted,
            MoonObservation::default(),
        );
        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::SunriseAfterSunset { .. })
        ));
    }

    #[rstest]
    fn weather_serialises_as_flat_record() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).expect("valid date");
        let readings = WeatherReadings {
            wind_speed_mph: 7.5,
            precipitation_last_24h_mm: 1.2,
            ..WeatherReadings::default()
        };
        let snapshot = WeatherSnapshot::new("Brooklyn, New York", date, readings);
        let value = serde_json::to_value(&snapshot).expect("serialise snapshot");
        assert_eq!(value["wind_speed"], 7.5);
        assert_eq!(value["precipitation_last_24h"], 1.2);
        assert_eq!(value["location"], "Brooklyn, New York");
        assert_eq!(value["date"], "2024-06-21");
    }

    #[rstest]
    fn astronomy_round_trips_through_json(events: SolarEvents) {
        let snapshot = AstronomySnapshot::new(
            SunPosition {
                altitude_deg: -2.5,
                azimuth_deg: 301.0,
            },
            events,
            MoonObservation {
                phase: "Waxing Gibbous".to_owned(),
                illumination_percentage: 81.0,
            },
        );
        let json = serde_json::to_string(&snapshot).expect("serialise snapshot");
        assert!(json.contains("\"sunrise_time\":\"2024-06-21T09:25:00Z\""));
        let decoded: AstronomySnapshot = serde_json::from_str(&json).expect("decode snapshot");
        assert_eq!(decoded, snapshot);
    }
}
