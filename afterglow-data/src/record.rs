//! On-disk snapshot record: one weather and one astronomy snapshot.
//!
//! ```json
//! {
//!   "weather": { "cloud_cover_percentage": 45.0, "humidity": 60.0, ... },
//!   "astronomy": { "sun_altitude": -2.0, "sunrise_time": "...", ... }
//! }
//! ```

use afterglow_core::{AstronomySnapshot, SnapshotError, SnapshotPair, WeatherSnapshot};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while decoding a [`SnapshotRecord`].
#[derive(Debug, Error)]
pub enum SnapshotRecordError {
    /// The payload was not a valid record.
    #[error("failed to parse snapshot record: {0}")]
    Parse(#[source] serde_json::Error),
    /// The record decoded but a reading was outside its domain.
    #[error("snapshot record failed validation: {0}")]
    Invalid(#[source] SnapshotError),
}

/// Weather and astronomy snapshots persisted together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    /// Weather observations.
    pub weather: WeatherSnapshot,
    /// Astronomical observations.
    pub astronomy: AstronomySnapshot,
}

impl SnapshotRecord {
    /// Decode and validate a record from JSON text.
    ///
    /// # Errors
    /// Returns [`SnapshotRecordError::Parse`] for malformed JSON and
    /// [`SnapshotRecordError::Invalid`] when a reading fails validation.
    pub fn from_json(text: &str) -> Result<Self, SnapshotRecordError> {
        let record: Self = serde_json::from_str(text).map_err(SnapshotRecordError::Parse)?;
        record.validate().map_err(SnapshotRecordError::Invalid)?;
        Ok(record)
    }

    /// Check both snapshots against their documented domains.
    ///
    /// # Errors
    /// Returns the first [`SnapshotError`] found.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.weather.readings().validate()?;
        self.astronomy.validate()
    }

    /// Split the record into the pair handed to the scorer.
    #[must_use]
    pub fn into_pair(self) -> SnapshotPair {
        (self.weather, self.astronomy)
    }
}
