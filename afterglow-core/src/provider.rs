//! Supply weather and astronomy snapshots for a location.
//!
//! The [`WeatherProvider`] trait is the collaborator seam the quality service
//! calls on a cache miss. Implementations may reach out to remote APIs or
//! read recorded snapshots from disk; the service treats every failure as
//! terminal for the request and never retries.

use thiserror::Error;

use crate::{AstronomySnapshot, LocationKey, WeatherSnapshot};

/// Weather and astronomy observations fetched together.
pub type SnapshotPair = (WeatherSnapshot, AstronomySnapshot);

/// Errors raised by [`WeatherProvider::fetch_snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherProviderError {
    /// The upstream source could not be reached or has no data.
    #[error("weather data unavailable for {location}: {message}")]
    Unavailable {
        /// Location the request was made for.
        location: String,
        /// Description of the failure.
        message: String,
    },
    /// The upstream source responded with data that could not be parsed or
    /// failed validation.
    #[error("malformed weather data for {location}: {message}")]
    Malformed {
        /// Location the request was made for.
        location: String,
        /// Description of the failure.
        message: String,
    },
}

impl WeatherProviderError {
    /// Build an [`WeatherProviderError::Unavailable`] for `location`.
    #[must_use]
    pub fn unavailable(location: &LocationKey, message: impl Into<String>) -> Self {
        Self::Unavailable {
            location: location.as_str().to_owned(),
            message: message.into(),
        }
    }

    /// Build a [`WeatherProviderError::Malformed`] for `location`.
    #[must_use]
    pub fn malformed(location: &LocationKey, message: impl Into<String>) -> Self {
        Self::Malformed {
            location: location.as_str().to_owned(),
            message: message.into(),
        }
    }
}

/// Fetch point-in-time snapshots for a location.
///
/// Implementations must be thread-safe so a single provider can be shared
/// by every request handled by the service.
///
/// # Examples
///
/// ```rust
/// use afterglow_core::{
///     LocationKey, SnapshotPair, WeatherProvider, WeatherProviderError,
/// };
///
/// struct Offline;
///
/// impl WeatherProvider for Offline {
///     fn fetch_snapshot(
///         &self,
///         location: &LocationKey,
///     ) -> Result<SnapshotPair, WeatherProviderError> {
///         Err(WeatherProviderError::unavailable(location, "offline"))
///     }
/// }
///
/// let key = LocationKey::parse("11201").expect("valid key");
/// assert!(Offline.fetch_snapshot(&key).is_err());
/// ```
pub trait WeatherProvider: Send + Sync {
    /// Return the current weather and astronomy snapshots for `location`.
    ///
    /// # Errors
    /// Returns [`WeatherProviderError`] when no usable snapshot can be
    /// produced.
    fn fetch_snapshot(&self, location: &LocationKey) -> Result<SnapshotPair, WeatherProviderError>;
}

impl<T: WeatherProvider + ?Sized> WeatherProvider for &T {
    fn fetch_snapshot(&self, location: &LocationKey) -> Result<SnapshotPair, WeatherProviderError> {
        (**self).fetch_snapshot(location)
    }
}

impl<T: WeatherProvider + ?Sized> WeatherProvider for std::sync::Arc<T> {
    fn fetch_snapshot(&self, location: &LocationKey) -> Result<SnapshotPair, WeatherProviderError> {
        (**self).fetch_snapshot(location)
    }
}
