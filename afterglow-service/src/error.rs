//! Errors surfaced by the quality service.

use afterglow_core::{LocationKeyError, WeatherProviderError};
use thiserror::Error;

/// Errors returned by [`QualityService::get_quality`](crate::QualityService::get_quality).
///
/// Cache failures never appear here; they are recovered inside the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QualityError {
    /// The location key was missing or malformed. No collaborator was
    /// contacted.
    #[error("invalid location: {0}")]
    InvalidInput(#[from] LocationKeyError),
    /// The weather provider failed. Nothing was written to the cache.
    #[error("failed to fetch conditions: {0}")]
    CollaboratorFailure(#[from] WeatherProviderError),
}

impl QualityError {
    /// HTTP status code describing the failure's severity.
    ///
    /// Invalid input is the caller's fault (`400`); provider failures are an
    /// upstream fault (`502`).
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::CollaboratorFailure(_) => 502,
        }
    }
}
