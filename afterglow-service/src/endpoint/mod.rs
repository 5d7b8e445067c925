//! Transport-neutral request handling for the quality lookup.
//!
//! Adapters (an HTTP router, a CLI, a test harness) translate their inputs
//! into a [`QualityRequest`], call [`QualityEndpoint::handle`], and write the
//! returned status and JSON body back out.
//!
//! | Outcome | Status | Body |
//! |---|---|---|
//! | success | `200` | the `QualityResult` record |
//! | invalid location | `400` | `{"error": "..."}` |
//! | provider failure | `502` | `{"error": "..."}` |

use afterglow_core::{CacheStore, Clock, QualityScorer, WeatherProvider};
use serde_json::{Value, json};

use crate::{QualityError, QualityService};

/// Status returned for a successful lookup.
pub const STATUS_OK: u16 = 200;

/// Status returned when the result cannot be encoded.
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Query values that request a cache bypass, compared case-insensitively.
const TRUTHY: [&str; 3] = ["true", "1", "yes"];

/// A single quality lookup as received from a transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualityRequest {
    /// Raw location parameter, unvalidated.
    pub location: Option<String>,
    /// Whether the caller asked to skip the cache.
    pub no_cache: bool,
}

impl QualityRequest {
    /// Build a request from raw query parameters.
    ///
    /// `nocache` counts as set only for `true`, `1` or `yes`, ignoring case
    /// and surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use afterglow_service::endpoint::QualityRequest;
    ///
    /// let request = QualityRequest::from_query(Some("11201"), Some("TRUE"));
    /// assert!(request.no_cache);
    /// assert!(!QualityRequest::from_query(Some("11201"), Some("on")).no_cache);
    /// ```
    #[must_use]
    pub fn from_query(location: Option<&str>, nocache: Option<&str>) -> Self {
        let no_cache = nocache.is_some_and(|value| {
            let trimmed = value.trim();
            TRUTHY
                .iter()
                .any(|truthy| trimmed.eq_ignore_ascii_case(truthy))
        });
        Self {
            location: location.map(str::to_owned),
            no_cache,
        }
    }
}

/// Status code and JSON body produced for a request.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityResponse {
    /// HTTP status code.
    pub status: u16,
    /// JSON body.
    pub body: Value,
}

impl QualityResponse {
    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
        }
    }

    /// Whether the status denotes success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Adapts a [`QualityService`] to request/response pairs.
#[derive(Debug)]
pub struct QualityEndpoint<P, C, S, K>
where
    P: WeatherProvider,
    C: CacheStore,
    S: QualityScorer,
    K: Clock,
{
    service: QualityService<P, C, S, K>,
}

impl<P, C, S, K> QualityEndpoint<P, C, S, K>
where
    P: WeatherProvider,
    C: CacheStore,
    S: QualityScorer,
    K: Clock,
{
    /// Wrap `service`.
    #[must_use]
    pub const fn new(service: QualityService<P, C, S, K>) -> Self {
        Self { service }
    }

    /// Borrow the wrapped service.
    #[must_use]
    pub const fn service(&self) -> &QualityService<P, C, S, K> {
        &self.service
    }

    /// Run the lookup described by `request` and map the outcome.
    #[must_use]
    pub fn handle(&self, request: &QualityRequest) -> QualityResponse {
        let location = request.location.as_deref().unwrap_or_default();
        match self.service.get_quality(location, request.no_cache) {
            Ok(result) => match serde_json::to_value(&result) {
                Ok(body) => QualityResponse {
                    status: STATUS_OK,
                    body,
                },
                Err(err) => {
                    log::warn!("failed to encode result for {location}: {err}");
                    QualityResponse::error(STATUS_INTERNAL_ERROR, "failed to encode result")
                }
            },
            Err(err) => error_response(&err),
        }
    }
}

fn error_response(err: &QualityError) -> QualityResponse {
    QualityResponse::error(err.status(), &err.to_string())
}
