//! Cache-aside orchestration for photo-quality lookups.
//!
//! [`QualityService`] answers "how good will tonight's sunset be at this
//! location?" by consulting a [`CacheStore`](afterglow_core::CacheStore)
//! first and, on a miss, fetching fresh snapshots from a
//! [`WeatherProvider`](afterglow_core::WeatherProvider), scoring them with a
//! [`QualityScorer`](afterglow_core::QualityScorer), and publishing the
//! result back to the cache on a best-effort basis.
//!
//! The cache is an optimisation only. Read failures and undecodable entries
//! degrade to a miss and write failures are logged and swallowed, so the
//! only errors callers observe are invalid input and provider failures.
//!
//! The [`endpoint`] module maps requests and outcomes onto an HTTP-shaped
//! status and JSON body for transport adapters.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod endpoint;
mod error;
mod service;

pub use error::QualityError;
pub use service::{DEFAULT_CACHE_TTL, QualityService, QualityServiceConfig};
