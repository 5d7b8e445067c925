//! Adapters for the Afterglow collaborator seams.
//!
//! Responsibilities:
//! - Provide a process-local [`CacheStore`](afterglow_core::CacheStore) with
//!   per-key expiry.
//! - Provide a [`WeatherProvider`](afterglow_core::WeatherProvider) that
//!   replays recorded snapshots from a directory.
//! - Own the on-disk snapshot record format.
//!
//! Boundaries:
//! - Do not encode scoring rules (live in `afterglow-scorer`).
//! - Do not decide cache policy (lives in `afterglow-service`).
//!
//! Invariants:
//! - Every adapter is `Send + Sync` and holds no global state.
//! - File access is confined to the directory handle the adapter was opened
//!   with.

#![forbid(unsafe_code)]

mod file_provider;
mod memory_cache;
mod record;

pub use file_provider::FileWeatherProvider;
pub use memory_cache::MemoryCacheStore;
pub use record::{SnapshotRecord, SnapshotRecordError};
