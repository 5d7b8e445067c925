//! Error types emitted by the Afterglow CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use afterglow_data::SnapshotRecordError;
use afterglow_scorer::FormulaParseError;
use afterglow_service::QualityError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors emitted by the Afterglow CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The configured formula name is not a known preset.
    #[error(transparent)]
    InvalidFormula(#[from] FormulaParseError),
    /// Opening or reading a snapshot file failed.
    #[error("failed to read snapshot at {path:?}: {source}")]
    ReadSnapshot {
        /// Path of the snapshot file.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A snapshot file was undecodable or failed validation.
    #[error("invalid snapshot at {path:?}: {source}")]
    InvalidSnapshot {
        /// Path of the snapshot file.
        path: Utf8PathBuf,
        /// Decoding or validation failure.
        #[source]
        source: SnapshotRecordError,
    },
    /// The snapshots directory could not be opened.
    #[error("failed to open snapshots directory {path:?}: {source}")]
    OpenSnapshotsDir {
        /// Directory that was requested.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The quality service rejected the request.
    #[error("quality lookup failed (status {}): {source}", .source.status())]
    Quality {
        /// Failure reported by the service.
        #[from]
        source: QualityError,
    },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
