//! Error types for the photo-quality scorer.

use thiserror::Error;

/// Raised when a formula name does not match a known preset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scoring formula '{name}', expected 'classic' or 'haze'")]
pub struct FormulaParseError {
    /// Name supplied by the caller.
    pub name: String,
}
