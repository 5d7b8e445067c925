//! Command-line interface for the Afterglow photo-quality engine.
//!
//! Two subcommands are exposed:
//!
//! - `score` runs the scoring engine over a recorded snapshot file.
//! - `quality` runs the cache-aside service against a directory of recorded
//!   snapshots, backed by an in-process cache.
//!
//! Options are layered with `ortho_config`: CLI flags override `AFTERGLOW_*`
//! environment variables, which override configuration files.
#![forbid(unsafe_code)]

use afterglow_scorer::{FormulaParseError, ScoringFormula};
use clap::{Parser, Subcommand};

mod error;
mod quality;
mod score;

pub use error::CliError;
use quality::{QualityArgs, run_quality};
use score::{ScoreArgs, run_score};

const ARG_SNAPSHOT: &str = "snapshot";
const ARG_FORMULA: &str = "formula";
const ARG_LOCATION: &str = "location";
const ARG_SNAPSHOTS_DIR: &str = "snapshots-dir";
const ARG_CACHE_TTL_SECS: &str = "cache-ttl-secs";
const ARG_DEBUG: &str = "debug";
const ARG_NO_CACHE: &str = "no-cache";
const ARG_REPEAT: &str = "repeat";
const ENV_SNAPSHOT: &str = "AFTERGLOW_CMDS_SCORE_SNAPSHOT";
const ENV_LOCATION: &str = "AFTERGLOW_CMDS_QUALITY_LOCATION";

/// Run the Afterglow CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, when
/// snapshot data cannot be read, or when writing output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Score(args) => run_score(args),
        Command::Quality(args) => run_quality(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "afterglow",
    about = "Sunrise and sunset photo-quality scoring",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a recorded weather and astronomy snapshot.
    Score(ScoreArgs),
    /// Look up the cached quality score for a location.
    Quality(QualityArgs),
}

/// Resolve an optional formula name, defaulting to the classic preset.
fn parse_formula(name: Option<&str>) -> Result<ScoringFormula, FormulaParseError> {
    name.map(str::parse).transpose().map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests;
