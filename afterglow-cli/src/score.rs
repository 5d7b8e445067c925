//! Score command implementation for the Afterglow CLI.

use std::io::{Read, Write};

use afterglow_core::{FactorScores, Interpretation, QualityScorer};
use afterglow_data::SnapshotRecord;
use afterglow_scorer::{PhotoQualityScorer, ScoringFormula};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{ARG_FORMULA, ARG_SNAPSHOT, CliError, ENV_SNAPSHOT, parse_formula};

/// CLI arguments for the `score` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Run the scoring engine over a recorded snapshot. The file \
                 holds a JSON object with `weather` and `astronomy` members \
                 in the same layout the snapshots directory uses.",
    about = "Score a recorded weather and astronomy snapshot"
)]
#[ortho_config(prefix = "AFTERGLOW")]
pub(crate) struct ScoreArgs {
    /// Path to a JSON snapshot record.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) snapshot: Option<Utf8PathBuf>,
    /// Scoring formula preset (`classic` or `haze`).
    #[arg(long = ARG_FORMULA, value_name = "name")]
    #[serde(default)]
    pub(crate) formula: Option<String>,
}

impl ScoreArgs {
    pub(crate) fn into_config(self) -> Result<ScoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScoreConfig::try_from(merged)
    }
}

/// Resolved `score` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScoreConfig {
    pub(crate) snapshot: Utf8PathBuf,
    pub(crate) formula: ScoringFormula,
}

impl TryFrom<ScoreArgs> for ScoreConfig {
    type Error = CliError;

    fn try_from(args: ScoreArgs) -> Result<Self, Self::Error> {
        let snapshot = args.snapshot.ok_or(CliError::MissingArgument {
            field: ARG_SNAPSHOT,
            env: ENV_SNAPSHOT,
        })?;
        let formula = parse_formula(args.formula.as_deref())?;
        Ok(Self { snapshot, formula })
    }
}

/// Engine output for a single snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ScoreReport {
    pub(crate) formula: String,
    pub(crate) overall_quality: f64,
    pub(crate) factors: FactorScores,
    pub(crate) interpretation: Interpretation,
    pub(crate) description: String,
}

pub(super) fn run_score(args: ScoreArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_score_with(args, &mut stdout)
}

pub(super) fn run_score_with(args: ScoreArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_score(&config)?;
    write_json(writer, &report)
}

fn execute_score(config: &ScoreConfig) -> Result<ScoreReport, CliError> {
    let (weather, astronomy) = load_snapshot(&config.snapshot)?.into_pair();
    let breakdown = PhotoQualityScorer::new(config.formula).score(&weather, &astronomy);
    Ok(ScoreReport {
        formula: config.formula.to_string(),
        overall_quality: breakdown.overall,
        factors: breakdown.factors,
        interpretation: breakdown.interpretation,
        description: breakdown.interpretation.description().to_owned(),
    })
}

/// Loads and validates a JSON-encoded [`SnapshotRecord`] from disk.
pub(super) fn load_snapshot(path: &Utf8Path) -> Result<SnapshotRecord, CliError> {
    let read_error = |source| CliError::ReadSnapshot {
        path: path.to_path_buf(),
        source,
    };
    let mut file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(read_error)?;
    let mut text = String::new();
    file.read_to_string(&mut text).map_err(read_error)?;
    SnapshotRecord::from_json(&text).map_err(|source| CliError::InvalidSnapshot {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `value` as pretty-printed JSON followed by a newline.
pub(super) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ScoreConfig, CliError> {
    let merged = ScoreArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ScoreConfig::try_from(merged)
}
