//! Quality command implementation for the Afterglow CLI.

use std::io::Write;
use std::time::Duration;

use afterglow_core::WeatherProvider;
use afterglow_data::{FileWeatherProvider, MemoryCacheStore};
use afterglow_scorer::{PhotoQualityScorer, ScoringFormula};
use afterglow_service::{DEFAULT_CACHE_TTL, QualityService, QualityServiceConfig};
use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::score::write_json;
use crate::{
    ARG_CACHE_TTL_SECS, ARG_DEBUG, ARG_FORMULA, ARG_LOCATION, ARG_NO_CACHE, ARG_REPEAT,
    ARG_SNAPSHOTS_DIR, CliError, ENV_LOCATION, parse_formula,
};

/// Directory searched for snapshot records when none is configured.
pub(crate) const DEFAULT_SNAPSHOTS_DIR: &str = "snapshots";

/// CLI arguments for the `quality` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Look up the photo-quality score for a location through the \
                 cache-aside service. Snapshots are read from \
                 `<snapshots-dir>/<location>.json`; results are cached in \
                 memory for the configured TTL, so repeated lookups within \
                 one invocation are served from the cache.",
    about = "Look up the cached quality score for a location"
)]
#[ortho_config(prefix = "AFTERGLOW")]
pub(crate) struct QualityArgs {
    /// Location key: a postal code, `lat,lon` pair, or place name.
    #[arg(value_name = ARG_LOCATION)]
    #[serde(default)]
    pub(crate) location: Option<String>,
    /// Directory holding `<location>.json` snapshot records.
    #[arg(long = ARG_SNAPSHOTS_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) snapshots_dir: Option<Utf8PathBuf>,
    /// Scoring formula preset (`classic` or `haze`).
    #[arg(long = ARG_FORMULA, value_name = "name")]
    #[serde(default)]
    pub(crate) formula: Option<String>,
    /// Lifetime of cached results, in seconds.
    #[arg(long = ARG_CACHE_TTL_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) cache_ttl_secs: Option<u64>,
    /// Enable debug mode, which allows `--no-cache`.
    #[arg(long = ARG_DEBUG, value_name = "bool", num_args = 0..=1, default_missing_value = "true")]
    #[serde(default)]
    pub(crate) debug: Option<bool>,
    /// Skip the cache lookup. Ignored unless debug mode is enabled.
    #[arg(long = ARG_NO_CACHE, value_name = "bool", num_args = 0..=1, default_missing_value = "true")]
    #[serde(default)]
    pub(crate) no_cache: Option<bool>,
    /// Number of consecutive lookups to perform.
    #[arg(long = ARG_REPEAT, value_name = "count")]
    #[serde(default)]
    pub(crate) repeat: Option<u32>,
}

impl QualityArgs {
    pub(crate) fn into_config(self) -> Result<QualityConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        QualityConfig::try_from(merged)
    }
}

/// Resolved `quality` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct QualityConfig {
    pub(crate) location: String,
    pub(crate) snapshots_dir: Utf8PathBuf,
    pub(crate) formula: ScoringFormula,
    pub(crate) service: QualityServiceConfig,
    pub(crate) no_cache: bool,
    pub(crate) repeat: u32,
}

impl TryFrom<QualityArgs> for QualityConfig {
    type Error = CliError;

    fn try_from(args: QualityArgs) -> Result<Self, Self::Error> {
        let location = args.location.ok_or(CliError::MissingArgument {
            field: ARG_LOCATION,
            env: ENV_LOCATION,
        })?;
        let formula = parse_formula(args.formula.as_deref())?;
        let snapshots_dir = args
            .snapshots_dir
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_SNAPSHOTS_DIR));
        let cache_ttl = args
            .cache_ttl_secs
            .map_or(DEFAULT_CACHE_TTL, Duration::from_secs);
        let service = QualityServiceConfig {
            cache_ttl,
            allow_cache_bypass: args.debug.unwrap_or(false),
        };

        Ok(Self {
            location,
            snapshots_dir,
            formula,
            service,
            no_cache: args.no_cache.unwrap_or(false),
            repeat: args.repeat.unwrap_or(1).max(1),
        })
    }
}

/// Builds the weather provider for the current quality invocation.
pub(super) trait QualityProviderBuilder {
    fn build(&self, config: &QualityConfig) -> Result<Box<dyn WeatherProvider>, CliError>;
}

pub(super) struct DefaultQualityProviderBuilder;

impl QualityProviderBuilder for DefaultQualityProviderBuilder {
    fn build(&self, config: &QualityConfig) -> Result<Box<dyn WeatherProvider>, CliError> {
        let provider = FileWeatherProvider::open(&config.snapshots_dir).map_err(|source| {
            CliError::OpenSnapshotsDir {
                path: config.snapshots_dir.clone(),
                source,
            }
        })?;
        Ok(Box::new(provider))
    }
}

pub(super) fn run_quality(args: QualityArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultQualityProviderBuilder;
    run_quality_with(args, &builder, &mut stdout)
}

pub(super) fn run_quality_with(
    args: QualityArgs,
    builder: &dyn QualityProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let provider = builder.build(&config)?;
    let service = QualityService::with_config(
        &*provider,
        MemoryCacheStore::new(),
        PhotoQualityScorer::new(config.formula),
        config.service,
    );
    for _ in 0..config.repeat {
        let result = service.get_quality(&config.location, config.no_cache)?;
        write_json(writer, &result)?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<QualityConfig, CliError> {
    let merged = QualityArgs::merge_from_layers(layers).map_err(CliError::from)?;
    QualityConfig::try_from(merged)
}
