//! Unit tests covering the quality command.

use std::sync::Arc;
use std::time::Duration;

use super::helpers::{SharedProviderBuilder, Workspace, decode_documents};
use super::*;
use crate::quality::{
    DEFAULT_SNAPSHOTS_DIR, DefaultQualityProviderBuilder, QualityConfig, QualityProviderBuilder,
    config_from_layers_for_test, run_quality_with,
};
use afterglow_core::test_support::StubWeatherProvider;
use afterglow_core::{LocationKey, QualityResult, WeatherProviderError};
use afterglow_service::{DEFAULT_CACHE_TTL, QualityServiceConfig};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};

fn quality_args(location: &str) -> QualityArgs {
    QualityArgs {
        location: Some(location.to_owned()),
        ..QualityArgs::default()
    }
}

#[fixture]
fn sample_builder() -> SharedProviderBuilder<StubWeatherProvider> {
    SharedProviderBuilder {
        provider: Arc::new(StubWeatherProvider::sample()),
    }
}

#[rstest]
fn converting_applies_defaults() {
    let config = QualityConfig::try_from(quality_args("11201")).expect("config should build");
    assert_eq!(config.location, "11201");
    assert_eq!(config.snapshots_dir, Utf8PathBuf::from(DEFAULT_SNAPSHOTS_DIR));
    assert_eq!(config.formula, ScoringFormula::CLASSIC);
    assert_eq!(config.service, QualityServiceConfig::default());
    assert!(!config.no_cache);
    assert_eq!(config.repeat, 1);
}

#[rstest]
fn converting_without_location_errors() {
    let err = QualityConfig::try_from(QualityArgs::default()).expect_err("missing location");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_LOCATION);
            assert_eq!(env, ENV_LOCATION);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn converting_maps_debug_and_ttl_onto_service_config() {
    let args = QualityArgs {
        debug: Some(true),
        cache_ttl_secs: Some(900),
        repeat: Some(0),
        ..quality_args("11201")
    };
    let config = QualityConfig::try_from(args).expect("config should build");
    assert_eq!(config.service.cache_ttl, Duration::from_secs(900));
    assert!(config.service.allow_cache_bypass);
    assert_eq!(config.repeat, 1, "zero repeats are raised to one");
}

#[rstest]
fn repeated_lookups_are_served_from_the_cache(
    sample_builder: SharedProviderBuilder<StubWeatherProvider>,
) {
    let args = QualityArgs {
        repeat: Some(3),
        ..quality_args("11201")
    };
    let mut stdout = Vec::new();

    run_quality_with(args, &sample_builder, &mut stdout).expect("lookup should succeed");

    let results: Vec<QualityResult> = decode_documents(&stdout);
    assert_eq!(results.len(), 3);
    assert_eq!(sample_builder.provider.calls(), 1);
    assert!(results.windows(2).all(|pair| pair.first() == pair.last()));
    let first = results.first().expect("one result");
    assert_eq!(first.location_key().as_str(), "11201");
    assert_eq!(first.expires_at() - first.last_updated(), chrono::TimeDelta::hours(1));
}

#[rstest]
#[case(Some(true), 2)]
#[case(None, 1)]
fn no_cache_requires_debug(
    sample_builder: SharedProviderBuilder<StubWeatherProvider>,
    #[case] debug: Option<bool>,
    #[case] expected_calls: usize,
) {
    let args = QualityArgs {
        debug,
        no_cache: Some(true),
        repeat: Some(2),
        ..quality_args("11201")
    };
    let mut stdout = Vec::new();

    run_quality_with(args, &sample_builder, &mut stdout).expect("lookup should succeed");

    assert_eq!(sample_builder.provider.calls(), expected_calls);
}

#[rstest]
#[case("a/b", 400)]
#[case("   ", 400)]
fn invalid_locations_are_rejected_before_fetching(
    sample_builder: SharedProviderBuilder<StubWeatherProvider>,
    #[case] location: &str,
    #[case] status: u16,
) {
    let mut stdout = Vec::new();

    let err = run_quality_with(quality_args(location), &sample_builder, &mut stdout)
        .expect_err("invalid location should fail");

    match err {
        CliError::Quality { source } => assert_eq!(source.status(), status),
        other => panic!("expected Quality, found {other:?}"),
    }
    assert_eq!(sample_builder.provider.calls(), 0);
    assert!(stdout.is_empty());
}

#[rstest]
fn provider_failures_surface_as_bad_gateway() {
    let key = LocationKey::parse("11201").expect("valid key");
    let builder = SharedProviderBuilder {
        provider: Arc::new(StubWeatherProvider::failing(
            WeatherProviderError::unavailable(&key, "upstream timeout"),
        )),
    };
    let mut stdout = Vec::new();

    let err = run_quality_with(quality_args("11201"), &builder, &mut stdout)
        .expect_err("provider failure should fail");

    match err {
        CliError::Quality { source } => {
            assert_eq!(source.status(), 502);
            assert!(source.to_string().contains("upstream timeout"));
        }
        other => panic!("expected Quality, found {other:?}"),
    }
}

#[rstest]
fn default_builder_reads_snapshots_directory() {
    let workspace = Workspace::new();
    workspace.write_sample_record("11201.json");
    let args = QualityArgs {
        snapshots_dir: Some(workspace.root().to_path_buf()),
        ..quality_args("11201")
    };
    let mut stdout = Vec::new();

    run_quality_with(args, &DefaultQualityProviderBuilder, &mut stdout)
        .expect("lookup should succeed");

    let results: Vec<QualityResult> = decode_documents(&stdout);
    let result = results.first().expect("one result");
    assert_eq!(result.overall_quality(), 100.0);
}

#[rstest]
fn default_builder_reports_missing_directory() {
    let workspace = Workspace::new();
    let missing = workspace.root().join("absent");
    let config = QualityConfig {
        snapshots_dir: missing.clone(),
        ..QualityConfig::try_from(quality_args("11201")).expect("config should build")
    };

    let err = DefaultQualityProviderBuilder
        .build(&config)
        .err()
        .expect("missing directory should fail");
    match err {
        CliError::OpenSnapshotsDir { path, .. } => assert_eq!(path, missing),
        other => panic!("expected OpenSnapshotsDir, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence_and_defaults() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({ "cache_ttl_secs": 60, "formula": "haze", "snapshots_dir": "from-file" }),
        None,
    );
    composer.push_environment(json!({ "cache_ttl_secs": 120, "location": "90210" }));
    composer.push_cli(json!({ "debug": true }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.location, "90210");
    assert_eq!(config.snapshots_dir, Utf8PathBuf::from("from-file"));
    assert_eq!(config.formula, ScoringFormula::HAZE);
    assert_eq!(config.service.cache_ttl, Duration::from_secs(120));
    assert!(config.service.allow_cache_bypass);
    assert_ne!(config.service.cache_ttl, DEFAULT_CACHE_TTL);
}
