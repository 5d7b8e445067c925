//! Unit tests covering the score command.

use super::helpers::{Workspace, decode_documents};
use super::*;
use crate::score::{ScoreConfig, ScoreReport, config_from_layers_for_test, run_score_with};
use afterglow_core::Interpretation;
use camino::Utf8PathBuf;
use rstest::rstest;

fn score_args(snapshot: Option<Utf8PathBuf>, formula: Option<&str>) -> ScoreArgs {
    ScoreArgs {
        snapshot,
        formula: formula.map(str::to_owned),
    }
}

#[rstest]
fn converting_without_snapshot_errors() {
    let err = ScoreConfig::try_from(score_args(None, None)).expect_err("missing snapshot");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_SNAPSHOT);
            assert_eq!(env, ENV_SNAPSHOT);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case(None, ScoringFormula::CLASSIC)]
#[case(Some("haze"), ScoringFormula::HAZE)]
#[case(Some(" Classic "), ScoringFormula::CLASSIC)]
fn converting_resolves_formula(#[case] name: Option<&str>, #[case] expected: ScoringFormula) {
    let args = score_args(Some(Utf8PathBuf::from("snapshot.json")), name);
    let config = ScoreConfig::try_from(args).expect("config should build");
    assert_eq!(config.formula, expected);
}

#[rstest]
fn converting_rejects_unknown_formula() {
    let args = score_args(Some(Utf8PathBuf::from("snapshot.json")), Some("golden"));
    let err = ScoreConfig::try_from(args).expect_err("unknown formula");
    match err {
        CliError::InvalidFormula(source) => assert_eq!(source.name, "golden"),
        other => panic!("expected InvalidFormula, found {other:?}"),
    }
}

#[rstest]
fn scoring_a_recorded_snapshot_prints_a_report() {
    let workspace = Workspace::new();
    let path = workspace.write_sample_record("brooklyn.json");
    let mut stdout = Vec::new();

    run_score_with(score_args(Some(path), None), &mut stdout).expect("score should succeed");

    let reports: Vec<ScoreReport> = decode_documents(&stdout);
    let [report] = reports.as_slice() else {
        panic!("expected exactly one report, found {reports:?}");
    };
    assert_eq!(report.formula, "classic");
    assert_eq!(report.overall_quality, 100.0);
    assert_eq!(report.interpretation, Interpretation::Exceptional);
    assert_eq!(report.description, Interpretation::Exceptional.description());
    assert_eq!(report.factors.len(), 7);
}

#[rstest]
fn haze_formula_omits_sun_angle() {
    let workspace = Workspace::new();
    let path = workspace.write_sample_record("brooklyn.json");
    let mut stdout = Vec::new();

    run_score_with(score_args(Some(path), Some("haze")), &mut stdout)
        .expect("score should succeed");

    let reports: Vec<ScoreReport> = decode_documents(&stdout);
    let report = reports.first().expect("one report");
    assert_eq!(report.formula, "haze");
    assert_eq!(report.factors.sun_angle, None);
}

#[rstest]
fn missing_snapshot_file_is_reported() {
    let workspace = Workspace::new();
    let path = workspace.root().join("absent.json");
    let mut stdout = Vec::new();

    let err = run_score_with(score_args(Some(path.clone()), None), &mut stdout)
        .expect_err("missing file should fail");
    match err {
        CliError::ReadSnapshot { path: found, .. } => assert_eq!(found, path),
        other => panic!("expected ReadSnapshot, found {other:?}"),
    }
    assert!(stdout.is_empty());
}

#[rstest]
#[case(b"{ not valid json".as_slice())]
#[case(br#"{"weather": {}, "astronomy": {}}"#.as_slice())]
fn undecodable_snapshot_is_reported(#[case] contents: &[u8]) {
    let workspace = Workspace::new();
    let path = workspace.write("broken.json", contents);
    let mut stdout = Vec::new();

    let err = run_score_with(score_args(Some(path), None), &mut stdout)
        .expect_err("broken record should fail");
    match err {
        CliError::InvalidSnapshot { .. } => {}
        other => panic!("expected InvalidSnapshot, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "snapshot": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_prefers_cli_over_file() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({ "snapshot": "from-file.json", "formula": "haze" }),
        None,
    );
    composer.push_cli(json!({ "snapshot": "from-cli.json" }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.snapshot, Utf8PathBuf::from("from-cli.json"));
    assert_eq!(config.formula, ScoringFormula::HAZE);
}
