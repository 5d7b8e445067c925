//! Behaviour tests for the photo-quality scorer.

use std::cell::{Cell, RefCell};

use afterglow_core::test_support::{astronomy_at_altitude, sample_date};
use afterglow_core::{QualityScorer, ScoreBreakdown, WeatherReadings, WeatherSnapshot};
use afterglow_scorer::{PhotoQualityScorer, ScoringFormula};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Default)]
struct ScoringWorld {
    readings: Cell<WeatherReadings>,
    altitude: Cell<f64>,
    breakdown: RefCell<Option<ScoreBreakdown>>,
}

impl ScoringWorld {
    fn breakdown(&self) -> ScoreBreakdown {
        self.breakdown
            .borrow()
            .expect("conditions should have been scored")
    }
}

#[fixture]
fn world() -> ScoringWorld {
    ScoringWorld::default()
}

#[given(
    "weather with cloud {cloud}, humidity {humidity}, visibility {visibility}, AQI {aqi}, rain {rain} and wind {wind}"
)]
fn given_weather(
    world: &ScoringWorld,
    cloud: f64,
    humidity: f64,
    visibility: f64,
    aqi: f64,
    rain: f64,
    wind: f64,
) {
    world.readings.set(WeatherReadings {
        cloud_cover_percentage: cloud,
        humidity,
        visibility_km: visibility,
        air_quality_index: aqi,
        precipitation_last_24h_mm: rain,
        wind_speed_mph: wind,
        temperature: 65.0,
    });
}

#[given("the sun at altitude {altitude}")]
fn given_sun(world: &ScoringWorld, altitude: f64) {
    world.altitude.set(altitude);
}

#[when("I score the conditions with the {formula} formula")]
fn when_scored(world: &ScoringWorld, formula: String) {
    let formula: ScoringFormula = formula.parse().expect("known formula preset");
    let weather = WeatherSnapshot::new("Behaviour", sample_date(), world.readings.get());
    let astronomy = astronomy_at_altitude(world.altitude.get());
    let breakdown = PhotoQualityScorer::new(formula).score(&weather, &astronomy);
    world.breakdown.replace(Some(breakdown));
}

#[then("the overall score is {expected}")]
fn then_overall(world: &ScoringWorld, expected: f64) {
    let overall = world.breakdown().overall;
    assert!(
        (overall - expected).abs() < 1e-9,
        "expected {expected}, found {overall}"
    );
}

#[then("the interpretation is {label}")]
fn then_interpretation(world: &ScoringWorld, label: String) {
    assert_eq!(
        world.breakdown().interpretation.label(),
        label.trim_matches('"')
    );
}

#[then("{count} factors are reported")]
fn then_factor_count(world: &ScoringWorld, count: usize) {
    assert_eq!(world.breakdown().factors.len(), count);
}

#[scenario(path = "tests/features/photo_quality.feature", index = 0)]
fn balanced_evening(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/photo_quality.feature", index = 1)]
fn clear_dry_afternoon(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/photo_quality.feature", index = 2)]
fn haze_formula(world: ScoringWorld) {
    let _ = world;
}
