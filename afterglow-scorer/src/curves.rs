//! Per-factor contribution curves.
//!
//! Each curve is a pure function of one reading. Curves do not validate
//! their inputs; out-of-domain readings flow through the arithmetic and are
//! bounded by the final clamp.
#![expect(
    clippy::float_arithmetic,
    reason = "factor curves are piecewise arithmetic over sensor readings"
)]

use crate::AirQualityCurve;

/// Air-quality index assumed when the provider reports `0` (unknown).
pub(crate) const DEFAULT_AIR_QUALITY_INDEX: f64 = 50.0;

/// Up to 25 points, peaking at 50 % cover.
pub(crate) fn cloud(cover: f64) -> f64 {
    if (30.0..=70.0).contains(&cover) {
        25.0 - 0.02 * (cover - 50.0).powi(2)
    } else if cover < 30.0 {
        cover * 0.6
    } else {
        (25.0 - (cover - 70.0) * 0.8).max(0.0)
    }
}

/// Up to 15 points, flat across 40-70 %.
pub(crate) fn humidity(humidity: f64) -> f64 {
    if (40.0..=70.0).contains(&humidity) {
        15.0
    } else if humidity < 40.0 {
        humidity * 0.3
    } else {
        (15.0 - (humidity - 70.0) * 0.3).max(0.0)
    }
}

/// Up to 15 points, saturating at 10 km.
pub(crate) fn visibility(visibility_km: f64) -> f64 {
    (visibility_km * 1.5).min(15.0)
}

/// Up to 10 points according to `curve`.
pub(crate) fn air_quality(index: f64, curve: AirQualityCurve) -> f64 {
    let aqi = if index == 0.0 {
        DEFAULT_AIR_QUALITY_INDEX
    } else {
        index
    };
    match curve {
        AirQualityCurve::LowerIsBetter => (10.0 - aqi / 10.0).max(0.0),
        AirQualityCurve::ModerateHazeEnhances => {
            if (50.0..=100.0).contains(&aqi) {
                10.0
            } else if aqi < 50.0 {
                aqi * 0.2
            } else {
                (10.0 - (aqi - 100.0) * 0.1).max(0.0)
            }
        }
    }
}

/// Up to 15 points, best within six degrees of the horizon.
pub(crate) fn sun_angle(altitude_deg: f64) -> f64 {
    if (-6.0..=6.0).contains(&altitude_deg) {
        15.0 - altitude_deg.abs() * 2.0
    } else {
        (3.0 - (altitude_deg - 6.0).abs() * 0.5).max(0.0)
    }
}

/// Up to 5 points for light rain that has cleared the air.
pub(crate) fn recent_rain(rain_mm: f64) -> f64 {
    if rain_mm > 0.0 && rain_mm < 5.0 {
        5.0
    } else if rain_mm >= 5.0 {
        (5.0 - (rain_mm - 5.0) * 0.5).max(0.0)
    } else {
        0.0
    }
}

/// Up to 5 points, flat across 5-15 mph.
pub(crate) fn wind(speed_mph: f64) -> f64 {
    if (5.0..=15.0).contains(&speed_mph) {
        5.0
    } else if speed_mph < 5.0 {
        speed_mph * 0.8
    } else {
        (5.0 - (speed_mph - 15.0) * 0.3).max(0.0)
    }
}
