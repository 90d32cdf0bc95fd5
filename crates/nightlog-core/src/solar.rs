// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Low-precision solar position (NOAA spreadsheet algorithm).
//!
//! Good to roughly 0.01° for dates near J2000, which is far finer than the
//! one-minute sampling the night calculation uses.

use crate::geo::GeoPoint;
use chrono::{DateTime, Timelike, Utc};

const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const J2000_JD: f64 = 2_451_545.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const MINUTES_PER_DAY: f64 = 1_440.0;

fn julian_day(instant: DateTime<Utc>) -> f64 {
    let seconds = instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_nanos()) * 1e-9;
    seconds / SECONDS_PER_DAY + UNIX_EPOCH_JD
}

fn julian_century(jd: f64) -> f64 {
    (jd - J2000_JD) / 36_525.0
}

fn geom_mean_longitude(t: f64) -> f64 {
    (280.46646 + t * (36000.76983 + t * 0.0003032)).rem_euclid(360.0)
}

fn geom_mean_anomaly(t: f64) -> f64 {
    357.52911 + t * (35999.05029 - 0.0001537 * t)
}

fn orbit_eccentricity(t: f64) -> f64 {
    0.016708634 - t * (0.000042037 + 0.0000001267 * t)
}

fn equation_of_center(t: f64) -> f64 {
    let m = geom_mean_anomaly(t).to_radians();
    m.sin() * (1.914602 - t * (0.004817 + 0.000014 * t))
        + (2.0 * m).sin() * (0.019993 - 0.000101 * t)
        + (3.0 * m).sin() * 0.000289
}

fn apparent_longitude(t: f64) -> f64 {
    let true_longitude = geom_mean_longitude(t) + equation_of_center(t);
    let omega = (125.04 - 1934.136 * t).to_radians();
    true_longitude - 0.00569 - 0.00478 * omega.sin()
}

fn mean_obliquity(t: f64) -> f64 {
    23.0 + (26.0 + (21.448 - t * (46.815 + t * (0.00059 - t * 0.001813))) / 60.0) / 60.0
}

fn corrected_obliquity(t: f64) -> f64 {
    let omega = (125.04 - 1934.136 * t).to_radians();
    mean_obliquity(t) + 0.00256 * omega.cos()
}

/// Solar declination in degrees.
pub fn declination(t: f64) -> f64 {
    let obliquity = corrected_obliquity(t).to_radians();
    let lambda = apparent_longitude(t).to_radians();
    (obliquity.sin() * lambda.sin()).asin().to_degrees()
}

/// Equation of time in minutes.
pub fn equation_of_time(t: f64) -> f64 {
    let y = (corrected_obliquity(t).to_radians() / 2.0).tan().powi(2);
    let l0 = geom_mean_longitude(t).to_radians();
    let e = orbit_eccentricity(t);
    let m = geom_mean_anomaly(t).to_radians();

    let eq = y * (2.0 * l0).sin() - 2.0 * e * m.sin() + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin();

    4.0 * eq.to_degrees()
}

/// Altitude of the sun's centre above the geometric horizon, in degrees.
///
/// Negative values are below the horizon. No refraction correction is applied.
pub fn solar_altitude(instant: DateTime<Utc>, position: GeoPoint) -> f64 {
    let t = julian_century(julian_day(instant));
    let decl = declination(t).to_radians();
    let eot = equation_of_time(t);

    let minutes_of_day = f64::from(instant.hour()) * 60.0
        + f64::from(instant.minute())
        + f64::from(instant.second()) / 60.0;
    let true_solar_time = (minutes_of_day + eot + 4.0 * position.lon).rem_euclid(MINUTES_PER_DAY);

    let hour_angle = if true_solar_time / 4.0 < 0.0 {
        true_solar_time / 4.0 + 180.0
    } else {
        true_solar_time / 4.0 - 180.0
    };

    let lat = position.lat.to_radians();
    let cos_zenith =
        lat.sin() * decl.sin() + lat.cos() * decl.cos() * hour_angle.to_radians().cos();
    let zenith = cos_zenith.clamp(-1.0, 1.0).acos().to_degrees();

    90.0 - zenith
}
