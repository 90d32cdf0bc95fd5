// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz
//
// Regression surface for the sampling loop and the great-circle path it walks:
// endpoint/degenerate interpolation, threshold monotonicity, bounds on the
// night count and landing-date rollover.

use chrono::{NaiveDate, TimeZone, Utc};
use nightlog_core::geo::{interpolate_great_circle, GeoPoint};
use nightlog_core::night::{
    block_duration_minutes, count_night_minutes, landing_instant, night_hours_from_minutes,
};
use nightlog_core::ofp::ClockTime;

const TOL: f64 = 1e-6;

fn sample_pairs() -> Vec<(GeoPoint, GeoPoint)> {
    let p = |lat, lon| GeoPoint::new(lat, lon).unwrap();
    vec![
        (p(43.6777, -79.6248), p(45.3225, -75.6692)),
        (p(49.1947, -123.1792), p(51.4700, -0.4543)),
        (p(-33.9461, 151.1772), p(-37.6733, 144.8433)),
        (p(0.0, 0.0), p(10.0, 10.0)),
        (p(64.1300, -21.9406), p(21.3187, -157.9225)),
    ]
}

#[test]
fn test_interpolation_hits_both_endpoints() {
    for (a, b) in sample_pairs() {
        let start = interpolate_great_circle(a, b, 0.0);
        let end = interpolate_great_circle(a, b, 1.0);
        assert!((start.lat - a.lat).abs() < TOL && (start.lon - a.lon).abs() < TOL);
        assert!((end.lat - b.lat).abs() < TOL && (end.lon - b.lon).abs() < TOL);
    }
}

#[test]
fn test_interpolation_of_identical_points_is_identity() {
    for (a, _) in sample_pairs() {
        for f in [0.0, 0.1, 0.5, 0.9, 1.0] {
            assert_eq!(interpolate_great_circle(a, a, f), a);
        }
    }
}

#[test]
fn test_interpolated_points_stay_in_range() {
    for (a, b) in sample_pairs() {
        for i in 0..=20 {
            let p = interpolate_great_circle(a, b, f64::from(i) / 20.0);
            assert!(GeoPoint::new(p.lat, p.lon).is_ok(), "{:?}", p);
        }
    }
}

#[test]
fn test_night_minutes_monotonic_in_threshold() {
    // CYYZ -> CYVR departing into dusk: the count moves with the threshold.
    let from = GeoPoint::new(43.6777, -79.6248).unwrap();
    let to = GeoPoint::new(49.1947, -123.1792).unwrap();
    let start = Utc.with_ymd_and_hms(2024, 3, 10, 22, 0, 0).unwrap();
    let duration = 300;

    let thresholds = [-18.0, -12.0, -6.0, -0.833, 0.0, 6.0];
    let counts: Vec<u32> = thresholds
        .iter()
        .map(|&t| count_night_minutes(start, duration, from, to, t))
        .collect();

    for pair in counts.windows(2) {
        assert!(pair[0] <= pair[1], "counts not monotonic: {:?}", counts);
    }
    assert!(counts.iter().all(|&c| c <= duration));
    assert!(counts[0] < counts[counts.len() - 1], "{:?}", counts);
}

#[test]
fn test_night_hours_match_rounded_fraction() {
    for minutes in 0..=1440u32 {
        let hours = night_hours_from_minutes(minutes);
        let tenths = (f64::from(minutes) / 6.0 + 0.5).floor();
        assert_eq!(hours, tenths / 10.0, "minutes={}", minutes);
    }
}

#[test]
fn test_block_duration_never_exceeds_a_day() {
    for out in [0u8, 7, 12, 23] {
        for inn in [0u8, 1, 12, 23] {
            let d = block_duration_minutes(ClockTime::new(out, 30), ClockTime::new(inn, 15));
            assert!(d < 1440);
        }
    }
    assert_eq!(
        block_duration_minutes(ClockTime::new(23, 50), ClockTime::new(0, 10)),
        20
    );
}

#[test]
fn test_landing_rolls_into_next_day_and_year() {
    let new_years_eve = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
    let instant = landing_instant(
        new_years_eve,
        ClockTime::new(0, 10),
        Some(ClockTime::new(23, 50)),
    )
    .unwrap();
    assert_eq!(instant, Utc.with_ymd_and_hms(2024, 1, 1, 0, 10, 0).unwrap());
}

#[test]
fn test_landing_after_out_stays_on_same_day() {
    let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let instant =
        landing_instant(date, ClockTime::new(15, 20), Some(ClockTime::new(14, 0))).unwrap();
    assert_eq!(instant, Utc.with_ymd_and_hms(2024, 2, 29, 15, 20, 0).unwrap());
}
