// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz
//
// End-to-end runs of compute_flight_record over small OFP texts: a daylight
// domestic leg, an equatorial daylight leg, a missing block time and a leg
// that crosses midnight UTC.

use nightlog_core::airports::AirportTable;
use nightlog_core::config::NightConfig;
use nightlog_core::geo::GeoPoint;
use nightlog_core::logbook::PilotRole;
use nightlog_core::{compute_flight_record, FlightRecordError};

fn airports() -> AirportTable {
    [
        ("CYYZ", GeoPoint::new(43.6777, -79.6248).unwrap()),
        ("CYOW", GeoPoint::new(45.3225, -75.6692).unwrap()),
        ("SEQM", GeoPoint::new(-0.1292, -78.3575).unwrap()),
        ("SKBO", GeoPoint::new(4.7016, -74.1469).unwrap()),
    ]
    .into_iter()
    .collect()
}

const DAYLIGHT_OFP: &str = "\
ACA1234   01JAN24
ACFT C-ABCD
ORIG CYYZ DEST CYOW
CAPTAIN JOHN SMITH
OUT 1400Z
IN 1530Z
BLOCK 1.5
";

#[test]
fn test_daylight_domestic_leg() {
    let record = compute_flight_record(
        DAYLIGHT_OFP,
        PilotRole::PilotFlying,
        &airports(),
        &NightConfig::default(),
    )
    .unwrap();

    assert_eq!(record.facts.block_hours, Some(1.5));
    assert_eq!(record.facts.iso_date().as_deref(), Some("2024-01-01"));

    let values = &record.values;
    assert_eq!(values.route, "CYYZ CYOW");
    assert_eq!(values.iso_date(), "2024-01-01");
    assert_eq!(values.tail_number, "C-ABCD");
    assert_eq!(values.comments.as_deref(), Some("ACA1234 CYYZ-CYOW"));
    assert_eq!(values.total_time, 1.5);
    assert_eq!(values.sic_time, 1.5);
    assert_eq!(values.pic_time, 0.0);
    assert_eq!(values.cross_country_time, 1.5);
    assert_eq!(values.instrument_time, 1.4);
    assert_eq!(values.landings, 1);
    assert_eq!(values.approaches, 1);
    assert_eq!(values.pilot_flying_time, 1.5);
    assert_eq!(values.pilot_monitoring_time, 0.0);

    assert_eq!(record.night.night_minutes, Some(0));
    assert_eq!(values.night_time, 0.0);
    assert_eq!(record.landing.is_night_landing, Some(false));
    assert_eq!(values.full_stop_day_landings, 1);
    assert_eq!(values.full_stop_night_landings, 0);
}

#[test]
fn test_equatorial_daylight_leg() {
    let text = "01JAN24 C-ABCD ORIG SEQM DEST SKBO OUT 1400Z IN 1530Z BLOCK 1.5";
    let config = NightConfig {
        twilight_threshold_deg: -6.0,
        ..NightConfig::default()
    };
    let record =
        compute_flight_record(text, PilotRole::PilotMonitoring, &airports(), &config).unwrap();

    assert_eq!(record.night.night_minutes, Some(0));
    assert_eq!(record.landing.is_night_landing, Some(false));
    assert!(record.landing.sun_altitude_deg.unwrap() > 20.0);
    assert_eq!(record.values.pilot_monitoring_time, 1.5);
    assert_eq!(record.values.pilot_flying_time, 0.0);
}

#[test]
fn test_missing_block_fails_validation() {
    let text = DAYLIGHT_OFP.replace("BLOCK 1.5", "");
    let err = compute_flight_record(
        &text,
        PilotRole::PilotFlying,
        &airports(),
        &NightConfig::default(),
    )
    .unwrap_err();

    match &err {
        FlightRecordError::MissingFields(fields) => assert_eq!(fields, &vec!["block".to_string()]),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.to_string(), "Missing required field(s): block");
}

#[test]
fn test_nothing_extracted_lists_every_required_field() {
    let err = compute_flight_record(
        "no flight plan here",
        PilotRole::PilotFlying,
        &airports(),
        &NightConfig::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        FlightRecordError::MissingFields(
            ["date", "tail", "route", "block"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        )
    );
}

#[test]
fn test_unknown_airport_fails() {
    let text = DAYLIGHT_OFP.replace("CYOW", "KXYZ");
    let err = compute_flight_record(
        &text,
        PilotRole::PilotFlying,
        &airports(),
        &NightConfig::default(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        FlightRecordError::UnknownAirports(vec!["KXYZ".to_string()])
    );
}

#[test]
fn test_midnight_wrap_block_duration() {
    let text = "01JAN24 C-ABCD ORIG CYYZ DEST CYOW OUT 2350Z IN 0010Z BLOCK 0.3";
    let record = compute_flight_record(
        text,
        PilotRole::PilotFlying,
        &airports(),
        &NightConfig::default(),
    )
    .unwrap();

    // 18:50 local in Toronto on New Year's Day: every block minute is night.
    assert_eq!(record.night.night_minutes, Some(20));
    assert_eq!(record.values.night_time, 0.3);
    assert_eq!(record.landing.is_night_landing, Some(true));
    assert!(record.landing.reason.contains("2024-01-02 00:10Z"));
    assert_eq!(record.values.full_stop_night_landings, 1);
    assert_eq!(record.values.full_stop_day_landings, 0);
}

#[test]
fn test_missing_clock_times_degrade() {
    let text = "01JAN24 C-ABCD ORIG CYYZ DEST CYOW BLOCK 1.5";
    let record = compute_flight_record(
        text,
        PilotRole::PilotFlying,
        &airports(),
        &NightConfig::default(),
    )
    .unwrap();
    assert_eq!(record.night.night_minutes, None);
    assert_eq!(record.landing.is_night_landing, None);
    assert_eq!(record.values.night_time, 0.0);
    assert_eq!(record.values.full_stop_day_landings, 0);
    assert_eq!(record.values.full_stop_night_landings, 0);
}

#[test]
fn test_identical_input_gives_identical_output() {
    let run = || {
        compute_flight_record(
            DAYLIGHT_OFP,
            PilotRole::PilotFlying,
            &airports(),
            &NightConfig::default(),
        )
        .unwrap()
    };
    let first = run();
    let second = run();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first.values).unwrap(),
        serde_json::to_string(&second.values).unwrap()
    );
}
