// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod airports;
pub mod config;
pub mod geo;
pub mod logbook;
pub mod night;
pub mod ofp;
pub mod solar;
pub mod submit;

use airports::AirportLookup;
use config::NightConfig;
use logbook::{derive_logbook_values, DerivedLogbookValues, PilotRole};
use night::{classify_landing, compute_night_minutes, LandingClassification, NightComputation};
use ofp::{FlightFact, OfpExtractor};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlightRecordError {
    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("No coordinates for airport(s): {}", .0.join(", "))]
    UnknownAirports(Vec<String>),
}

/// Everything computed for one OFP: the extracted facts, the night/landing
/// diagnostics and the final logbook values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub facts: FlightFact,
    pub night: NightComputation,
    pub landing: LandingClassification,
    pub values: DerivedLogbookValues,
}

/// Turns raw OFP text into logbook values.
///
/// Fails when date, tail, route or block time cannot be extracted, or when
/// either route airport is missing from `airports`. Missing clock times do not
/// fail the record; they leave night time at zero and landings unclassified.
pub fn compute_flight_record(
    raw_text: &str,
    role: PilotRole,
    airports: &dyn AirportLookup,
    config: &NightConfig,
) -> Result<FlightRecord, FlightRecordError> {
    let facts = OfpExtractor::new(&config.carrier_code).extract(raw_text);

    let night = compute_night_minutes(&facts, airports, config.twilight_threshold_deg);
    let landing = classify_landing(&facts, airports, config.twilight_threshold_deg);
    let values = derive_logbook_values(&facts, &night, &landing, role)?;

    let unknown: Vec<String> = [facts.origin.as_deref(), facts.destination.as_deref()]
        .into_iter()
        .flatten()
        .filter(|icao| airports.lookup(icao).is_none())
        .map(str::to_string)
        .collect();
    if !unknown.is_empty() {
        log::warn!("Route airports missing from coordinate table — {}", unknown.join(", "));
        return Err(FlightRecordError::UnknownAirports(unknown));
    }

    log::info!(
        "Flight record computed — date={} route={} block={} night={} night_landing={:?}",
        values.iso_date(),
        values.route,
        values.total_time,
        values.night_time,
        landing.is_night_landing
    );

    Ok(FlightRecord {
        facts,
        night,
        landing,
        values,
    })
}
