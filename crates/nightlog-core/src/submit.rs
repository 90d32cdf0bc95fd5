// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::airports::AirportLookup;
use crate::config::NightConfig;
use crate::logbook::{DerivedLogbookValues, PilotRole};
use crate::{compute_flight_record, FlightRecord};
use anyhow::Result;

/// An already-authenticated handle on the external logbook service.
///
/// Wire encoding and credentials live behind the implementation.
pub trait LogbookSubmitter {
    /// Creates the entry and returns the identifier the service assigned to it.
    fn submit(&self, values: &DerivedLogbookValues) -> Result<String>;
}

/// Computes the record and hands it to `submitter`.
///
/// Nothing is submitted when the computation fails.
pub fn submit_flight_record(
    submitter: &dyn LogbookSubmitter,
    raw_text: &str,
    role: PilotRole,
    airports: &dyn AirportLookup,
    config: &NightConfig,
) -> Result<(FlightRecord, String)> {
    let record = compute_flight_record(raw_text, role, airports, config)?;
    let entry_id = submitter.submit(&record.values)?;
    log::info!(
        "Submitted logbook entry — id={} date={} route={}",
        entry_id,
        record.values.iso_date(),
        record.values.route
    );
    Ok((record, entry_id))
}
