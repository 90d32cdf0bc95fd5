// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::night::{LandingClassification, NightComputation};
use crate::ofp::FlightFact;
use crate::FlightRecordError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who had the controls on this leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PilotRole {
    #[default]
    #[serde(rename = "PF")]
    PilotFlying,
    #[serde(rename = "PM")]
    PilotMonitoring,
}

impl PilotRole {
    /// `PM` (any case) is pilot monitoring; anything else is pilot flying.
    pub fn parse_lenient(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("PM") {
            PilotRole::PilotMonitoring
        } else {
            PilotRole::PilotFlying
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PilotRole::PilotFlying => "PF",
            PilotRole::PilotMonitoring => "PM",
        }
    }
}

impl fmt::Display for PilotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Number(f64),
}

/// Free-form name/value pair attached to a logbook entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogbookProperty {
    pub name: String,
    pub value: PropertyValue,
}

pub const PIC_NAME_PROPERTY: &str = "PIC Name";
pub const PF_TIME_PROPERTY: &str = "PF Time";
pub const PM_TIME_PROPERTY: &str = "PM Time";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedLogbookValues {
    pub date: NaiveDate,
    pub tail_number: String,
    pub route: String,
    pub comments: Option<String>,
    pub total_time: f64,
    pub pic_time: f64,
    pub sic_time: f64,
    pub cross_country_time: f64,
    pub night_time: f64,
    pub instrument_time: f64,
    pub approaches: u32,
    pub landings: u32,
    pub full_stop_day_landings: u32,
    pub full_stop_night_landings: u32,
    pub pilot_flying_time: f64,
    pub pilot_monitoring_time: f64,
    pub properties: Vec<LogbookProperty>,
}

impl DerivedLogbookValues {
    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// One fixed-width summary line, e.g.
    /// `240101 CYYZ CYOW  1/0   1.5   1.5   1.4   0.0 C-ABCD PF`.
    pub fn to_log_line(&self) -> String {
        let role = if self.pilot_monitoring_time > 0.0 {
            PilotRole::PilotMonitoring
        } else {
            PilotRole::PilotFlying
        };
        format!(
            "{} {:<10} {:>1}/{:>1} {:>5.1} {:>5.1} {:>5.1} {:>5.1} {:>6} {}",
            self.date.format("%y%m%d"),
            self.route,
            self.full_stop_day_landings,
            self.full_stop_night_landings,
            self.total_time,
            self.cross_country_time,
            self.instrument_time,
            self.night_time,
            self.tail_number,
            role
        )
    }
}

/// Block time less a fixed 0.1 h, to one decimal, never negative.
pub fn instrument_time(block_hours: f64) -> f64 {
    (((block_hours - 0.1) * 10.0).round() / 10.0).max(0.0)
}

/// Applies the fixed logbook rules to extracted facts and computed night data.
///
/// Date, tail, route and block time are required; any that are absent are
/// reported together and nothing is derived.
pub fn derive_logbook_values(
    fact: &FlightFact,
    night: &NightComputation,
    landing: &LandingClassification,
    role: PilotRole,
) -> Result<DerivedLogbookValues, FlightRecordError> {
    let route = fact.route();
    let (Some(date), Some(tail_number), Some(route), Some(block)) =
        (fact.date, fact.tail_number.clone(), route.clone(), fact.block_hours)
    else {
        let missing: Vec<String> = [
            ("date", fact.date.is_none()),
            ("tail", fact.tail_number.is_none()),
            ("route", route.is_none()),
            ("block", fact.block_hours.is_none()),
        ]
        .iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| name.to_string())
        .collect();
        return Err(FlightRecordError::MissingFields(missing));
    };

    let (day_landings, night_landings) = match landing.is_night_landing {
        Some(true) => (0, 1),
        Some(false) => (1, 0),
        None => (0, 0),
    };

    let (pf_time, pm_time) = match role {
        PilotRole::PilotFlying => (block, 0.0),
        PilotRole::PilotMonitoring => (0.0, block),
    };

    let mut properties = Vec::with_capacity(2);
    if let Some(captain) = &fact.captain_name {
        properties.push(LogbookProperty {
            name: PIC_NAME_PROPERTY.to_string(),
            value: PropertyValue::Text(captain.clone()),
        });
    }
    properties.push(LogbookProperty {
        name: match role {
            PilotRole::PilotFlying => PF_TIME_PROPERTY,
            PilotRole::PilotMonitoring => PM_TIME_PROPERTY,
        }
        .to_string(),
        value: PropertyValue::Number(block),
    });

    Ok(DerivedLogbookValues {
        date,
        tail_number,
        route,
        comments: fact.comments(),
        total_time: block,
        // Recorded pilot is always second in command on these legs.
        pic_time: 0.0,
        sic_time: block,
        cross_country_time: block,
        night_time: night.night_hours().unwrap_or(0.0),
        instrument_time: instrument_time(block),
        approaches: 1,
        landings: 1,
        full_stop_day_landings: day_landings,
        full_stop_night_landings: night_landings,
        pilot_flying_time: pf_time,
        pilot_monitoring_time: pm_time,
        properties,
    })
}
