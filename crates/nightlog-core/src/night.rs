// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Night time and night landing classification.
//!
//! Both computations degrade instead of failing: when an input is missing the
//! result carries `None` and a reason, so callers can tell "could not compute"
//! apart from a legitimate zero.

use crate::airports::AirportLookup;
use crate::geo::{interpolate_great_circle, GeoPoint};
use crate::ofp::{ClockTime, FlightFact};
use crate::solar::solar_altitude;
use chrono::{DateTime, Days, NaiveDate, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

const MINUTES_PER_DAY: i64 = 1_440;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightComputation {
    pub night_minutes: Option<u32>,
    pub reason: String,
}

impl NightComputation {
    fn unavailable(reason: String) -> Self {
        warn!("Night time not computed — {}", reason);
        Self {
            night_minutes: None,
            reason,
        }
    }

    /// Night minutes as decimal hours, rounded half-up to 0.1.
    pub fn night_hours(&self) -> Option<f64> {
        self.night_minutes.map(night_hours_from_minutes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingClassification {
    pub is_night_landing: Option<bool>,
    pub reason: String,
    pub sun_altitude_deg: Option<f64>,
}

impl LandingClassification {
    fn unavailable(reason: String) -> Self {
        warn!("Landing not classified — {}", reason);
        Self {
            is_night_landing: None,
            reason,
            sun_altitude_deg: None,
        }
    }
}

/// `minutes / 60` rounded half-up to one decimal place.
pub fn night_hours_from_minutes(minutes: u32) -> f64 {
    // Tenths of an hour are six-minute units.
    f64::from((minutes + 3) / 6) / 10.0
}

/// Minutes from OUT to IN, wrapping past midnight. Always in `0..1440`.
pub fn block_duration_minutes(out: ClockTime, in_: ClockTime) -> u32 {
    // rem_euclid keeps the result in 0..1440, so the cast cannot truncate.
    (in_.minutes_of_day() - out.minutes_of_day()).rem_euclid(MINUTES_PER_DAY) as u32
}

fn instant_on(date: NaiveDate, clock: ClockTime) -> Option<DateTime<Utc>> {
    date.and_hms_opt(u32::from(clock.hour), u32::from(clock.minute), 0)
        .map(|dt| dt.and_utc())
}

/// Counts the minutes in `[start, start + duration)` whose sun altitude along the
/// `from` -> `to` great circle is below `threshold_deg`.
pub fn count_night_minutes(
    start: DateTime<Utc>,
    duration_minutes: u32,
    from: GeoPoint,
    to: GeoPoint,
    threshold_deg: f64,
) -> u32 {
    let span = if duration_minutes > 1 {
        f64::from(duration_minutes - 1)
    } else {
        0.0
    };

    (0..duration_minutes)
        .filter(|&i| {
            let fraction = if span > 0.0 { f64::from(i) / span } else { 0.0 };
            let position = interpolate_great_circle(from, to, fraction);
            let instant = start + chrono::Duration::minutes(i64::from(i));
            solar_altitude(instant, position) < threshold_deg
        })
        .count() as u32
}

fn missing_inputs(checks: &[(&'static str, bool)]) -> Vec<&'static str> {
    checks
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect()
}

fn resolve(airports: &dyn AirportLookup, icao: &str, missing: &mut Vec<String>) -> Option<GeoPoint> {
    let point = airports.lookup(icao);
    if point.is_none() {
        missing.push(icao.to_string());
    }
    point
}

/// Minute-by-minute night count over the block time (OUT to IN).
pub fn compute_night_minutes(
    fact: &FlightFact,
    airports: &dyn AirportLookup,
    threshold_deg: f64,
) -> NightComputation {
    let missing = missing_inputs(&[
        ("date", fact.date.is_some()),
        ("origin", fact.origin.is_some()),
        ("destination", fact.destination.is_some()),
        ("out", fact.times.out.is_some()),
        ("in", fact.times.in_.is_some()),
    ]);
    let (Some(date), Some(origin), Some(destination), Some(out), Some(in_)) = (
        fact.date,
        fact.origin.as_deref(),
        fact.destination.as_deref(),
        fact.times.out,
        fact.times.in_,
    ) else {
        return NightComputation::unavailable(format!("missing inputs: {}", missing.join(", ")));
    };

    let mut unknown = Vec::new();
    let from = resolve(airports, origin, &mut unknown);
    let to = resolve(airports, destination, &mut unknown);
    let (Some(from), Some(to)) = (from, to) else {
        return NightComputation::unavailable(format!(
            "no coordinates for: {}",
            unknown.join(", ")
        ));
    };

    let duration = block_duration_minutes(out, in_);
    if duration == 0 {
        return NightComputation {
            night_minutes: Some(0),
            reason: "non-positive block duration".to_string(),
        };
    }

    let Some(start) = instant_on(date, out) else {
        return NightComputation::unavailable(format!(
            "invalid OUT time {:02}{:02}",
            out.hour, out.minute
        ));
    };

    let night = count_night_minutes(start, duration, from, to, threshold_deg);
    debug!(
        "Night sampling done — route={}-{} block_minutes={} night_minutes={} threshold={}",
        origin, destination, duration, night, threshold_deg
    );

    NightComputation {
        night_minutes: Some(night),
        reason: format!("{} of {} block minutes below {}°", night, duration, threshold_deg),
    }
}

/// UTC instant of the landing. A landing clock earlier than OUT is taken to be
/// on the following day.
pub fn landing_instant(
    date: NaiveDate,
    landing: ClockTime,
    out: Option<ClockTime>,
) -> Option<DateTime<Utc>> {
    let crossed_midnight = out.is_some_and(|o| landing.minutes_of_day() < o.minutes_of_day());
    let landing_date = if crossed_midnight {
        date.checked_add_days(Days::new(1))?
    } else {
        date
    };
    instant_on(landing_date, landing)
}

/// Day/night classification at ON (or IN when ON is absent) at the destination.
pub fn classify_landing(
    fact: &FlightFact,
    airports: &dyn AirportLookup,
    threshold_deg: f64,
) -> LandingClassification {
    let landing = fact.times.on.or(fact.times.in_);
    let missing = missing_inputs(&[
        ("date", fact.date.is_some()),
        ("destination", fact.destination.is_some()),
        ("on/in", landing.is_some()),
    ]);
    let (Some(date), Some(destination), Some(landing)) =
        (fact.date, fact.destination.as_deref(), landing)
    else {
        return LandingClassification::unavailable(format!(
            "missing inputs: {}",
            missing.join(", ")
        ));
    };

    let Some(position) = airports.lookup(destination) else {
        return LandingClassification::unavailable(format!(
            "no coordinates for: {}",
            destination
        ));
    };

    let Some(instant) = landing_instant(date, landing, fact.times.out) else {
        return LandingClassification::unavailable(format!(
            "invalid landing time {:02}{:02}",
            landing.hour, landing.minute
        ));
    };

    let altitude = solar_altitude(instant, position);
    let is_night = altitude < threshold_deg;
    debug!(
        "Landing classified — dest={} instant={} sun_altitude={:.2} night={}",
        destination, instant, altitude, is_night
    );

    LandingClassification {
        is_night_landing: Some(is_night),
        reason: format!(
            "sun at {:.1}° at {} ({})",
            altitude,
            instant.format("%Y-%m-%d %H:%MZ"),
            if is_night { "night" } else { "day" }
        ),
        sun_altitude_deg: Some(altitude),
    }
}
