// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Flight facts pulled out of free-text operational flight plans.
//!
//! Every field is extracted by its own rule and the first match wins. A rule
//! that finds nothing leaves its field as `None`; extraction itself never fails.

use chrono::NaiveDate;
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A wall-clock time of day in UTC, without a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    pub fn minutes_of_day(&self) -> i64 {
        i64::from(self.hour) * 60 + i64::from(self.minute)
    }
}

/// The four block/airborne clock times of a flight leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlightTimes {
    pub out: Option<ClockTime>,
    pub off: Option<ClockTime>,
    pub on: Option<ClockTime>,
    #[serde(rename = "in")]
    pub in_: Option<ClockTime>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlightFact {
    pub date: Option<NaiveDate>,
    pub flight_number: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub tail_number: Option<String>,
    pub block_hours: Option<f64>,
    pub captain_name: Option<String>,
    pub first_officer_name: Option<String>,
    pub times: FlightTimes,
}

impl FlightFact {
    pub fn iso_date(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// `"ORIG DEST"` when both airports are known.
    pub fn route(&self) -> Option<String> {
        match (&self.origin, &self.destination) {
            (Some(o), Some(d)) => Some(format!("{} {}", o, d)),
            _ => None,
        }
    }

    /// Flight number and `ORIG-DEST`, skipping whichever is unknown.
    pub fn comments(&self) -> Option<String> {
        let leg = match (&self.origin, &self.destination) {
            (Some(o), Some(d)) => Some(format!("{}-{}", o, d)),
            _ => None,
        };
        let parts: Vec<String> = self.flight_number.iter().cloned().chain(leg).collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

pub struct OfpExtractor {
    flight_number_re: Option<Regex>,
}

impl OfpExtractor {
    /// `carrier_code` is the fixed prefix of this operator's flight numbers, e.g. `ACA`.
    pub fn new(carrier_code: &str) -> Self {
        let pattern = format!(r"\b{}(\d{{3,4}})\b", regex::escape(carrier_code.trim()));
        let flight_number_re = match Regex::new(&pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(
                    "Flight number pattern rejected; flight numbers will not be extracted — carrier={} error={}",
                    carrier_code, e
                );
                None
            }
        };
        Self { flight_number_re }
    }

    pub fn extract(&self, text: &str) -> FlightFact {
        let fact = FlightFact {
            date: extract_date(text),
            flight_number: self.extract_flight_number(text),
            origin: extract_airport(text, AirportMarker::Orig),
            destination: extract_airport(text, AirportMarker::Dest),
            tail_number: extract_tail_number(text),
            block_hours: extract_block_hours(text),
            captain_name: extract_name(text, NameMarker::Captain),
            first_officer_name: extract_name(text, NameMarker::FirstOfficer),
            times: FlightTimes {
                out: extract_clock(text, ClockLabel::Out),
                off: extract_clock(text, ClockLabel::Off),
                on: extract_clock(text, ClockLabel::On),
                in_: extract_clock(text, ClockLabel::In),
            },
        };
        debug!("Extracted flight facts — {:?}", fact);
        fact
    }

    fn extract_flight_number(&self, text: &str) -> Option<String> {
        let re = self.flight_number_re.as_ref()?;
        re.find(text).map(|m| m.as_str().to_string())
    }
}

fn month_number(abbrev: &str) -> Option<u32> {
    let month = match abbrev {
        "JAN" => 1,
        "FEB" => 2,
        "MAR" => 3,
        "APR" => 4,
        "MAY" => 5,
        "JUN" => 6,
        "JUL" => 7,
        "AUG" => 8,
        "SEP" => 9,
        "OCT" => 10,
        "NOV" => 11,
        "DEC" => 12,
        _ => return None,
    };
    Some(month)
}

fn extract_date(text: &str) -> Option<NaiveDate> {
    // 01JAN24
    static DATE_RE: OnceLock<Regex> = OnceLock::new();
    // 01JAN241400Z, date run together with the zulu time
    static DATE_ZULU_RE: OnceLock<Regex> = OnceLock::new();

    let date_re = DATE_RE.get_or_init(|| Regex::new(r"\b(\d{2})([A-Z]{3})(\d{2})\b").unwrap());
    let zulu_re =
        DATE_ZULU_RE.get_or_init(|| Regex::new(r"\b(\d{2})([A-Z]{3})(\d{2})\d{4}Z\b").unwrap());

    let caps = date_re.captures(text).or_else(|| zulu_re.captures(text))?;
    let day: u32 = caps[1].parse().ok()?;
    let month = match month_number(&caps[2]) {
        Some(m) => m,
        None => {
            debug!("Unrecognised month in date token — token={}", &caps[0]);
            return None;
        }
    };
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + year, month, day)
}

#[derive(Clone, Copy)]
enum AirportMarker {
    Orig,
    Dest,
}

fn extract_airport(text: &str, marker: AirportMarker) -> Option<String> {
    static ORIG_RE: OnceLock<Regex> = OnceLock::new();
    static DEST_RE: OnceLock<Regex> = OnceLock::new();

    let re = match marker {
        AirportMarker::Orig => ORIG_RE
            .get_or_init(|| Regex::new(r"\bORIG\b\s*[:\-]?\s*([A-Z]{4})\b").unwrap()),
        AirportMarker::Dest => DEST_RE
            .get_or_init(|| Regex::new(r"\bDEST\b\s*[:\-]?\s*([A-Z]{4})\b").unwrap()),
    };
    re.captures(text).map(|c| c[1].to_string())
}

fn extract_tail_number(text: &str) -> Option<String> {
    static TAIL_RE: OnceLock<Regex> = OnceLock::new();
    let re = TAIL_RE.get_or_init(|| Regex::new(r"\bC-[A-Z]{4}\b").unwrap());
    re.find(text).map(|m| m.as_str().to_string())
}

fn extract_block_hours(text: &str) -> Option<f64> {
    static BLOCK_RES: OnceLock<[Regex; 2]> = OnceLock::new();
    let patterns = BLOCK_RES.get_or_init(|| {
        [
            // BLOCK 1.5 / BLOCK TIME: 1.5
            Regex::new(r"\bBLOCK\s*(?:TIME)?\s*[:=]?\s*(\d{1,2}(?:\.\d)?)(?:[^\d.:]|$)").unwrap(),
            // BLOCK HRS 1.5, BLOCK (HRS) - 1.5
            Regex::new(r"\bBLOCK\b[^\d\n]{0,24}?(\d{1,2}(?:\.\d)?)(?:[^\d.:]|$)").unwrap(),
        ]
    });

    patterns
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|c| c[1].parse::<f64>().ok())
}

const FIELD_MARKERS: [&str; 11] = [
    "CAPTAIN", "FO", "OUT", "OFF", "ON", "IN", "BLOCK", "ORIG", "DEST", "ACFT", "FLT",
];

#[derive(Clone, Copy)]
enum NameMarker {
    Captain,
    FirstOfficer,
}

fn extract_name(text: &str, marker: NameMarker) -> Option<String> {
    static CAPTAIN_RE: OnceLock<Regex> = OnceLock::new();
    static FO_RE: OnceLock<Regex> = OnceLock::new();

    // Names stay on the marker's line.
    let re = match marker {
        NameMarker::Captain => CAPTAIN_RE
            .get_or_init(|| Regex::new(r"\bCAPTAIN\b[ \t]*[:\-]?[ \t]*([A-Za-z' \-]+)").unwrap()),
        NameMarker::FirstOfficer => FO_RE
            .get_or_init(|| Regex::new(r"\bFO\b[ \t]*[:\-]?[ \t]*([A-Za-z' \-]+)").unwrap()),
    };

    let raw = re.captures(text)?.get(1)?.as_str();
    // The next field marker on the same line ends the name.
    let name = raw
        .split_whitespace()
        .take_while(|word| !FIELD_MARKERS.contains(&word.to_uppercase().as_str()))
        .collect::<Vec<&str>>()
        .join(" ");
    if name.chars().count() < 3 {
        return None;
    }
    Some(title_case(&name))
}

/// `JEAN-LUC o'NEIL` -> `Jean-luc O'neil`: first letter of each word upper, rest lower.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[derive(Clone, Copy)]
enum ClockLabel {
    Out,
    Off,
    On,
    In,
}

fn extract_clock(text: &str, label: ClockLabel) -> Option<ClockTime> {
    static OUT_RE: OnceLock<Regex> = OnceLock::new();
    static OFF_RE: OnceLock<Regex> = OnceLock::new();
    static ON_RE: OnceLock<Regex> = OnceLock::new();
    static IN_RE: OnceLock<Regex> = OnceLock::new();

    let (cell, name) = match label {
        ClockLabel::Out => (&OUT_RE, "OUT"),
        ClockLabel::Off => (&OFF_RE, "OFF"),
        ClockLabel::On => (&ON_RE, "ON"),
        ClockLabel::In => (&IN_RE, "IN"),
    };
    let re = cell.get_or_init(|| {
        Regex::new(&format!(r"(?i)\b{}\s*[:=]?\s*(\d{{2}})(\d{{2}})Z?\b", name)).unwrap()
    });

    let caps = re.captures(text)?;
    let hour: u8 = caps[1].parse().ok()?;
    let minute: u8 = caps[2].parse().ok()?;
    if minute > 59 {
        debug!("Rejected clock token with invalid minutes — label={} token={}", name, &caps[0]);
        return None;
    }
    Some(ClockTime::new(hour, minute))
}
