// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::geo::GeoPoint;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Read-only ICAO code -> coordinate lookup.
pub trait AirportLookup {
    fn lookup(&self, icao: &str) -> Option<GeoPoint>;
}

impl AirportLookup for HashMap<String, GeoPoint> {
    fn lookup(&self, icao: &str) -> Option<GeoPoint> {
        self.get(icao).copied()
    }
}

#[derive(Error, Debug)]
pub enum AirportTableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid airport row at line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },
}

#[derive(Debug, Deserialize)]
struct AirportRow {
    icao: String,
    lat: f64,
    lon: f64,
}

/// In-memory airport coordinate table keyed by upper-case ICAO code.
#[derive(Debug, Clone, Default)]
pub struct AirportTable {
    airports: HashMap<String, GeoPoint>,
}

impl AirportTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, icao: &str, point: GeoPoint) {
        self.airports.insert(icao.trim().to_uppercase(), point);
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, AirportTableError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Reads `icao,lat,lon` rows. The first row must be the header.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, AirportTableError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut record = csv::StringRecord::new();
        let mut table = Self::new();

        while rdr.read_record(&mut record)? {
            let row: AirportRow = record.deserialize(Some(&headers))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            if row.icao.is_empty() {
                return Err(AirportTableError::InvalidRow {
                    line,
                    reason: "empty ICAO code".to_string(),
                });
            }
            let point = GeoPoint::new(row.lat, row.lon).map_err(|e| {
                AirportTableError::InvalidRow {
                    line,
                    reason: format!("{}: {}", row.icao, e),
                }
            })?;
            table.insert(&row.icao, point);
        }

        log::debug!("Loaded airport table — airports={}", table.len());
        Ok(table)
    }
}

impl AirportLookup for AirportTable {
    fn lookup(&self, icao: &str) -> Option<GeoPoint> {
        self.airports.get(&icao.trim().to_uppercase()).copied()
    }
}

impl<'a> FromIterator<(&'a str, GeoPoint)> for AirportTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, GeoPoint)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (icao, point) in iter {
            table.insert(icao, point);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table: AirportTable = [("cyyz", GeoPoint::new(43.6777, -79.6248).unwrap())]
            .into_iter()
            .collect();
        assert_eq!(table.lookup("CYYZ").map(|p| p.lat), Some(43.6777));
        assert_eq!(table.lookup(" cyyz ").map(|p| p.lon), Some(-79.6248));
        assert!(table.lookup("CYOW").is_none());
    }

    #[test]
    fn test_parse_csv() {
        let data = "icao,lat,lon\n# comment\nCYYZ, 43.6777, -79.6248\nCYOW,45.3225,-75.6692\n";
        let table = AirportTable::from_csv_reader(Cursor::new(data)).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("CYOW").map(|p| p.lat), Some(45.3225));
    }

    #[test]
    fn test_out_of_range_row_rejected() {
        let data = "icao,lat,lon\nCYYZ,43.6777,-79.6248\nBAD1,95.0,0.0\n";
        let err = AirportTable::from_csv_reader(Cursor::new(data)).unwrap_err();
        match err {
            AirportTableError::InvalidRow { reason, .. } => assert!(reason.starts_with("BAD1")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_number_is_csv_error() {
        let data = "icao,lat,lon\nCYYZ,north,-79.6\n";
        let err = AirportTable::from_csv_reader(Cursor::new(data)).unwrap_err();
        assert!(matches!(err, AirportTableError::Csv(_)));
    }

    #[test]
    fn test_from_csv_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "icao,lat,lon").unwrap();
        writeln!(file, "CYVR,49.1947,-123.1792").unwrap();
        let table = AirportTable::from_csv_path(file.path()).unwrap();
        assert!(table.lookup("CYVR").is_some());
    }

    #[test]
    fn test_hashmap_lookup() {
        let mut map = HashMap::new();
        map.insert("EGLL".to_string(), GeoPoint::new(51.47, -0.4543).unwrap());
        assert!(map.lookup("EGLL").is_some());
    }
}
