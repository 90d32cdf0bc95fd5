// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Below this angular separation (radians) two points are treated as the same place.
const COINCIDENT_EPSILON: f64 = 1e-10;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("Latitude out of range [-90, 90]: {0}")]
    LatitudeOutOfRange(f64),
    #[error("Longitude out of range [-180, 180]: {0}")]
    LongitudeOutOfRange(f64),
}

/// A position on the earth in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(GeoError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(GeoError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }

    fn to_unit_vector(self) -> [f64; 3] {
        let lat = self.lat.to_radians();
        let lon = self.lon.to_radians();
        [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
    }

    fn from_vector(v: [f64; 3]) -> Self {
        let [x, y, z] = v;
        let lat = z.atan2((x * x + y * y).sqrt());
        let lon = y.atan2(x);
        Self {
            lat: lat.to_degrees(),
            lon: lon.to_degrees(),
        }
    }

    /// Central angle to `other` in radians.
    pub fn angular_distance(&self, other: &GeoPoint) -> f64 {
        let a = self.to_unit_vector();
        let b = other.to_unit_vector();
        let dot = a[0] * b[0] + a[1] * b[1] + a[2] * b[2];
        dot.clamp(-1.0, 1.0).acos()
    }
}

/// Spherical linear interpolation along the great circle from `from` to `to`.
///
/// `fraction` is 0.0 at `from` and 1.0 at `to`. Coincident endpoints return
/// `from` unchanged.
pub fn interpolate_great_circle(from: GeoPoint, to: GeoPoint, fraction: f64) -> GeoPoint {
    let omega = from.angular_distance(&to);
    if omega < COINCIDENT_EPSILON {
        return from;
    }

    let sin_omega = omega.sin();
    let a = ((1.0 - fraction) * omega).sin() / sin_omega;
    let b = (fraction * omega).sin() / sin_omega;

    let v1 = from.to_unit_vector();
    let v2 = to.to_unit_vector();
    GeoPoint::from_vector([
        a * v1[0] + b * v2[0],
        a * v1[1] + b * v2[1],
        a * v1[2] + b * v2[2],
    ])
}
