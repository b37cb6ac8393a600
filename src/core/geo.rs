//! Coordinates and straight-line geometry.
//!
//! Internally every position is stored as latitude first, longitude second.
//! Routing services that speak GeoJSON expect the opposite order; the
//! conversion helpers here are only called at that boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

const EARTH_RADIUS_KM: f64 = 6_371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// GeoJSON axis order.
    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.lon, self.lat]
    }

    pub fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self {
            lat: pair[1],
            lon: pair[0],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lon)
    }
}

/// Great-circle distance in kilometers.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelMode {
    #[default]
    Driving,
    Cycling,
    Walking,
}

impl TravelMode {
    /// Average speed in km/h.
    pub fn average_speed(&self) -> f64 {
        match self {
            TravelMode::Driving => 50.0,
            TravelMode::Cycling => 15.0,
            TravelMode::Walking => 5.0,
        }
    }
}

/// Rough travel time for a straight-line distance at the mode's average speed.
pub fn estimate_travel_time(distance_km: f64, mode: TravelMode) -> String {
    let hours = distance_km / mode.average_speed();

    if hours < 1.0 / 60.0 {
        return "< 1 min".to_string();
    }

    if hours < 1.0 {
        return format!("{} mins", (hours * 60.0).round() as u64);
    }

    let mut whole_hours = hours.floor() as u64;
    let mut minutes = ((hours - hours.floor()) * 60.0).round() as u64;
    if minutes == 60 {
        whole_hours += 1;
        minutes = 0;
    }
    let unit = if whole_hours == 1 { "hour" } else { "hours" };

    if minutes == 0 {
        format!("{} {}", whole_hours, unit)
    } else {
        format!("{} {} {} mins", whole_hours, unit, minutes)
    }
}
