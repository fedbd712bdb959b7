// src/gps/data.rs
//! GPS data structures

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Horizontal accuracy reported in every JSON reading, in meters
pub const REPORTED_ACCURACY: f64 = 3.5;

/// A single generated fix
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub latitude: f64,   // degrees
    pub longitude: f64,  // degrees
    pub altitude: f64,   // meters
}

impl Position {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }
}

/// JSON payload sent for the `json` format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsReading {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub timestamp: String,
    pub accuracy: f64,
    pub speed: f64,
    pub heading: f64,
}

impl GpsReading {
    /// Build a reading stamped with local wall-clock time (ISO-8601, no offset)
    pub fn from_position(position: &Position, now: &DateTime<Local>) -> Self {
        Self {
            latitude: position.latitude,
            longitude: position.longitude,
            altitude: position.altitude,
            timestamp: now.naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            accuracy: REPORTED_ACCURACY,
            speed: 0.0,
            heading: 0.0,
        }
    }
}
