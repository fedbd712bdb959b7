// src/gps/nmea.rs
//! NMEA GPGGA sentence generation

use super::data::Position;
use chrono::{DateTime, Local};
use clap::ValueEnum;
use std::fmt;

/// Checksum emitted by the legacy sender regardless of sentence content
pub const LEGACY_CHECKSUM: &str = "47";

/// How the `*hh` checksum suffix is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ChecksumMode {
    /// Fixed `*47`, byte-compatible with the legacy sender
    #[default]
    Legacy,
    /// XOR of the sentence body, as NMEA 0183 requires
    Computed,
}

impl fmt::Display for ChecksumMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChecksumMode::Legacy => write!(f, "legacy"),
            ChecksumMode::Computed => write!(f, "computed"),
        }
    }
}

/// Build a simplified GPGGA sentence.
///
/// Fix quality, satellite count, HDOP and geoid separation are fixed
/// placeholders. The time field is local wall-clock time, not UTC.
pub fn format_gpgga(position: &Position, now: &DateTime<Local>, checksum: ChecksumMode) -> String {
    let (lat_str, lat_dir) = format_latitude(position.latitude);
    let (lon_str, lon_dir) = format_longitude(position.longitude);
    let time_str = now.format("%H%M%S");

    let body = format!(
        "GPGGA,{},{},{},{},{},1,08,1.0,{:.1},M,46.9,M,,",
        time_str, lat_str, lat_dir, lon_str, lon_dir, position.altitude
    );

    let checksum = match checksum {
        ChecksumMode::Legacy => LEGACY_CHECKSUM.to_string(),
        ChecksumMode::Computed => format!("{:02X}", nmea_checksum(&body)),
    };

    format!("${}*{}", body, checksum)
}

/// Latitude as `DDMM.MMMM` plus hemisphere
pub fn format_latitude(latitude: f64) -> (String, char) {
    let (degrees, minutes) = split_degrees(latitude);
    let hemisphere = if latitude >= 0.0 { 'N' } else { 'S' };
    (format!("{:02}{:07.4}", degrees, minutes), hemisphere)
}

/// Longitude as `DDDMM.MMMM` plus hemisphere
pub fn format_longitude(longitude: f64) -> (String, char) {
    let (degrees, minutes) = split_degrees(longitude);
    let hemisphere = if longitude >= 0.0 { 'E' } else { 'W' };
    (format!("{:03}{:07.4}", degrees, minutes), hemisphere)
}

/// XOR of every byte in the sentence body (between `$` and `*`)
pub fn nmea_checksum(body: &str) -> u8 {
    body.bytes().fold(0, |acc, b| acc ^ b)
}

fn split_degrees(value: f64) -> (u32, f64) {
    let abs = value.abs();
    let degrees = abs.trunc();
    (degrees as u32, (abs - degrees) * 60.0)
}
