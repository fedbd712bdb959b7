// src/gps/format.rs
//! Wire formats for outgoing datagrams

use super::{
    data::{GpsReading, Position},
    nmea::{self, ChecksumMode},
};
use crate::error::Result;
use chrono::{DateTime, Local};
use clap::ValueEnum;
use std::fmt;

/// Payload encoding selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DataFormat {
    #[default]
    Json,
    Csv,
    Nmea,
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataFormat::Json => write!(f, "json"),
            DataFormat::Csv => write!(f, "csv"),
            DataFormat::Nmea => write!(f, "nmea"),
        }
    }
}

/// Encodes positions into datagram payloads
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder {
    pub format: DataFormat,
    pub checksum: ChecksumMode,
}

impl Encoder {
    pub fn new(format: DataFormat, checksum: ChecksumMode) -> Self {
        Self { format, checksum }
    }

    pub fn encode(&self, position: &Position, now: &DateTime<Local>) -> Result<Vec<u8>> {
        match self.format {
            DataFormat::Json => encode_json(position, now),
            DataFormat::Csv => Ok(encode_csv(position)),
            DataFormat::Nmea => Ok(encode_nmea(position, now, self.checksum)),
        }
    }
}

/// JSON object with position, local timestamp and constant quality fields
pub fn encode_json(position: &Position, now: &DateTime<Local>) -> Result<Vec<u8>> {
    let reading = GpsReading::from_position(position, now);
    Ok(serde_json::to_vec(&reading)?)
}

/// `lat,lon,alt` with 6/6/2 decimals, no header or newline
pub fn encode_csv(position: &Position) -> Vec<u8> {
    format!(
        "{:.6},{:.6},{:.2}",
        position.latitude, position.longitude, position.altitude
    )
    .into_bytes()
}

pub fn encode_nmea(position: &Position, now: &DateTime<Local>, checksum: ChecksumMode) -> Vec<u8> {
    nmea::format_gpgga(position, now, checksum).into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 1, 8, 0, 5).unwrap()
    }

    #[test]
    fn test_csv_exact_bytes() {
        let bytes = encode_csv(&Position::new(40.7128, -74.006, 10.0));
        assert_eq!(bytes, b"40.712800,-74.006000,10.00");
    }

    #[test]
    fn test_json_decodes_to_sent_values() {
        let position = Position::new(40.71734, -74.00123, 12.3456789);
        let bytes = encode_json(&position, &now()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let close = |key: &str, expected: f64| {
            let actual = value[key].as_f64().unwrap();
            assert!((actual - expected).abs() < 1e-12, "{} = {}", key, actual);
        };
        close("latitude", 40.71734);
        close("longitude", -74.00123);
        close("altitude", 12.3456789);
        assert_eq!(value["accuracy"].as_f64(), Some(3.5));
        assert_eq!(value["speed"].as_f64(), Some(0.0));
        assert_eq!(value["heading"].as_f64(), Some(0.0));
        assert_eq!(value["timestamp"].as_str(), Some("2024-06-01T08:00:05.000000"));

        let reading: GpsReading = serde_json::from_slice(&bytes).unwrap();
        assert!((reading.latitude - position.latitude).abs() < 1e-12);
    }

    #[test]
    fn test_json_key_order() {
        let bytes = encode_json(&Position::new(1.0, 2.0, 3.0), &now()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let keys = ["latitude", "longitude", "altitude", "timestamp", "accuracy", "speed", "heading"];
        let offsets: Vec<usize> = keys
            .iter()
            .map(|k| text.find(&format!("\"{}\"", k)).unwrap())
            .collect();
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_encoder_dispatch() {
        let position = Position::new(40.7128, -74.006, 10.0);

        let csv = Encoder::new(DataFormat::Csv, ChecksumMode::Legacy)
            .encode(&position, &now())
            .unwrap();
        assert_eq!(csv, b"40.712800,-74.006000,10.00");

        let nmea = Encoder::new(DataFormat::Nmea, ChecksumMode::Legacy)
            .encode(&position, &now())
            .unwrap();
        let text = String::from_utf8(nmea).unwrap();
        assert!(text.starts_with("$GPGGA,080005,4042.7680,N,07400.3600,W,"));
        assert!(text.ends_with("*47"));
    }
}
