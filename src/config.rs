// src/config.rs
//! Command line configuration

use crate::{
    error::{Result, SenderError},
    gps::{ChecksumMode, DataFormat, MovementMode},
};
use clap::Parser;
use std::time::Duration;

/// GPS UDP test sender: streams simulated GPS readings as UDP datagrams
#[derive(Debug, Clone, Parser)]
#[command(name = "gps-udp-sender", version, about)]
pub struct SenderConfig {
    /// Target host
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Target port
    #[arg(long, default_value_t = 12345)]
    pub port: u16,

    /// Data format
    #[arg(long, value_enum, default_value_t = DataFormat::Json)]
    pub format: DataFormat,

    /// Send interval in seconds
    #[arg(long, default_value_t = 1.0)]
    pub interval: f64,

    /// Simulate moving GPS coordinates instead of a static point with noise
    #[arg(long)]
    pub simulate: bool,

    /// Checksum written at the end of NMEA sentences
    #[arg(long, value_enum, default_value_t = ChecksumMode::Legacy)]
    pub nmea_checksum: ChecksumMode,

    /// Stop after sending this many datagrams (default: run until interrupted)
    #[arg(long)]
    pub count: Option<u64>,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 12345,
            format: DataFormat::Json,
            interval: 1.0,
            simulate: false,
            nmea_checksum: ChecksumMode::Legacy,
            count: None,
        }
    }
}

impl SenderConfig {
    /// Reject settings the send loop cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(SenderError::Config("host must not be empty".to_string()));
        }

        self.interval_duration()?;

        if self.count == Some(0) {
            return Err(SenderError::Config("count must be at least 1".to_string()));
        }

        Ok(())
    }

    /// The interval as a `Duration`, rejecting values it cannot represent
    pub fn interval_duration(&self) -> Result<Duration> {
        if !self.interval.is_finite() || self.interval <= 0.0 {
            return Err(SenderError::Config(format!(
                "interval must be a positive number of seconds, got {}",
                self.interval
            )));
        }

        Duration::try_from_secs_f64(self.interval).map_err(|e| {
            SenderError::Config(format!("interval {} is out of range: {}", self.interval, e))
        })
    }

    pub fn movement_mode(&self) -> MovementMode {
        MovementMode::from_flag(self.simulate)
    }

    /// `host:port` as shown to the user and handed to the resolver
    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
