// src/lib.rs
//! GPS UDP Sender Library
//!
//! Generates synthetic GPS positions and streams them as UDP datagrams in
//! JSON, CSV or NMEA GPGGA form, for exercising GPS-consuming applications.

pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod gps;
pub mod logging;
pub mod sender;

// Re-export main types for convenience
pub use config::SenderConfig;
pub use error::{Result, SenderError};
pub use gps::{DataFormat, Position};
pub use sender::{GpsSender, StopReason, UdpSink};
