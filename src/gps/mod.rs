// src/gps/mod.rs
//! GPS data generation and encoding

pub mod data;
pub mod format;
pub mod nmea;
pub mod simulator;

pub use data::{GpsReading, Position};
pub use format::{DataFormat, Encoder};
pub use nmea::ChecksumMode;
pub use simulator::{GpsSimulator, MovementMode, SimulatorState};
