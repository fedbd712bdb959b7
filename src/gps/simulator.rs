// src/gps/simulator.rs
//! Synthetic position generation

use super::data::Position;
use crate::clock::unix_seconds;
use chrono::{DateTime, Local};
use std::fmt;

/// Peak altitude swing in circular movement mode, in meters
const MOVEMENT_ALTITUDE_SWING: f64 = 5.0;
/// Degrees of lat/lon noise per unit of the clock phase in static mode
const STATIC_DEGREE_NOISE: f64 = 0.0001;
/// Meters of altitude noise per unit of the clock phase in static mode
const STATIC_ALTITUDE_NOISE: f64 = 0.5;

/// How generated positions evolve between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementMode {
    /// Circle around the base point at a fixed radius
    Simulated,
    /// Stay at the base point, jittered by the wall-clock phase
    Static,
}

impl MovementMode {
    pub fn from_flag(simulate: bool) -> Self {
        if simulate {
            MovementMode::Simulated
        } else {
            MovementMode::Static
        }
    }
}

impl fmt::Display for MovementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementMode::Simulated => write!(f, "Simulated"),
            MovementMode::Static => write!(f, "Static with noise"),
        }
    }
}

/// Generator state. Only `tick_counter` changes, and only in movement mode.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorState {
    pub base_latitude: f64,
    pub base_longitude: f64,
    pub base_altitude: f64,
    pub radius: f64,         // degrees
    pub angular_speed: f64,  // radians per tick
    pub tick_counter: u64,
}

impl Default for SimulatorState {
    /// New York City, 0.01 degree circle, 0.1 rad per tick
    fn default() -> Self {
        Self {
            base_latitude: 40.7128,
            base_longitude: -74.0060,
            base_altitude: 10.0,
            radius: 0.01,
            angular_speed: 0.1,
            tick_counter: 0,
        }
    }
}

pub struct GpsSimulator {
    state: SimulatorState,
}

impl GpsSimulator {
    pub fn new() -> Self {
        Self::with_state(SimulatorState::default())
    }

    pub fn with_state(state: SimulatorState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &SimulatorState {
        &self.state
    }

    /// Produce the next position.
    ///
    /// In `Simulated` mode the result depends only on the tick counter, which is
    /// incremented afterwards. In `Static` mode it depends only on `now`.
    pub fn next_position(&mut self, mode: MovementMode, now: &DateTime<Local>) -> Position {
        match mode {
            MovementMode::Simulated => {
                let position = self.circle_position(self.state.tick_counter);
                self.state.tick_counter += 1;
                position
            }
            MovementMode::Static => self.static_position(now),
        }
    }

    /// Angle in radians reached after `tick` movement steps
    pub fn angle_at(&self, tick: u64) -> f64 {
        tick as f64 * self.state.angular_speed
    }

    fn circle_position(&self, tick: u64) -> Position {
        let s = &self.state;
        let angle = self.angle_at(tick);
        Position {
            latitude: s.base_latitude + s.radius * angle.sin(),
            longitude: s.base_longitude + s.radius * angle.cos(),
            altitude: s.base_altitude + MOVEMENT_ALTITUDE_SWING * (2.0 * angle).sin(),
        }
    }

    fn static_position(&self, now: &DateTime<Local>) -> Position {
        let s = &self.state;
        // Same phase on every axis, cycling through [-5, 5)
        let r = unix_seconds(now).rem_euclid(10.0) - 5.0;
        Position {
            latitude: s.base_latitude + r * STATIC_DEGREE_NOISE,
            longitude: s.base_longitude + r * STATIC_DEGREE_NOISE,
            altitude: s.base_altitude + r * STATIC_ALTITUDE_NOISE,
        }
    }
}

impl Default for GpsSimulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::f64::consts::PI;

    fn instant(secs: i64, nanos: u32) -> DateTime<Local> {
        Local.timestamp_opt(secs, nanos).unwrap()
    }

    #[test]
    fn test_circle_keeps_constant_radius() {
        let mut sim = GpsSimulator::new();
        let now = instant(1_700_000_000, 0);
        let base = sim.state().clone();

        for _ in 0..200 {
            let pos = sim.next_position(MovementMode::Simulated, &now);
            let dlat = pos.latitude - base.base_latitude;
            let dlon = pos.longitude - base.base_longitude;
            let distance = (dlat * dlat + dlon * dlon).sqrt();
            assert!((distance - base.radius).abs() < 1e-12);
            assert!((pos.altitude - base.base_altitude).abs() <= 5.0 + 1e-12);
        }
        assert_eq!(sim.state().tick_counter, 200);
    }

    #[test]
    fn test_first_tick_starts_at_angle_zero() {
        let mut sim = GpsSimulator::new();
        let pos = sim.next_position(MovementMode::Simulated, &instant(0, 0));

        assert!((pos.latitude - 40.7128).abs() < 1e-12);
        assert!((pos.longitude - (-74.0060 + 0.01)).abs() < 1e-12);
        assert!((pos.altitude - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_successive_angles_differ_by_angular_speed() {
        let mut sim = GpsSimulator::new();
        let now = instant(0, 0);
        let base = sim.state().clone();

        let mut previous: Option<f64> = None;
        for _ in 0..20 {
            let pos = sim.next_position(MovementMode::Simulated, &now);
            let angle = (pos.latitude - base.base_latitude)
                .atan2(pos.longitude - base.base_longitude);
            if let Some(prev) = previous {
                let step = (angle - prev).rem_euclid(2.0 * PI);
                assert!((step - base.angular_speed).abs() < 1e-9);
            }
            previous = Some(angle);
        }
    }

    #[test]
    fn test_revolution_closes_after_two_pi_over_speed_ticks() {
        let state = SimulatorState {
            angular_speed: PI / 8.0,
            ..SimulatorState::default()
        };
        let mut sim = GpsSimulator::with_state(state);
        let now = instant(0, 0);

        let first = sim.next_position(MovementMode::Simulated, &now);
        for _ in 1..16 {
            sim.next_position(MovementMode::Simulated, &now);
        }
        let closed = sim.next_position(MovementMode::Simulated, &now);

        assert!((first.latitude - closed.latitude).abs() < 1e-12);
        assert!((first.longitude - closed.longitude).abs() < 1e-12);
        assert!((first.altitude - closed.altitude).abs() < 1e-9);
    }

    #[test]
    fn test_static_mode_is_deterministic_per_instant() {
        let mut sim = GpsSimulator::new();
        let now = instant(1_700_000_007, 400_000_000);

        let a = sim.next_position(MovementMode::Static, &now);
        let b = sim.next_position(MovementMode::Static, &now);

        assert_eq!(a, b);
        assert_eq!(sim.state().tick_counter, 0);
    }

    #[test]
    fn test_static_noise_uses_clock_phase() {
        let mut sim = GpsSimulator::new();

        // 1_700_000_007.5 mod 10 = 7.5, so r = 2.5
        let pos = sim.next_position(MovementMode::Static, &instant(1_700_000_007, 500_000_000));
        assert!((pos.latitude - (40.7128 + 2.5 * 0.0001)).abs() < 1e-9);
        assert!((pos.longitude - (-74.0060 + 2.5 * 0.0001)).abs() < 1e-9);
        assert!((pos.altitude - (10.0 + 2.5 * 0.5)).abs() < 1e-6);

        // Start of a ten second window gives r = -5
        let pos = sim.next_position(MovementMode::Static, &instant(1_700_000_000, 0));
        assert!((pos.altitude - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_movement_mode_display() {
        assert_eq!(MovementMode::from_flag(true).to_string(), "Simulated");
        assert_eq!(MovementMode::from_flag(false).to_string(), "Static with noise");
    }
}
