// src/clock.rs
//! Wall-clock access for the generator, encoders and status output

use chrono::{DateTime, Local};
use std::sync::{Arc, Mutex};

/// Source of the current local wall-clock time
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// Reads the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock pinned to a settable instant. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: Arc<Mutex<DateTime<Local>>>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Local>) -> Self {
        Self {
            instant: Arc::new(Mutex::new(instant)),
        }
    }

    /// Move the clock to a new instant
    pub fn set(&self, instant: DateTime<Local>) {
        *self.lock() = instant;
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, by: chrono::Duration) {
        let mut guard = self.lock();
        *guard += by;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Local>> {
        // A poisoned lock still holds a valid instant
        self.instant.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        *self.lock()
    }
}

/// Seconds since the Unix epoch, including the fractional part
pub fn unix_seconds(instant: &DateTime<Local>) -> f64 {
    instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_nanos()) / 1e9
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_advance() {
        let start = Local.timestamp_opt(1_700_000_000, 0).unwrap();
        let clock = FixedClock::new(start);
        let shared = clock.clone();

        clock.advance(chrono::Duration::milliseconds(1500));
        assert_eq!(shared.now(), start + chrono::Duration::milliseconds(1500));

        clock.set(start);
        assert_eq!(shared.now(), start);
    }

    #[test]
    fn test_unix_seconds_keeps_fraction() {
        let instant = Local.timestamp_opt(1_700_000_003, 250_000_000).unwrap();
        assert!((unix_seconds(&instant) - 1_700_000_003.25).abs() < 1e-6);
    }
}
