use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// Source of the current time for the cache.
///
/// `instant` is monotonic and decides freshness; `now` is wall time, used
/// only for display.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
    fn instant(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug)]
struct ManualTime {
    wall: DateTime<Utc>,
    mono: Instant,
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    time: Mutex<ManualTime>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            time: Mutex::new(ManualTime {
                wall: start,
                mono: Instant::now(),
            }),
        }
    }

    /// Let `by` pass: both readings move forward.
    pub fn advance(&self, by: Duration) {
        let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
        time.mono += by;
        time.wall += chrono::Duration::from_std(by).unwrap_or(chrono::Duration::MAX);
    }

    /// Step the wall clock only, as an NTP correction would.
    pub fn step_wall(&self, by: chrono::Duration) {
        let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
        time.wall += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.time.lock().unwrap_or_else(PoisonError::into_inner).wall
    }

    fn instant(&self) -> Instant {
        self.time.lock().unwrap_or_else(PoisonError::into_inner).mono
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances_both_readings() {
        let start = Utc::now();
        let clock = ManualClock::new(start);
        let mono = clock.instant();

        clock.advance(Duration::from_millis(10_000));
        assert_eq!(clock.now(), start + chrono::Duration::seconds(10));
        assert_eq!(clock.instant() - mono, Duration::from_secs(10));
    }

    #[test]
    fn test_wall_step_leaves_instant_alone() {
        let start = Utc::now();
        let clock = ManualClock::new(start);
        let mono = clock.instant();

        clock.step_wall(chrono::Duration::hours(-1));
        assert_eq!(clock.now(), start - chrono::Duration::hours(1));
        assert_eq!(clock.instant(), mono);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let first = SystemClock.instant();
        let second = SystemClock.instant();
        assert!(second >= first);
    }
}
