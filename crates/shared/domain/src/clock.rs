//! Clock capability.
//!
//! Time-dependent value objects never read the wall clock directly; they take
//! a [`Clock`] at every call that needs "now" so expiry can be driven by the
//! caller.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Utc};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Source of the current UTC instant.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait Clock: Send + Sync {
    /// Current UTC instant
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock.
///
/// Holds microseconds since the Unix epoch, so it can be shared between
/// threads and moved forward through a shared reference.
#[derive(Debug)]
pub struct FixedClock {
    micros: AtomicI64,
}

impl FixedClock {
    /// Create a clock frozen at `instant`
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            micros: AtomicI64::new(instant.timestamp_micros()),
        }
    }

    /// Jump to `instant`
    pub fn set(&self, instant: DateTime<Utc>) {
        self.micros.store(instant.timestamp_micros(), Ordering::SeqCst);
    }

    /// Move forward (or backward, for negative durations) by `by`.
    ///
    /// Saturates at the earliest and latest instants chrono can represent.
    pub fn advance(&self, by: Duration) {
        let step = by.num_microseconds().unwrap_or(if by < Duration::zero() {
            i64::MIN
        } else {
            i64::MAX
        });
        let (min, max) = micros_range();
        let mut current = self.micros.load(Ordering::SeqCst);
        loop {
            let next = current.saturating_add(step).clamp(min, max);
            match self.micros.compare_exchange_weak(
                current,
                next,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }
    }
}

fn micros_range() -> (i64, i64) {
    (
        DateTime::<Utc>::MIN_UTC.timestamp_micros(),
        DateTime::<Utc>::MAX_UTC.timestamp_micros(),
    )
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        let micros = self.micros.load(Ordering::SeqCst);
        DateTime::from_timestamp_micros(micros).unwrap_or(if micros < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_is_frozen() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let clock = FixedClock::at(instant);

        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), instant);
    }

    #[test]
    fn test_fixed_clock_advance_and_set() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let clock = FixedClock::at(instant);

        clock.advance(Duration::minutes(6));
        assert_eq!(clock.now(), instant + Duration::minutes(6));

        clock.advance(Duration::seconds(-30));
        assert_eq!(clock.now(), instant + Duration::seconds(330));

        clock.set(instant);
        assert_eq!(clock.now(), instant);
    }

    #[test]
    fn test_fixed_clock_saturates_in_direction_of_travel() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        let clock = FixedClock::at(instant);
        clock.advance(Duration::MAX);
        assert!(clock.now() > instant);
        assert_eq!(clock.now().timestamp(), DateTime::<Utc>::MAX_UTC.timestamp());

        let clock = FixedClock::at(instant);
        clock.advance(Duration::MIN);
        assert!(clock.now() < instant);
        assert_eq!(clock.now().timestamp(), DateTime::<Utc>::MIN_UTC.timestamp());
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();

        assert!(second >= first);
    }
}
