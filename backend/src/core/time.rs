//! Time management for the simulation
//!
//! Each run owns a logical clock anchored at the run-start instant. Advancing
//! the clock is a pure data mutation: no step ever waits on real time, and the
//! engine never consults the wall clock once the start instant is fixed.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Logical clock for one simulation run
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use trial_supply_sim_core_rs::SimClock;
///
/// let start = Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap();
/// let mut clock = SimClock::new(start);
/// assert_eq!(clock.now(), start);
///
/// clock.advance_hours(0.5);
/// assert_eq!(clock.elapsed_hours(), 0.5);
/// assert_eq!((clock.now() - start).num_minutes(), 30);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimClock {
    /// Instant the run was created
    start: DateTime<Utc>,
    /// Current logical time
    now: DateTime<Utc>,
    /// Sum of every advance applied so far
    elapsed_hours: f64,
}

impl SimClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            start,
            now: start,
            elapsed_hours: 0.0,
        }
    }

    /// Advance the clock by a (validated, non-negative) number of hours
    ///
    /// Time only ever moves forward; callers validate durations before the
    /// run begins.
    pub fn advance_hours(&mut self, hours: f64) {
        debug_assert!(hours.is_finite() && hours >= 0.0, "advance must be non-negative");
        self.now += hours_to_duration(hours);
        self.elapsed_hours += hours;
    }

    /// Current logical time
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Run-start instant
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Accumulated advanced hours
    pub fn elapsed_hours(&self) -> f64 {
        self.elapsed_hours
    }

    /// Midnight (UTC) of the run-start day
    pub fn start_of_day(&self) -> DateTime<Utc> {
        midnight_of(self.start)
    }
}

/// Convert fractional hours to a millisecond-precision duration
pub fn hours_to_duration(hours: f64) -> Duration {
    Duration::milliseconds((hours * 3_600_000.0).round() as i64)
}

/// Midnight (UTC) of the day containing `instant`
pub fn midnight_of(instant: DateTime<Utc>) -> DateTime<Utc> {
    Utc.from_utc_datetime(&instant.date_naive().and_time(NaiveTime::MIN))
}
