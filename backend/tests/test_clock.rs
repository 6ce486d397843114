//! Tests for SimClock

use chrono::{Duration, TimeZone, Utc};
use trial_supply_sim_core_rs::core::time::{hours_to_duration, midnight_of};
use trial_supply_sim_core_rs::SimClock;

fn start() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap()
}

#[test]
fn test_clock_new() {
    let clock = SimClock::new(start());
    assert_eq!(clock.now(), start());
    assert_eq!(clock.start(), start());
    assert_eq!(clock.elapsed_hours(), 0.0);
}

#[test]
fn test_advance_accumulates() {
    let mut clock = SimClock::new(start());

    clock.advance_hours(168.0);
    assert_eq!(clock.now(), start() + Duration::days(7));

    clock.advance_hours(18.0);
    clock.advance_hours(0.5);
    assert_eq!(clock.elapsed_hours(), 186.5);
    assert_eq!(clock.now(), start() + Duration::minutes(186 * 60 + 30));
}

#[test]
fn test_zero_advance_keeps_time() {
    let mut clock = SimClock::new(start());
    clock.advance_hours(0.0);
    assert_eq!(clock.now(), start());
}

#[test]
fn test_start_does_not_move() {
    let mut clock = SimClock::new(start());
    clock.advance_hours(48.0);
    assert_eq!(clock.start(), start());
    assert_eq!(clock.start_of_day(), Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap());
}

#[test]
fn test_fractional_hours_to_duration() {
    assert_eq!(hours_to_duration(0.5), Duration::minutes(30));
    assert_eq!(hours_to_duration(1.0 / 3600.0), Duration::seconds(1));
    assert_eq!(hours_to_duration(235.0), Duration::hours(235));
}

#[test]
fn test_midnight_of() {
    let late = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
    assert_eq!(midnight_of(late), Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap());
    assert_eq!(midnight_of(midnight_of(late)), midnight_of(late));
}
