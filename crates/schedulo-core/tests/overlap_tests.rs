//! Tests for the task/event overlap predicate.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use schedulo_core::overlap::{is_all_day, overlaps as overlaps_on};
use schedulo_core::WallClock;

fn at(month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, hour, min, 0).unwrap()
}

fn local(month: u32, day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, month, day)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

/// Overlap read on a UTC wall clock.
fn overlaps(task: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    overlaps_on(task, start, end, &WallClock::utc())
}

fn new_york() -> WallClock {
    WallClock::from_name("America/New_York").unwrap()
}

#[test]
fn all_day_task_overlaps_event_on_same_day() {
    assert!(overlaps(at(6, 10, 0, 0), at(6, 10, 9, 0), at(6, 10, 10, 0)));
}

#[test]
fn timed_task_window_intersects_event() {
    // 09:30-10:30 against 09:00-10:00
    assert!(overlaps(at(6, 10, 9, 30), at(6, 10, 9, 0), at(6, 10, 10, 0)));
}

#[test]
fn timed_task_after_event_same_day_no_overlap() {
    // 11:30-12:30 against 09:00-10:00
    assert!(!overlaps(at(6, 10, 11, 30), at(6, 10, 9, 0), at(6, 10, 10, 0)));
}

#[test]
fn task_window_ending_at_event_start_is_not_overlap() {
    // 08:00-09:00 against 09:00-10:00
    assert!(!overlaps(at(6, 10, 8, 0), at(6, 10, 9, 0), at(6, 10, 10, 0)));
}

#[test]
fn task_starting_at_event_end_is_not_overlap() {
    assert!(!overlaps(at(6, 10, 10, 0), at(6, 10, 9, 0), at(6, 10, 10, 0)));
}

#[test]
fn task_window_reaching_into_event_overlaps() {
    // 08:30-09:30 against 09:00-10:00
    assert!(overlaps(at(6, 10, 8, 30), at(6, 10, 9, 0), at(6, 10, 10, 0)));
}

#[test]
fn days_outside_event_range_never_overlap() {
    let start = at(6, 10, 9, 0);
    let end = at(6, 12, 17, 0);
    assert!(!overlaps(at(6, 9, 0, 0), start, end), "day before start");
    assert!(!overlaps(at(6, 13, 0, 0), start, end), "day after end");
    assert!(!overlaps(at(6, 9, 23, 30), start, end), "timed, day before");
}

#[test]
fn all_day_task_inside_multi_day_event_overlaps() {
    assert!(overlaps(at(6, 11, 0, 0), at(6, 10, 9, 0), at(6, 12, 17, 0)));
}

#[test]
fn timed_task_inside_multi_day_event_overlaps() {
    assert!(overlaps(at(6, 10, 14, 0), at(6, 9, 20, 0), at(6, 11, 8, 0)));
}

#[test]
fn timed_task_on_end_day_after_event_finished() {
    assert!(!overlaps(at(6, 10, 9, 0), at(6, 9, 20, 0), at(6, 10, 8, 0)));
}

#[test]
fn all_day_task_on_end_day_overlaps_even_after_event_finished() {
    // Day-range intersection is enough for an all-day task.
    assert!(overlaps(at(6, 10, 0, 0), at(6, 9, 20, 0), at(6, 10, 8, 0)));
}

#[test]
fn window_crossing_midnight_is_gated_by_task_day() {
    // 23:30 on the 9th would run into an event at 00:00 on the 10th, but the
    // task's day is before the event's first day.
    assert!(!overlaps(at(6, 9, 23, 30), at(6, 10, 0, 0), at(6, 10, 1, 0)));
}

#[test]
fn midnight_and_subsecond_midnight_are_all_day() {
    assert!(is_all_day(local(6, 10, 0, 0)));
    let with_millis = local(6, 10, 0, 0).with_nanosecond(500_000_000).unwrap();
    assert!(is_all_day(with_millis));
}

#[test]
fn any_time_component_is_timed() {
    assert!(!is_all_day(local(6, 10, 0, 1)));
    assert!(!is_all_day(local(6, 10, 1, 0)));
    let one_second = local(6, 10, 0, 0).with_second(1).unwrap();
    assert!(!is_all_day(one_second));
}

// ── Non-UTC clocks: days are local, the task window is absolute ─────────────

#[test]
fn day_gate_uses_local_days() {
    // 03:00Z on the 11th is 23:00 on the 10th in New York.
    let task = at(6, 11, 3, 0);
    let event = (at(6, 10, 13, 0), at(6, 10, 14, 0));
    assert!(!overlaps(task, event.0, event.1), "different UTC days");
    // Same local day, but 23:00-24:00 misses 09:00-10:00.
    assert!(!overlaps_on(task, event.0, event.1, &new_york()));
    // Midnight in New York is all-day there.
    assert!(overlaps_on(at(6, 10, 4, 0), event.0, event.1, &new_york()));
}

#[test]
fn fall_back_day_compares_exact_instants() {
    // 2024-11-03 01:30 EDT (05:30Z) against 02:15-02:45 EST (07:15Z-07:45Z).
    // On the wall clock these look 45 minutes apart; in fact 1h45m separate them.
    let task = Utc.with_ymd_and_hms(2024, 11, 3, 5, 30, 0).unwrap();
    let start = Utc.with_ymd_and_hms(2024, 11, 3, 7, 15, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 11, 3, 7, 45, 0).unwrap();
    assert!(!overlaps_on(task, start, end, &new_york()));

    // The repeated 01:30, this time EST (06:30Z), does reach the event.
    let repeated = Utc.with_ymd_and_hms(2024, 11, 3, 6, 30, 0).unwrap();
    assert!(overlaps_on(repeated, start, end, &new_york()));
}

#[test]
fn spring_forward_day_compares_exact_instants() {
    // 2024-03-10 01:30 EST (06:30Z) against 03:15-03:45 EDT (07:15Z-07:45Z).
    // The wall clock skips 02:00-03:00, so the task window runs into the event.
    let task = Utc.with_ymd_and_hms(2024, 3, 10, 6, 30, 0).unwrap();
    let start = Utc.with_ymd_and_hms(2024, 3, 10, 7, 15, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 3, 10, 7, 45, 0).unwrap();
    assert!(overlaps_on(task, start, end, &new_york()));
}
