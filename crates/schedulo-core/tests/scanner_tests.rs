//! Tests for the conflict scanner.

use chrono::{DateTime, TimeZone, Utc};
use schedulo_core::{
    scan, CalendarEvent, ConflictKind, ConflictScanner, ScheduleError, Task, WallClock,
};

fn utc(month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, hour, min, 0).unwrap()
}

fn task(id: &str, due: Option<DateTime<Utc>>) -> Task {
    Task::new(id, format!("Task {id}"), due)
}

fn event(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> CalendarEvent {
    CalendarEvent::new(id, format!("Event {id}"), start, end)
}

fn standup() -> CalendarEvent {
    CalendarEvent::new("e1", "Standup", utc(6, 10, 9, 0), utc(6, 10, 10, 0))
}

#[test]
fn all_day_task_conflict_and_next_day_suggestion() {
    let t = Task::new("t1", "Write report", Some(utc(6, 10, 0, 0)));
    let report = scan(&[t], &[standup()]).unwrap();

    assert_eq!(report.conflicts.len(), 1);
    let conflict = &report.conflicts[0];
    assert_eq!(conflict.kind, ConflictKind::Overlap);
    assert_eq!(conflict.task_id, "t1");
    assert_eq!(conflict.event_id, "e1");
    assert_eq!(
        conflict.description,
        "Task \"Write report\" conflicts with event \"Standup\"."
    );

    assert_eq!(report.suggestions.len(), 1);
    let suggestion = &report.suggestions[0];
    assert_eq!(suggestion.task_id, "t1");
    assert_eq!(suggestion.suggested_due_date, utc(6, 11, 0, 0));
    assert_eq!(
        suggestion.reason,
        "Conflict with calendar event \"Standup\". Moved to 2024-06-11."
    );
}

#[test]
fn timed_task_inside_event_conflicts() {
    let report = scan(&[task("t1", Some(utc(6, 10, 9, 30)))], &[standup()]).unwrap();
    assert_eq!(report.conflicts.len(), 1);
    assert_eq!(report.suggestions[0].suggested_due_date, utc(6, 11, 9, 30));
}

#[test]
fn timed_task_clear_of_event_has_no_conflict() {
    let report = scan(&[task("t1", Some(utc(6, 10, 11, 30)))], &[standup()]).unwrap();
    assert!(report.is_empty());
}

#[test]
fn no_events_no_output() {
    let report = scan(&[task("t1", Some(utc(6, 10, 0, 0)))], &[]).unwrap();
    assert!(report.conflicts.is_empty());
    assert!(report.suggestions.is_empty());
}

#[test]
fn task_without_due_date_is_skipped() {
    let report = scan(&[task("t1", None)], &[standup()]).unwrap();
    assert!(report.is_empty());
}

#[test]
fn only_first_overlapping_event_is_reported() {
    let events = vec![
        event("early", utc(6, 10, 8, 0), utc(6, 10, 9, 0)),
        event("a", utc(6, 10, 9, 0), utc(6, 10, 10, 0)),
        event("b", utc(6, 10, 9, 15), utc(6, 10, 11, 0)),
    ];
    let report = scan(&[task("t1", Some(utc(6, 10, 9, 30)))], &events).unwrap();

    assert_eq!(report.conflicts.len(), 1);
    assert_eq!(report.conflicts[0].event_id, "a");
    assert_eq!(report.suggestions.len(), 1);
    assert!(report.suggestions[0].reason.contains("\"Event a\""));
}

#[test]
fn suggestion_considers_every_event() {
    // Only "today" overlaps the task, but "tomorrow" still blocks the suggestion.
    let events = vec![
        event("today", utc(6, 10, 9, 0), utc(6, 10, 10, 0)),
        event("tomorrow", utc(6, 11, 13, 0), utc(6, 11, 14, 0)),
    ];
    let report = scan(&[task("t1", Some(utc(6, 10, 0, 0)))], &events).unwrap();

    assert_eq!(report.conflicts[0].event_id, "today");
    assert_eq!(report.suggestions[0].suggested_due_date, utc(6, 12, 0, 0));
}

#[test]
fn output_follows_task_order() {
    let tasks = vec![
        task("c", Some(utc(6, 10, 0, 0))),
        task("skip", None),
        task("a", Some(utc(6, 10, 9, 45))),
        task("free", Some(utc(6, 20, 0, 0))),
        task("b", Some(utc(6, 10, 0, 0))),
    ];
    let report = scan(&tasks, &[standup()]).unwrap();

    let conflict_ids: Vec<&str> = report.conflicts.iter().map(|c| c.task_id.as_str()).collect();
    let suggestion_ids: Vec<&str> = report.suggestions.iter().map(|s| s.task_id.as_str()).collect();
    assert_eq!(conflict_ids, vec!["c", "a", "b"]);
    assert_eq!(suggestion_ids, conflict_ids);
}

#[test]
fn pass_through_fields_do_not_affect_scan() {
    let mut t = task("t1", Some(utc(6, 10, 0, 0)));
    t.is_completed = true;
    t.is_priority = true;
    t.priority = Some(schedulo_core::Priority::High);
    let report = scan(&[t], &[standup()]).unwrap();
    assert_eq!(report.conflicts.len(), 1);
}

#[test]
fn scanning_twice_gives_identical_reports() {
    let tasks = vec![
        task("a", Some(utc(6, 10, 0, 0))),
        task("b", Some(utc(6, 10, 9, 30))),
    ];
    let events = vec![standup(), event("x", utc(6, 11, 0, 0), utc(6, 11, 23, 0))];
    assert_eq!(scan(&tasks, &events).unwrap(), scan(&tasks, &events).unwrap());
}

#[test]
fn exhausted_search_fails_the_scan() {
    let blocker = event("blocker", utc(6, 10, 0, 0), utc(6, 30, 0, 0));
    let scanner = ConflictScanner::default().with_max_search_days(5);
    let err = scanner
        .scan(&[task("t1", Some(utc(6, 10, 0, 0)))], &[blocker])
        .unwrap_err();
    assert!(matches!(err, ScheduleError::NoAvailableSlot { searched_days: 5, .. }));
}

#[test]
fn days_are_read_on_the_configured_wall_clock() {
    // 04:00Z is midnight in New York (EDT), so the task is all-day there.
    let t = task("t1", Some(utc(6, 10, 4, 0)));
    let meeting = event("m", utc(6, 10, 13, 0), utc(6, 10, 14, 0));

    let in_utc = scan(&[t.clone()], &[meeting.clone()]).unwrap();
    assert!(in_utc.is_empty(), "04:00-05:00 UTC misses a 13:00 meeting");

    let scanner = ConflictScanner::new(WallClock::from_name("America/New_York").unwrap());
    let in_new_york = scanner.scan(&[t], &[meeting]).unwrap();
    assert_eq!(in_new_york.conflicts.len(), 1);
    assert_eq!(in_new_york.suggestions[0].suggested_due_date, utc(6, 11, 4, 0));
    assert!(in_new_york.suggestions[0].reason.ends_with("Moved to 2024-06-11."));
}

#[test]
fn fall_back_day_only_reports_real_overlaps() {
    let scanner = ConflictScanner::new(WallClock::from_name("America/New_York").unwrap());
    let late_call = CalendarEvent::new(
        "late",
        "Late call",
        Utc.with_ymd_and_hms(2024, 11, 3, 7, 15, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 11, 3, 7, 45, 0).unwrap(),
    );

    // 01:30 EDT: the call starts 1h45m later (02:15 EST).
    let first = task("edt", Some(Utc.with_ymd_and_hms(2024, 11, 3, 5, 30, 0).unwrap()));
    // 01:30 EST: the call starts 45 minutes later.
    let second = task("est", Some(Utc.with_ymd_and_hms(2024, 11, 3, 6, 30, 0).unwrap()));

    let report = scanner.scan(&[first, second], &[late_call]).unwrap();
    let ids: Vec<&str> = report.conflicts.iter().map(|c| c.task_id.as_str()).collect();
    assert_eq!(ids, vec!["est"]);
}
