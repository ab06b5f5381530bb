//! Overlap predicate between a task's due instant and a calendar event.
//!
//! The comparison first works at calendar-day granularity, reading each instant
//! on the local wall clock (see [`crate::clock`]). When the task carries a time
//! of day, the one-hour task window is then tested against the event's exact
//! instants, so DST folds and gaps do not distort the result.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};

use crate::clock::WallClock;
use crate::model::CalendarEvent;

/// Length of the window a timed task is assumed to occupy.
pub const TASK_WINDOW_MINUTES: i64 = 60;

/// Whether the local reading `instant` is treated as an all-day due date.
///
/// A task due at exactly midnight is indistinguishable from one with no time of
/// day, so both count as all-day. Sub-second components are ignored.
pub fn is_all_day(instant: NaiveDateTime) -> bool {
    instant.hour() == 0 && instant.minute() == 0 && instant.second() == 0
}

/// An event's exact interval together with its first and last local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, clock: &WallClock) -> Self {
        Self {
            start,
            end,
            first_day: clock.local(start).date(),
            last_day: clock.local(end).date(),
        }
    }

    pub fn from_event(event: &CalendarEvent, clock: &WallClock) -> Self {
        Self::new(event.start_time, event.end_time, clock)
    }

    /// Whether a task due at `task` (read locally as `task_local`) collides with this interval.
    pub(crate) fn collides(&self, task: DateTime<Utc>, task_local: NaiveDateTime) -> bool {
        let task_day = task_local.date();
        if task_day < self.first_day || task_day > self.last_day {
            return false;
        }

        if is_all_day(task_local) {
            return true;
        }

        let task_end = task + Duration::minutes(TASK_WINDOW_MINUTES);
        task < self.end && self.start < task_end
    }
}

/// Decide whether a task due at `task` collides with the event `[event_start, event_end]`.
///
/// - If the task's local day lies outside the inclusive local day range of the
///   event, there is no overlap.
/// - An all-day task overlaps any event that touches its day.
/// - A timed task occupies `[task, task + 1h)` and overlaps when that window
///   intersects the event's exact interval. Touching endpoints do not overlap.
pub fn overlaps(
    task: DateTime<Utc>,
    event_start: DateTime<Utc>,
    event_end: DateTime<Utc>,
    clock: &WallClock,
) -> bool {
    BusyInterval::new(event_start, event_end, clock).collides(task, clock.local(task))
}
