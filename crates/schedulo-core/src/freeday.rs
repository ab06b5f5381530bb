//! Forward search for the next calendar day free of every known event.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::clock::WallClock;
use crate::dst::DstPolicy;
use crate::error::{Result, ScheduleError};
use crate::model::CalendarEvent;
use crate::overlap::BusyInterval;

/// Default cap on how many days the search will try before giving up.
pub const DEFAULT_MAX_SEARCH_DAYS: u32 = 366;

/// Find the first day after `conflict_date` that overlaps none of `events`.
///
/// Candidates start at the day after `conflict_date` and keep its wall-clock
/// time of day. A candidate in a DST gap is first resolved with `policy`, and the
/// resolved instant is what must be free.
/// Each candidate is tested against the full event list; at most `max_days`
/// candidates are tried.
///
/// # Errors
/// Returns `ScheduleError::NoAvailableSlot` when every candidate within
/// `max_days` is occupied.
pub fn next_free_day(
    conflict_date: DateTime<Utc>,
    events: &[CalendarEvent],
    clock: &WallClock,
    policy: DstPolicy,
    max_days: u32,
) -> Result<DateTime<Utc>> {
    let busy: Vec<BusyInterval> = events
        .iter()
        .map(|e| BusyInterval::from_event(e, clock))
        .collect();

    search(clock.local(conflict_date), &busy, clock, policy, max_days)
}

/// Wall-clock variant of [`next_free_day`] over pre-projected intervals.
pub(crate) fn search(
    from: NaiveDateTime,
    busy: &[BusyInterval],
    clock: &WallClock,
    policy: DstPolicy,
    max_days: u32,
) -> Result<DateTime<Utc>> {
    let exhausted = || ScheduleError::NoAvailableSlot {
        from: from.date(),
        searched_days: max_days,
    };

    let mut candidate = from;
    for _ in 0..max_days {
        candidate = candidate
            .checked_add_signed(Duration::days(1))
            .ok_or_else(exhausted)?;

        // A candidate that does not exist on the wall clock (DST gap under `Skip`)
        // counts as unavailable. Otherwise the resolved instant is what gets
        // tested, since a gap moves it away from the candidate's wall-clock time.
        let Some(instant) = clock.resolve(candidate, policy) else {
            continue;
        };
        let instant_local = clock.local(instant);

        if !busy.iter().any(|b| b.collides(instant, instant_local)) {
            return Ok(instant);
        }
    }

    Err(exhausted())
}
