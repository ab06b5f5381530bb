//! Conflict scanning: tasks × events → conflicts and rescheduling suggestions.
//!
//! Every task with a due date is compared against the events in input order. The
//! scan applies a first-match reduction: only the first overlapping event is
//! reported for a task, and a single suggestion is produced for it. Later
//! overlapping events for the same task are intentionally not reported.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, info};

use crate::clock::WallClock;
use crate::config::EngineConfig;
use crate::dst::DstPolicy;
use crate::error::Result;
use crate::freeday::{self, DEFAULT_MAX_SEARCH_DAYS};
use crate::model::{CalendarEvent, Conflict, ScanReport, Suggestion, Task};
use crate::overlap::BusyInterval;

/// Detects task/event conflicts under a fixed wall clock and search policy.
#[derive(Debug, Clone)]
pub struct ConflictScanner {
    clock: WallClock,
    dst_policy: DstPolicy,
    max_search_days: u32,
}

impl Default for ConflictScanner {
    fn default() -> Self {
        Self::new(WallClock::utc())
    }
}

impl ConflictScanner {
    pub fn new(clock: WallClock) -> Self {
        Self {
            clock,
            dst_policy: DstPolicy::default(),
            max_search_days: DEFAULT_MAX_SEARCH_DAYS,
        }
    }

    /// Build a scanner from validated engine configuration.
    ///
    /// # Errors
    /// Returns `ScheduleError::InvalidTimezone` or `ScheduleError::Config` when the
    /// configuration does not validate.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.clock()?)
            .with_dst_policy(config.dst_policy)
            .with_max_search_days(config.max_search_days))
    }

    pub fn with_dst_policy(mut self, policy: DstPolicy) -> Self {
        self.dst_policy = policy;
        self
    }

    pub fn with_max_search_days(mut self, days: u32) -> Self {
        self.max_search_days = days;
        self
    }

    pub fn clock(&self) -> &WallClock {
        &self.clock
    }

    /// Scan `tasks` against `events`.
    ///
    /// Tasks without a due date are skipped. For each remaining task the first
    /// overlapping event (in event order) yields one [`Conflict`], and the
    /// next free day, searched against *all* events, yields one [`Suggestion`].
    ///
    /// # Errors
    /// Returns `ScheduleError::NoAvailableSlot` if the free-day search for any
    /// conflicted task exhausts `max_search_days`.
    pub fn scan(&self, tasks: &[Task], events: &[CalendarEvent]) -> Result<ScanReport> {
        let busy: Vec<BusyInterval> = events
            .iter()
            .map(|e| BusyInterval::from_event(e, &self.clock))
            .collect();

        let mut report = ScanReport::default();

        for task in tasks {
            let Some(due) = task.due_date else {
                continue;
            };
            let due_local = self.clock.local(due);

            let Some(event) = first_overlapping_event(due, due_local, events, &busy) else {
                continue;
            };
            debug!(task_id = %task.id, event_id = %event.id, "task conflicts with event");
            report.conflicts.push(Conflict::overlap(task, event));

            let suggested = freeday::search(
                due_local,
                &busy,
                &self.clock,
                self.dst_policy,
                self.max_search_days,
            )?;
            let suggested_day = self.clock.local(suggested).date();
            debug!(task_id = %task.id, %suggested_day, "suggesting new due date");

            report.suggestions.push(Suggestion {
                task_id: task.id.clone(),
                suggested_due_date: suggested,
                reason: format!(
                    "Conflict with calendar event \"{}\". Moved to {}.",
                    event.title,
                    suggested_day.format("%Y-%m-%d")
                ),
            });
        }

        info!(
            tasks = tasks.len(),
            events = events.len(),
            conflicts = report.conflicts.len(),
            "conflict scan complete"
        );
        Ok(report)
    }
}

/// First-match reduction: the earliest event in input order that overlaps `due`.
fn first_overlapping_event<'a>(
    due: DateTime<Utc>,
    due_local: NaiveDateTime,
    events: &'a [CalendarEvent],
    busy: &[BusyInterval],
) -> Option<&'a CalendarEvent> {
    events
        .iter()
        .zip(busy)
        .find(|(_, interval)| interval.collides(due, due_local))
        .map(|(event, _)| event)
}

/// Scan with the default scanner (UTC wall clock, default search cap).
pub fn scan(tasks: &[Task], events: &[CalendarEvent]) -> Result<ScanReport> {
    ConflictScanner::default().scan(tasks, events)
}
