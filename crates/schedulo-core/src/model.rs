//! Data model: the records the scanner reads and the records it produces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Priority level attached to a task. Carried through untouched by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A user-owned to-do item.
///
/// Only `id`, `title` and `due_date` are read when detecting conflicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    /// `None` means the task never takes part in conflict checks.
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_priority: bool,
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, due_date: Option<DateTime<Utc>>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            due_date,
            is_completed: false,
            is_priority: false,
            priority: None,
        }
    }
}

/// A fixed interval on a user's calendar. `start_time <= end_time` is assumed, not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl CalendarEvent {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_time,
            end_time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {
    Overlap,
}

/// A detected collision between a task's due date and a calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    pub task_id: String,
    pub event_id: String,
    pub description: String,
}

impl Conflict {
    pub fn overlap(task: &Task, event: &CalendarEvent) -> Self {
        Self {
            kind: ConflictKind::Overlap,
            task_id: task.id.clone(),
            event_id: event.id.clone(),
            description: format!(
                "Task \"{}\" conflicts with event \"{}\".",
                task.title, event.title
            ),
        }
    }
}

/// A proposed due date that avoids every known event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub task_id: String,
    pub suggested_due_date: DateTime<Utc>,
    pub reason: String,
}

/// Output of one scan: conflicts and suggestions, both in task-input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub conflicts: Vec<Conflict>,
    pub suggestions: Vec<Suggestion>,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty() && self.suggestions.is_empty()
    }
}
