//! JSON request/response envelope around the scanner.
//!
//! The wire format carries timestamps as strings. This module validates the
//! envelope, converts it into the domain model, runs a scan, and maps failures
//! onto the two-way BadRequest / Internal split a transport needs.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::clock::WallClock;
use crate::config::EngineConfig;
use crate::dst::DstPolicy;
use crate::error::{ErrorKind, Result, ScheduleError};
use crate::model::{CalendarEvent, Priority, ScanReport, Task};
use crate::scanner::ConflictScanner;

const MISSING_FIELDS: &str = "Missing user_id, tasks, or calendar_events";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Incoming request body. All fields are optional on the wire so that a missing
/// field is reported as a bad request instead of a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolveRequest {
    pub user_id: Option<String>,
    pub tasks: Option<Vec<TaskInput>>,
    pub calendar_events: Option<Vec<EventInput>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskInput {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_priority: bool,
    #[serde(default)]
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventInput {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub start_time: String,
    pub end_time: String,
}

/// A request that passed validation, converted into domain records.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub user_id: String,
    pub tasks: Vec<Task>,
    pub calendar_events: Vec<CalendarEvent>,
}

impl ResolveRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check required fields, then parse every timestamp against `clock`.
    ///
    /// # Errors
    /// `ScheduleError::BadRequest` if `user_id` (missing or empty), `tasks` or
    /// `calendar_events` is absent; `ScheduleError::InvalidTimestamp` if any
    /// timestamp cannot be parsed.
    pub fn validate(self, clock: &WallClock) -> Result<ValidatedRequest> {
        let (user_id, tasks, events) = match (self.user_id, self.tasks, self.calendar_events) {
            (Some(user_id), Some(tasks), Some(events)) if !user_id.is_empty() => {
                (user_id, tasks, events)
            }
            _ => return Err(ScheduleError::BadRequest(MISSING_FIELDS.to_string())),
        };

        let tasks = tasks
            .into_iter()
            .map(|t| t.into_task(clock))
            .collect::<Result<Vec<_>>>()?;
        let calendar_events = events
            .into_iter()
            .map(|e| e.into_event(clock))
            .collect::<Result<Vec<_>>>()?;

        Ok(ValidatedRequest {
            user_id,
            tasks,
            calendar_events,
        })
    }
}

impl TaskInput {
    fn into_task(self, clock: &WallClock) -> Result<Task> {
        // An empty string is as good as no due date.
        let due_date = match self.due_date.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(parse_timestamp(raw, "due_date", clock)?),
        };
        Ok(Task {
            id: self.id,
            title: self.title,
            due_date,
            is_completed: self.is_completed,
            is_priority: self.is_priority,
            priority: self.priority,
        })
    }
}

impl EventInput {
    fn into_event(self, clock: &WallClock) -> Result<CalendarEvent> {
        Ok(CalendarEvent {
            start_time: parse_timestamp(&self.start_time, "start_time", clock)?,
            end_time: parse_timestamp(&self.end_time, "end_time", clock)?,
            id: self.id,
            title: self.title,
        })
    }
}

/// Parse a wire timestamp.
///
/// Accepts RFC 3339 with an offset (e.g., "2024-06-10T09:30:00Z"), a naive local
/// datetime (e.g., "2024-06-10T09:30:00") read on `clock`, or a bare date
/// (e.g., "2024-06-10") meaning local midnight, i.e. an all-day due date.
pub fn parse_timestamp(raw: &str, field: &'static str, clock: &WallClock) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    let invalid = || ScheduleError::InvalidTimestamp {
        field,
        value: raw.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Some(local) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return clock.resolve(local, DstPolicy::WallClock).ok_or_else(invalid);
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| clock.start_of_day(date))
        .map_err(|_| invalid())
}

/// Status code and JSON body, ready for any transport to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl HttpReply {
    fn error(status: u16, message: &str) -> Self {
        let body = serde_json::to_string(&ErrorBody { error: message })
            .unwrap_or_else(|_| r#"{"error":"internal error"}"#.to_string());
        Self { status, body }
    }
}

/// Validate `json`, scan it, and return the report.
pub fn handle(json: &str, config: &EngineConfig) -> Result<ScanReport> {
    let scanner = ConflictScanner::from_config(config)?;
    let request = ResolveRequest::from_json(json)?.validate(scanner.clock())?;
    debug!(
        user_id = %request.user_id,
        tasks = request.tasks.len(),
        events = request.calendar_events.len(),
        "resolving conflicts"
    );
    scanner.scan(&request.tasks, &request.calendar_events)
}

/// Like [`handle`], but never fails: errors become 400/500 replies with an
/// `{"error": ...}` body preserving the message.
pub fn respond(json: &str, config: &EngineConfig) -> HttpReply {
    let outcome = handle(json, config)
        .and_then(|report| serde_json::to_string(&report).map_err(ScheduleError::from));

    match outcome {
        Ok(body) => HttpReply { status: 200, body },
        Err(err) => match err.kind() {
            ErrorKind::BadRequest => {
                warn!(error = %err, "rejected request");
                HttpReply::error(400, &err.to_string())
            }
            ErrorKind::Internal => {
                error!(error = %err, "request processing error");
                HttpReply::error(500, &err.to_string())
            }
        },
    }
}
