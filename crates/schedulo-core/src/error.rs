//! Error types for schedulo-core operations.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid timestamp '{value}' in {field}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("No available day within {searched_days} days after {from}")]
    NoAvailableSlot { from: NaiveDate, searched_days: u32 },

    #[error("Date out of range: {0}")]
    DateOutOfRange(NaiveDate),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Notification error: {0}")]
    Notification(String),
}

/// How a transport should classify a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller sent an incomplete request.
    BadRequest,
    /// Anything else: parse failures, exhausted search, broken collaborators.
    Internal,
}

impl ScheduleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScheduleError::BadRequest(_) => ErrorKind::BadRequest,
            _ => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
