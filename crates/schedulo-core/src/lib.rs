//! # schedulo-core
//!
//! Detects collisions between to-do tasks and calendar events, and proposes a
//! new due date for each conflicted task.
//!
//! The core is pure: tasks and events go in, conflict and suggestion records
//! come out. Storage, transport and notification delivery stay outside and are
//! reached only through the traits in [`digest`].
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use schedulo_core::{scan, CalendarEvent, Task};
//!
//! let task = Task::new("t1", "Write report", Some(Utc.with_ymd_and_hms(2024, 6, 10, 9, 30, 0).unwrap()));
//! let event = CalendarEvent::new(
//!     "e1",
//!     "Standup",
//!     Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 6, 10, 10, 0, 0).unwrap(),
//! );
//!
//! let report = scan(&[task], &[event]).unwrap();
//! assert_eq!(report.conflicts.len(), 1);
//! assert_eq!(
//!     report.suggestions[0].suggested_due_date,
//!     Utc.with_ymd_and_hms(2024, 6, 11, 9, 30, 0).unwrap()
//! );
//! ```
//!
//! ## Modules
//!
//! - [`overlap`] — does a task instant collide with an event interval?
//! - [`freeday`] — next calendar day free of every event
//! - [`scanner`] — tasks × events → conflicts and suggestions
//! - [`clock`] — instants ↔ local wall-clock readings
//! - [`dst`] — DST gap policies
//! - [`request`] — JSON request envelope and status mapping
//! - [`digest`] — daily "tasks due today" summaries
//! - [`config`] — engine configuration (TOML)
//! - [`error`] — Error types

pub mod clock;
pub mod config;
pub mod digest;
pub mod dst;
pub mod error;
pub mod freeday;
pub mod model;
pub mod overlap;
pub mod request;
pub mod scanner;

pub use clock::WallClock;
pub use config::EngineConfig;
pub use dst::DstPolicy;
pub use error::{ErrorKind, ScheduleError};
pub use freeday::next_free_day;
pub use model::{CalendarEvent, Conflict, ConflictKind, Priority, ScanReport, Suggestion, Task};
pub use overlap::overlaps;
pub use request::{handle, respond, HttpReply};
pub use scanner::{scan, ConflictScanner};
