//! Daily digest: a summary of each user's tasks due today, handed to a
//! notification channel.
//!
//! Storage and delivery are injected through [`TaskRepository`] and
//! [`NotificationSender`], so the digest itself performs no I/O.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::clock::WallClock;
use crate::error::{Result, ScheduleError};
use crate::model::Task;

pub const NOTIFICATION_TITLE: &str = "Schedulo Daily Tasks";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub expo_push_token: Option<String>,
}

/// A push message addressed to one device token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushNotification {
    pub to: String,
    pub sound: String,
    pub title: String,
    pub body: String,
}

/// Read access to users and their tasks.
pub trait TaskRepository {
    fn profiles(&self) -> Result<Vec<UserProfile>>;

    /// Incomplete tasks of `user_id` with `start <= due_date < end`.
    fn open_tasks_due_between(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Task>>;
}

/// Delivery channel for push notifications.
pub trait NotificationSender {
    fn send(&self, notification: &PushNotification) -> Result<()>;
}

/// Counters describing one digest run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DigestReport {
    pub users_checked: usize,
    pub notified: usize,
    pub without_token: usize,
    pub fetch_failures: usize,
    pub send_failures: usize,
}

/// Text body listing `tasks`, one per line.
pub fn summarize(tasks: &[Task]) -> String {
    let lines: Vec<String> = tasks.iter().map(|t| format!("- {}", t.title)).collect();
    format!("You have {} tasks due today:\n{}", tasks.len(), lines.join("\n"))
}

/// Notify every user with tasks due on local day `today`.
///
/// A failure to fetch or send for one user is logged and counted, and the run
/// moves on to the next user.
///
/// # Errors
/// Returns the repository error if the profile list itself cannot be read.
pub fn run_daily_digest<R, S>(
    repo: &R,
    sender: &S,
    clock: &WallClock,
    today: NaiveDate,
) -> Result<DigestReport>
where
    R: TaskRepository + ?Sized,
    S: NotificationSender + ?Sized,
{
    let tomorrow = today
        .succ_opt()
        .ok_or_else(|| ScheduleError::DateOutOfRange(today))?;
    let start = clock.start_of_day(today);
    let end = clock.start_of_day(tomorrow);

    let profiles = repo.profiles()?;
    let mut report = DigestReport::default();

    for profile in &profiles {
        report.users_checked += 1;

        let tasks = match repo.open_tasks_due_between(&profile.id, start, end) {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(user_id = %profile.id, error = %e, "failed to fetch tasks");
                report.fetch_failures += 1;
                continue;
            }
        };
        if tasks.is_empty() {
            continue;
        }

        let Some(token) = profile.expo_push_token.as_deref().filter(|t| !t.is_empty()) else {
            report.without_token += 1;
            continue;
        };

        let notification = PushNotification {
            to: token.to_string(),
            sound: "default".to_string(),
            title: NOTIFICATION_TITLE.to_string(),
            body: summarize(&tasks),
        };
        match sender.send(&notification) {
            Ok(()) => report.notified += 1,
            Err(e) => {
                warn!(user_id = %profile.id, error = %e, "failed to send notification");
                report.send_failures += 1;
            }
        }
    }

    info!(
        %today,
        users = report.users_checked,
        notified = report.notified,
        "daily digest processed"
    );
    Ok(report)
}

/// A task row as stored: a [`Task`] plus its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTask {
    pub user_id: String,
    #[serde(flatten)]
    pub task: Task,
}

/// A [`TaskRepository`] over an in-memory document, typically loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryStore {
    #[serde(default)]
    pub profiles: Vec<UserProfile>,
    #[serde(default)]
    pub tasks: Vec<StoredTask>,
}

impl InMemoryStore {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TaskRepository for InMemoryStore {
    fn profiles(&self) -> Result<Vec<UserProfile>> {
        Ok(self.profiles.clone())
    }

    fn open_tasks_due_between(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Task>> {
        Ok(self
            .tasks
            .iter()
            .filter(|row| row.user_id == user_id && !row.task.is_completed)
            .filter(|row| matches!(row.task.due_date, Some(due) if start <= due && due < end))
            .map(|row| row.task.clone())
            .collect())
    }
}
