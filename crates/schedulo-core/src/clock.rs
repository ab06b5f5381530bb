//! Projection between absolute instants and local wall-clock time.
//!
//! Overlap checks compare calendar days and times of day as a person in a given
//! timezone would read them off a wall clock. [`WallClock`] converts inputs into
//! that frame and back again, delegating DST gaps to a [`DstPolicy`].

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::dst::DstPolicy;
use crate::error::{Result, ScheduleError};

/// Upper bound when stepping out of a DST gap, in minutes.
const MAX_GAP_MINUTES: i64 = 24 * 60;

/// A timezone used to read instants as local wall-clock values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    tz: Tz,
}

impl Default for WallClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl WallClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn utc() -> Self {
        Self::new(chrono_tz::UTC)
    }

    /// Build a clock from an IANA timezone name (e.g., "America/New_York").
    ///
    /// # Errors
    /// Returns `ScheduleError::InvalidTimezone` if the name is not a known IANA identifier.
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| ScheduleError::InvalidTimezone(name.to_string()))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Wall-clock reading of `instant` in this clock's timezone.
    pub fn local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.tz).naive_local()
    }

    /// Map a wall-clock value back to an absolute instant.
    ///
    /// Returns `None` only for a nonexistent local time under [`DstPolicy::Skip`].
    pub fn resolve(&self, local: NaiveDateTime, policy: DstPolicy) -> Option<DateTime<Utc>> {
        match self.tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
            LocalResult::None => match policy {
                DstPolicy::Skip => None,
                DstPolicy::ShiftForward => self.first_valid_after(local),
                DstPolicy::WallClock => Some(self.with_offset_before(local)),
            },
        }
    }

    /// The instant at which local `date` begins.
    ///
    /// Midnight can itself fall in a DST gap in a few zones; the day then starts
    /// at the first valid local time.
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_time(NaiveTime::MIN);
        self.resolve(midnight, DstPolicy::ShiftForward)
            .unwrap_or_else(|| self.with_offset_before(midnight))
    }

    fn with_offset_before(&self, local: NaiveDateTime) -> DateTime<Utc> {
        // A day earlier is safely on the far side of any transition.
        let offset = self
            .tz
            .offset_from_utc_datetime(&(local - Duration::days(1)))
            .fix();
        (local - Duration::seconds(offset.local_minus_utc().into())).and_utc()
    }

    fn first_valid_after(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        (1..=MAX_GAP_MINUTES).find_map(|m| {
            self.tz
                .from_local_datetime(&(local + Duration::minutes(m)))
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
        })
    }
}
