//! Daily/weekly reset scheduling.
//!
//! All boundaries are UTC. A reset fires at most once per session, when the
//! daily boundary for today has been crossed since the last check:
//!
//! ```text
//! last_checked absent                          -> Weekly
//! last_checked < today_reset <= now            -> Weekly if the weekly boundary
//!                                                 was also crossed, else Daily
//! otherwise                                    -> None
//! ```
//!
//! [`ResetPolicy::decide`] is pure; applying the decision is up to
//! [`crate::checklist::Checklist::initialize`].

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Default UTC hour of the daily reset.
pub const DEFAULT_RESET_HOUR: u32 = 10;

/// Default weekday of the weekly reset.
pub const DEFAULT_WEEKLY_RESET_DAY: Weekday = Weekday::Wed;

/// Task reset by the daily reset when no other list is configured.
pub const DEFAULT_DAILY_TASK: &str = "World Event";

/// Outcome of a reset check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetKind {
    /// No boundary crossed since the last check.
    None,
    /// Only the daily tasks go back to not-done.
    Daily,
    /// Every task goes back to not-done.
    Weekly,
}

impl ResetKind {
    pub fn fired(&self) -> bool {
        !matches!(self, ResetKind::None)
    }
}

impl std::fmt::Display for ResetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResetKind::None => write!(f, "none"),
            ResetKind::Daily => write!(f, "daily"),
            ResetKind::Weekly => write!(f, "weekly"),
        }
    }
}

/// When resets happen and which tasks the daily reset covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetPolicy {
    reset_hour: u32,
    reset_time: NaiveTime,
    weekly_reset_day: Weekday,
    daily_tasks: Vec<String>,
}

impl ResetPolicy {
    /// # Errors
    /// Returns an error if `reset_hour` is not a valid hour of day.
    pub fn new(
        reset_hour: u32,
        weekly_reset_day: Weekday,
        daily_tasks: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let reset_time =
            NaiveTime::from_hms_opt(reset_hour, 0, 0).ok_or_else(|| ValidationError::InvalidValue {
                field: "reset_hour".to_string(),
                message: format!("{reset_hour} is not an hour of day (0-23)"),
            })?;
        Ok(Self {
            reset_hour,
            reset_time,
            weekly_reset_day,
            daily_tasks,
        })
    }

    pub fn reset_hour(&self) -> u32 {
        self.reset_hour
    }

    pub fn weekly_reset_day(&self) -> Weekday {
        self.weekly_reset_day
    }

    pub fn daily_tasks(&self) -> &[String] {
        &self.daily_tasks
    }

    /// `now`'s UTC calendar date at the reset hour.
    pub fn today_reset_instant(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.date_naive().and_time(self.reset_time).and_utc()
    }

    /// Most recent weekly reset instant at or before `now`.
    pub fn last_weekly_reset_instant(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.weekday().num_days_from_monday();
        let anchor = self.weekly_reset_day.num_days_from_monday();
        let days_back = (today + 7 - anchor) % 7;

        let candidate = (now.date_naive() - Duration::days(i64::from(days_back)))
            .and_time(self.reset_time)
            .and_utc();
        if candidate > now {
            candidate - Duration::days(7)
        } else {
            candidate
        }
    }

    /// First daily reset instant strictly after `now`.
    pub fn next_daily_reset(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = self.today_reset_instant(now);
        if today > now {
            today
        } else {
            today + Duration::days(1)
        }
    }

    /// First weekly reset instant strictly after `now`.
    pub fn next_weekly_reset(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.last_weekly_reset_instant(now) + Duration::days(7)
    }

    /// Decide which reset, if any, is due.
    pub fn decide(&self, now: DateTime<Utc>, last_checked: Option<DateTime<Utc>>) -> ResetKind {
        let Some(last_checked) = last_checked else {
            return ResetKind::Weekly;
        };

        let today_reset = self.today_reset_instant(now);
        if !(last_checked < today_reset && now >= today_reset) {
            return ResetKind::None;
        }

        let weekly_reset = self.last_weekly_reset_instant(now);
        if last_checked < weekly_reset && now >= weekly_reset {
            ResetKind::Weekly
        } else {
            ResetKind::Daily
        }
    }
}

impl Default for ResetPolicy {
    fn default() -> Self {
        Self {
            reset_hour: DEFAULT_RESET_HOUR,
            reset_time: NaiveTime::MIN + Duration::hours(i64::from(DEFAULT_RESET_HOUR)),
            weekly_reset_day: DEFAULT_WEEKLY_RESET_DAY,
            daily_tasks: vec![DEFAULT_DAILY_TASK.to_string()],
        }
    }
}
