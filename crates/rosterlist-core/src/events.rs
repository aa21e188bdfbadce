use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every state change of a checklist session produces an Event.
/// The view drains them to show notices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Persisted state was reconciled against the catalog.
    StateLoaded {
        characters: usize,
        at: DateTime<Utc>,
    },
    /// Scheduled daily reset cleared the daily tasks.
    DailyReset {
        tasks: Vec<String>,
        at: DateTime<Utc>,
    },
    /// Scheduled weekly reset cleared everything.
    WeeklyReset {
        at: DateTime<Utc>,
    },
    /// Reset check passed without firing.
    ResetSkipped {
        next_daily_reset: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    TaskToggled {
        character: String,
        task: String,
        done: bool,
        at: DateTime<Utc>,
    },
    /// User confirmed a full reset.
    ManualReset {
        at: DateTime<Utc>,
    },
    ManualResetDeclined {
        at: DateTime<Utc>,
    },
}

impl Event {
    /// User-facing notice for events that warrant an alert.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Event::DailyReset { .. } => Some("Daily reset has happened."),
            Event::WeeklyReset { .. } => Some("Weekly reset has happened."),
            Event::ManualReset { .. } => Some("All tasks have been reset."),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn serializes_with_type_tag() {
        let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 0, 0).unwrap();
        let json = serde_json::to_value(Event::WeeklyReset { at }).unwrap();
        assert_eq!(json["type"], "WeeklyReset");
        assert_eq!(json["at"], "2025-01-08T10:00:00Z");
    }

    #[test]
    fn only_resets_carry_notices() {
        let at = Utc::now();
        assert_eq!(
            Event::DailyReset { tasks: vec![], at }.notice(),
            Some("Daily reset has happened.")
        );
        assert!(Event::ManualResetDeclined { at }.notice().is_none());
        assert!(Event::TaskToggled {
            character: "Bard".into(),
            task: "World Event".into(),
            done: true,
            at,
        }
        .notice()
        .is_none());
    }
}
