use chrono::{DateTime, Utc};
use rosterlist_core::ResetKind;
use serde::Serialize;

use super::Context;

#[derive(Serialize)]
struct Status {
    now: DateTime<Utc>,
    last_checked: Option<DateTime<Utc>>,
    reset_hour_utc: u32,
    weekly_reset_day: String,
    daily_tasks: Vec<String>,
    last_daily_reset: DateTime<Utc>,
    last_weekly_reset: DateTime<Utc>,
    next_daily_reset: DateTime<Utc>,
    next_weekly_reset: DateTime<Utc>,
    pending_reset: ResetKind,
}

/// Read-only: reports the decision without applying it.
pub fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let checklist = ctx.open_checklist()?;
    let policy = checklist.policy();
    let now = ctx.now;

    let status = Status {
        now,
        last_checked: checklist.last_checked(),
        reset_hour_utc: policy.reset_hour(),
        weekly_reset_day: policy.weekly_reset_day().to_string(),
        daily_tasks: policy.daily_tasks().to_vec(),
        last_daily_reset: policy.today_reset_instant(now),
        last_weekly_reset: policy.last_weekly_reset_instant(now),
        next_daily_reset: policy.next_daily_reset(now),
        next_weekly_reset: policy.next_weekly_reset(now),
        pending_reset: policy.decide(now, checklist.last_checked()),
    };
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
