//! Daily run schedule.

use chrono::{DateTime, Days, NaiveTime, Utc};

/// Parse an `HH:MM` time of day.
pub fn parse_run_at(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
}

/// The first moment strictly after `now` whose UTC time of day is `run_at`.
pub fn next_run_after(now: DateTime<Utc>, run_at: NaiveTime) -> DateTime<Utc> {
    let today = now.date_naive().and_time(run_at).and_utc();
    if today > now {
        return today;
    }
    now.date_naive()
        .checked_add_days(Days::new(1))
        .map(|d| d.and_time(run_at).and_utc())
        .unwrap_or(today)
}
