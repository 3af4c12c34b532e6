// Date utility functions
// Clock-time parsing and formatting for minute-of-day values

use chrono::{NaiveTime, Timelike};

use crate::models::session::MINUTES_PER_DAY;

/// Parse an `HH:MM` (or `HH:MM:SS`) clock time into minutes since midnight.
///
/// Seconds are accepted and ignored. Anything chrono rejects as a time of
/// day (`25:99`, `24:00`, empty strings) yields `None`.
pub fn parse_clock_time(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let time = NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()?;

    Some(time.hour() * 60 + time.minute())
}

/// Accept a raw minute count only when it falls inside the day.
pub fn minute_of_day(value: i64) -> Option<u32> {
    if (0..MINUTES_PER_DAY as i64).contains(&value) {
        Some(value as u32)
    } else {
        None
    }
}

/// Format minutes since midnight as `HH:MM`. Minutes past the end of the
/// day (a window ending at 1440) render as `24:00`.
pub fn format_minutes(minutes: u32) -> String {
    if minutes >= MINUTES_PER_DAY {
        return format!("{:02}:{:02}", minutes / 60, minutes % 60);
    }

    NaiveTime::from_num_seconds_from_midnight_opt(minutes * 60, 0)
        .map(|time| time.format("%H:%M").to_string())
        .unwrap_or_default()
}
