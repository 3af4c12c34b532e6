//! Schedule payload reader.
//!
//! Deserialises the provider's weekly JSON and resolves every session's
//! start minute. A session whose start or status cannot be resolved is not
//! an error: it is left out and counted on its day. Only JSON that does not
//! match the payload shape at all is rejected.

use std::io::Read;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::models::schedule::{Day, Schedule};
use crate::models::session::{Session, SessionStatus};
use crate::models::time_window::{TimeWindow, DEFAULT_INTERVAL_MINUTES};
use crate::utils::date::{minute_of_day, parse_clock_time};

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("malformed schedule payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Ids arrive as strings or numbers depending on the provider endpoint.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(text)) => text,
        Some(RawId::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

fn default_active() -> bool {
    true
}

/// Why a raw session was left out of its day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRejection {
    UnresolvedTime,
    UnknownStatus,
}

/// A minute value that may be an integer or an `HH:MM` string.
fn minutes_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => parse_clock_time(text).map(i64::from),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTimeWindow {
    #[serde(default)]
    pub start_minutes: Option<Value>,
    #[serde(default)]
    pub end_minutes: Option<Value>,
    #[serde(default)]
    pub interval_minutes: Option<Value>,
}

impl RawTimeWindow {
    /// Resolve the window; unusable bounds give [`TimeWindow::EMPTY`].
    pub fn resolve(&self) -> TimeWindow {
        let bound = |value: &Option<Value>| {
            value
                .as_ref()
                .and_then(minutes_from_value)
                .and_then(|minutes| i32::try_from(minutes).ok())
        };

        let (Some(start), Some(end)) = (bound(&self.start_minutes), bound(&self.end_minutes)) else {
            log::debug!("Time window bounds missing or unparseable: {:?}", self);
            return TimeWindow::EMPTY;
        };

        let interval = match &self.interval_minutes {
            None | Some(Value::Null) => DEFAULT_INTERVAL_MINUTES,
            Some(value) => value
                .as_u64()
                .and_then(|minutes| u32::try_from(minutes).ok())
                .unwrap_or(0),
        };

        TimeWindow::new(start, end).with_interval(interval)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSession {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub student_id: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub instructor_id: String,
    #[serde(default)]
    pub instructor_name: String,
    #[serde(default)]
    pub instructor_color: Option<String>,
    #[serde(default = "default_active")]
    pub instructor_is_active: bool,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub time_minutes: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub has_record: bool,
}

impl RawSession {
    /// Start minute from `timeMinutes` when it is a valid minute of the day,
    /// otherwise from `time`.
    pub fn start_minutes(&self) -> Option<u32> {
        let from_minutes = self
            .time_minutes
            .as_ref()
            .and_then(|value| value.as_i64())
            .and_then(minute_of_day);

        from_minutes.or_else(|| self.time.as_deref().and_then(parse_clock_time))
    }

    /// Status from its wire name. A missing status means upcoming.
    pub fn status(&self) -> Option<SessionStatus> {
        match &self.status {
            None | Some(Value::Null) => Some(SessionStatus::default()),
            Some(Value::String(name)) => SessionStatus::from_name(name),
            Some(_) => None,
        }
    }

    pub fn to_session(&self) -> Result<Session, SessionRejection> {
        let start_minutes = self
            .start_minutes()
            .ok_or(SessionRejection::UnresolvedTime)?;
        let status = self.status().ok_or(SessionRejection::UnknownStatus)?;
        Ok(Session {
            student_id: self.student_id.clone(),
            student_name: self.student_name.clone(),
            instructor_id: self.instructor_id.clone(),
            instructor_name: self.instructor_name.clone(),
            instructor_color: self.instructor_color.clone().unwrap_or_default(),
            instructor_is_active: self.instructor_is_active,
            start_minutes,
            status,
            has_record: self.has_record,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub day_of_week: Option<Value>,
    #[serde(default)]
    pub is_today: bool,
    #[serde(default)]
    pub sessions: Vec<RawSession>,
}

impl RawDay {
    fn into_day(self) -> Day {
        let mut day = Day::new(self.date);
        day.is_today = self.is_today;

        for raw in &self.sessions {
            match raw.to_session() {
                Ok(session) => day.push(session),
                Err(rejection) => {
                    log::debug!(
                        "Dropping session of student {} on {}: {:?} (time={:?}, timeMinutes={:?}, status={:?})",
                        raw.student_id,
                        self.date,
                        rejection,
                        raw.time,
                        raw.time_minutes,
                        raw.status
                    );
                    match rejection {
                        SessionRejection::UnresolvedTime => day.unresolved_sessions += 1,
                        SessionRejection::UnknownStatus => day.unknown_status_sessions += 1,
                    }
                }
            }
        }

        day
    }
}

/// The provider's weekly payload as sent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePayload {
    #[serde(default)]
    pub week_start: Option<NaiveDate>,
    #[serde(default)]
    pub week_end: Option<NaiveDate>,
    #[serde(default)]
    pub time_window: RawTimeWindow,
    #[serde(default)]
    pub session_duration_minutes: Option<u32>,
    #[serde(default)]
    pub days: Vec<RawDay>,
}

impl SchedulePayload {
    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PayloadError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Resolve times and build the engine-facing schedule.
    pub fn into_schedule(self) -> Schedule {
        let days: Vec<Day> = self.days.into_iter().map(RawDay::into_day).collect();
        let unresolved: usize = days.iter().map(|day| day.unresolved_sessions).sum();
        let unknown_status: usize = days.iter().map(|day| day.unknown_status_sessions).sum();
        if unresolved + unknown_status > 0 {
            log::debug!(
                "{} session(s) without a usable start time, {} with an unknown status",
                unresolved,
                unknown_status
            );
        }

        Schedule {
            week_start: self.week_start,
            week_end: self.week_end,
            time_window: self.time_window.resolve(),
            session_duration_minutes: self.session_duration_minutes,
            days,
        }
    }
}

/// Parse a payload string straight into a schedule
pub fn parse_schedule(json: &str) -> Result<Schedule, PayloadError> {
    Ok(SchedulePayload::from_json(json)?.into_schedule())
}
