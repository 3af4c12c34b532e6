// Schedule module
// Day columns and the weekly schedule handed to the layout engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::session::Session;
use super::time_window::TimeWindow;

/// One calendar day column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub date: NaiveDate,
    pub sessions: Vec<Session>,
    /// Computed by the caller, carried through untouched
    #[serde(default)]
    pub is_today: bool,
    /// Sessions the provider sent whose start time could not be resolved
    #[serde(default)]
    pub unresolved_sessions: usize,
    /// Sessions the provider sent with a status outside the known set
    #[serde(default)]
    pub unknown_status_sessions: usize,
}

impl Day {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            sessions: Vec::new(),
            is_today: false,
            unresolved_sessions: 0,
            unknown_status_sessions: 0,
        }
    }

    pub fn with_sessions(date: NaiveDate, sessions: Vec<Session>) -> Self {
        Self {
            sessions,
            ..Self::new(date)
        }
    }

    pub fn push(&mut self, session: Session) {
        self.sessions.push(session);
    }
}

/// A week of days plus the grid parameters they are laid out against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub week_start: Option<NaiveDate>,
    pub week_end: Option<NaiveDate>,
    pub time_window: TimeWindow,
    /// `None` when the provider omitted it; the settings default applies
    pub session_duration_minutes: Option<u32>,
    pub days: Vec<Day>,
}

impl Schedule {
    /// Total sessions with a resolved start time across all days
    pub fn session_count(&self) -> usize {
        self.days.iter().map(|day| day.sessions.len()).sum()
    }
}
