// Test fixtures - reusable test data
// Sessions, days and payloads shared by the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use session_layout::models::schedule::Day;
use session_layout::models::session::{Session, SessionStatus};

/// Sample week: Sunday 2 March 2025 to Saturday 8 March 2025
pub mod dates {
    use super::*;

    pub fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()
    }

    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    pub fn tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
    }
}

/// Session builders
pub mod sessions {
    use super::*;

    pub fn at(id: &str, name: &str, start: u32) -> Session {
        Session::builder()
            .student(id, name)
            .instructor("i-1", "Rina", "#3b82f6")
            .start_minutes(start)
            .build()
            .unwrap()
    }

    pub fn with_status(id: &str, start: u32, status: SessionStatus) -> Session {
        Session::builder()
            .student(id, id)
            .instructor("i-2", "Dana", "#10b981,#f59e0b")
            .start_minutes(start)
            .status(status)
            .build()
            .unwrap()
    }
}

pub fn day(date: NaiveDate, sessions: Vec<Session>) -> Day {
    Day::with_sessions(date, sessions)
}

/// Payload JSON for one day of `(studentId, time)` pairs
pub fn payload(duration: u32, sessions: &[(&str, &str)]) -> String {
    let sessions: Vec<String> = sessions
        .iter()
        .map(|(id, time)| {
            format!(
                r##"{{"studentId": "{id}", "studentName": "Student {id}", "instructorId": "i-1",
                    "instructorName": "Rina", "instructorColor": "#3b82f6",
                    "instructorIsActive": true, "time": "{time}", "status": "upcoming",
                    "hasRecord": false}}"##
            )
        })
        .collect();

    format!(
        r#"{{
            "weekStart": "2025-03-02",
            "weekEnd": "2025-03-08",
            "timeWindow": {{"startMinutes": 480, "endMinutes": 1200}},
            "sessionDurationMinutes": {duration},
            "days": [{{"date": "2025-03-03", "dayOfWeek": 1, "isToday": false,
                       "sessions": [{}]}}]
        }}"#,
        sessions.join(",")
    )
}
