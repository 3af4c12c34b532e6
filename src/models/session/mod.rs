// Session module
// A single tutoring session as delivered by the scheduling provider

use serde::{Deserialize, Serialize};

/// Minutes in a calendar day; session start minutes live in `[0, MINUTES_PER_DAY)`.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Compliance state of a session. Classification happens upstream; the
/// layout engine only carries it through and summarises it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// A record was filed for the session
    Complete,
    /// The session happened but no record exists
    Missing,
    /// The session is still in the future
    Upcoming,
}

impl SessionStatus {
    pub const ALL: [SessionStatus; 3] = [
        SessionStatus::Complete,
        SessionStatus::Missing,
        SessionStatus::Upcoming,
    ];

    /// Status for a wire name, `None` for anything outside the enum
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(name))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Complete => "complete",
            SessionStatus::Missing => "missing",
            SessionStatus::Upcoming => "upcoming",
        }
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::Upcoming
    }
}

/// One tutoring session with a resolved start minute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub student_id: String,
    pub student_name: String,
    pub instructor_id: String,
    pub instructor_name: String,
    /// Comma-joined colour tokens (one = solid, several = gradient stops)
    pub instructor_color: String,
    pub instructor_is_active: bool,
    pub start_minutes: u32,
    pub status: SessionStatus,
    pub has_record: bool,
}

impl Session {
    /// Create a session with the required fields.
    ///
    /// # Examples
    /// ```
    /// use session_layout::models::session::Session;
    ///
    /// let session = Session::new("s-1", "נועה", 600).unwrap();
    /// assert_eq!(session.start_minutes, 600);
    /// ```
    pub fn new(
        student_id: impl Into<String>,
        student_name: impl Into<String>,
        start_minutes: u32,
    ) -> Result<Self, String> {
        Self::builder()
            .student(student_id, student_name)
            .start_minutes(start_minutes)
            .build()
    }

    /// Create a builder for sessions with instructor and status details
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Validate the session
    pub fn validate(&self) -> Result<(), String> {
        if self.student_id.trim().is_empty() {
            return Err("Session student id cannot be empty".to_string());
        }

        if self.start_minutes >= MINUTES_PER_DAY {
            return Err(format!(
                "Session start minute {} is outside the day",
                self.start_minutes
            ));
        }

        Ok(())
    }

    /// End minute for a given day-level session duration
    pub fn end_minutes(&self, duration_minutes: u32) -> u32 {
        self.start_minutes.saturating_add(duration_minutes)
    }
}

/// Builder for sessions with optional instructor and status fields
pub struct SessionBuilder {
    student_id: Option<String>,
    student_name: String,
    instructor_id: String,
    instructor_name: String,
    instructor_color: String,
    instructor_is_active: bool,
    start_minutes: Option<u32>,
    status: SessionStatus,
    has_record: bool,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            student_id: None,
            student_name: String::new(),
            instructor_id: String::new(),
            instructor_name: String::new(),
            instructor_color: String::new(),
            instructor_is_active: true,
            start_minutes: None,
            status: SessionStatus::default(),
            has_record: false,
        }
    }

    /// Set the student id and display name
    pub fn student(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.student_id = Some(id.into());
        self.student_name = name.into();
        self
    }

    /// Set the instructor id, name and colour tokens
    pub fn instructor(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        self.instructor_id = id.into();
        self.instructor_name = name.into();
        self.instructor_color = color.into();
        self
    }

    pub fn instructor_active(mut self, active: bool) -> Self {
        self.instructor_is_active = active;
        self
    }

    pub fn start_minutes(mut self, minutes: u32) -> Self {
        self.start_minutes = Some(minutes);
        self
    }

    pub fn status(mut self, status: SessionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn has_record(mut self, has_record: bool) -> Self {
        self.has_record = has_record;
        self
    }

    /// Build the session
    pub fn build(self) -> Result<Session, String> {
        let student_id = self.student_id.ok_or("Session student is required")?;
        let start_minutes = self.start_minutes.ok_or("Session start minute is required")?;

        let session = Session {
            student_id,
            student_name: self.student_name,
            instructor_id: self.instructor_id,
            instructor_name: self.instructor_name,
            instructor_color: self.instructor_color,
            instructor_is_active: self.instructor_is_active,
            start_minutes,
            status: self.status,
            has_record: self.has_record,
        };

        session.validate()?;
        Ok(session)
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
