//! Layout output model.
//!
//! These are the rectangles the rendering layer draws: visible chips,
//! "+N more" overflow badges and the shared slot heights of the row grid.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::session::{Session, SessionStatus};

/// Horizontal placement of a chip inside its day column.
///
/// Rendered as `left: {left_pct}%` and `width: calc({width_pct}% - {gap_px}px)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChipStyle {
    pub left_pct: f64,
    pub width_pct: f64,
    pub gap_px: f64,
}

/// Base paint of a chip, derived from the instructor colour tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Paint {
    Solid { color: String },
    /// Ordered gradient stops, at least two
    Gradient { stops: Vec<String> },
}

/// Complete fill of a chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChipFill {
    pub paint: Paint,
    /// Diagonal-stripe overlay marking an inactive instructor
    pub striped: bool,
    /// Readable label colour for the paint
    pub text_color: String,
}

/// One visible session rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chip {
    pub session: Session,
    pub top: f64,
    pub height: f64,
    pub style: ChipStyle,
    pub z_index: i32,
    pub start_minutes: u32,
    pub fill: ChipFill,
    /// Offset from the chip top of the slot boundary the session straddles
    pub boundary_hint: Option<f64>,
}

impl Chip {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Horizontal placement of an overflow badge: the full column width
/// minus a fixed inset on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgePlacement {
    pub left_pct: f64,
    pub width_pct: f64,
    pub inset_px: f64,
}

impl BadgePlacement {
    pub fn full_width(inset_px: f64) -> Self {
        Self {
            left_pct: 0.0,
            width_pct: 100.0,
            inset_px,
        }
    }
}

/// Per-status tally of the sessions hidden behind a badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub complete: usize,
    pub missing: usize,
    pub upcoming: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: SessionStatus) {
        match status {
            SessionStatus::Complete => self.complete += 1,
            SessionStatus::Missing => self.missing += 1,
            SessionStatus::Upcoming => self.upcoming += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.complete + self.missing + self.upcoming
    }
}

impl<'a> FromIterator<&'a Session> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = &'a Session>>(iter: I) -> Self {
        let mut counts = StatusCounts::default();
        for session in iter {
            counts.record(session.status);
        }
        counts
    }
}

/// "+N more" summary for sessions sharing one start time that did not get
/// a visible column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverflowBadge {
    pub sessions: Vec<Session>,
    pub top: f64,
    pub height: f64,
    pub start_minutes: u32,
    pub placement: BadgePlacement,
    pub status_counts: StatusCounts,
}

impl OverflowBadge {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn label(&self) -> String {
        format!("+{} more", self.sessions.len())
    }
}

/// Sessions that reached the engine but were left out of the layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedSessions {
    pub unparseable_time: usize,
    pub unknown_status: usize,
    pub outside_window: usize,
}

impl DroppedSessions {
    pub fn total(&self) -> usize {
        self.unparseable_time + self.unknown_status + self.outside_window
    }
}

/// Final layout of one day column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLayout {
    pub chips: Vec<Chip>,
    pub overflow_badges: Vec<OverflowBadge>,
    /// Slot start minute to pixel height, shared by every day of the week
    pub slot_heights: BTreeMap<u32, f64>,
    pub dropped: DroppedSessions,
}

impl DayLayout {
    /// Every laid-out session, visible or hidden behind a badge
    pub fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.chips
            .iter()
            .map(|chip| &chip.session)
            .chain(self.overflow_badges.iter().flat_map(|b| b.sessions.iter()))
    }

    pub fn session_count(&self) -> usize {
        self.chips.len()
            + self
                .overflow_badges
                .iter()
                .map(|badge| badge.sessions.len())
                .sum::<usize>()
    }

    /// Find the badge anchored at a start minute
    pub fn badge_at(&self, start_minutes: u32) -> Option<&OverflowBadge> {
        self.overflow_badges
            .iter()
            .find(|badge| badge.start_minutes == start_minutes)
    }
}

/// Layouts keyed by date.
pub type WeekLayout = BTreeMap<NaiveDate, DayLayout>;
