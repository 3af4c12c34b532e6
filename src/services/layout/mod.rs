//! Session layout engine entry point.
//! Turns a week of days into collision-free chip rectangles and overflow
//! badges on a shared row grid; the stages live in focused submodules.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::layout::{DayLayout, DroppedSessions, WeekLayout};
use crate::models::schedule::{Day, Schedule};
use crate::models::session::{Session, MINUTES_PER_DAY};
use crate::models::settings::LayoutSettings;
use crate::models::time_window::TimeWindow;
use crate::utils::date::format_minutes;

pub mod collision;
pub mod overflow;
pub mod placement;
pub mod slot_heights;
pub mod time_window;

use collision::{group_collisions, Event};
use time_window::SlotGeometry;

/// Pure layout engine. Holds only its settings; every call recomputes from
/// the input and nothing is cached or mutated.
#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine<'a> {
    pub(crate) settings: &'a LayoutSettings,
}

/// The in-window sessions of one date, with the tally of what was left out.
#[derive(Debug, Clone)]
pub(crate) struct DayColumn<'a> {
    pub date: NaiveDate,
    pub sessions: Vec<&'a Session>,
    pub dropped: DroppedSessions,
}

impl<'a> DayColumn<'a> {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            sessions: Vec::new(),
            dropped: DroppedSessions::default(),
        }
    }

    /// Group days by date (repeated dates are merged) and drop sessions the
    /// window does not show.
    fn collect(days: &'a [Day], window: &TimeWindow) -> Vec<Self> {
        let mut columns: BTreeMap<NaiveDate, DayColumn<'a>> = BTreeMap::new();

        for day in days {
            let column = columns
                .entry(day.date)
                .or_insert_with(|| DayColumn::new(day.date));
            column.dropped.unparseable_time += day.unresolved_sessions;
            column.dropped.unknown_status += day.unknown_status_sessions;

            for session in &day.sessions {
                if session.start_minutes >= MINUTES_PER_DAY {
                    log::debug!(
                        "Dropping session of student {} on {}: start minute {} is not a time of day",
                        session.student_id,
                        day.date,
                        session.start_minutes
                    );
                    column.dropped.unparseable_time += 1;
                } else if window.contains(session.start_minutes) {
                    column.sessions.push(session);
                } else {
                    log::debug!(
                        "Dropping session of student {} on {}: {} is outside the time window",
                        session.student_id,
                        day.date,
                        format_minutes(session.start_minutes)
                    );
                    column.dropped.outside_window += 1;
                }
            }
        }

        columns.into_values().collect()
    }
}

impl<'a> LayoutEngine<'a> {
    /// Create an engine with the given settings
    pub fn new(settings: &'a LayoutSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &LayoutSettings {
        self.settings
    }

    /// Lay out a week: `(days, window, session duration) -> date -> layout`.
    ///
    /// A zero duration falls back to the configured default. Never fails;
    /// bad input degrades to empty layouts.
    pub fn compute(&self, days: &[Day], window: &TimeWindow, session_duration: u32) -> WeekLayout {
        if days.is_empty() {
            return WeekLayout::new();
        }

        let duration = self.effective_duration(Some(session_duration));
        let columns = DayColumn::collect(days, window);
        self.layout_columns(&columns, window, duration)
    }

    /// Lay out a parsed schedule
    pub fn layout_schedule(&self, schedule: &Schedule) -> WeekLayout {
        let duration = self.effective_duration(schedule.session_duration_minutes);
        self.compute(&schedule.days, &schedule.time_window, duration)
    }

    /// Session duration the engine lays out with: the given one, or the
    /// configured default when it is missing or zero, capped at a full day.
    pub fn effective_duration(&self, duration: Option<u32>) -> u32 {
        let minutes = match duration {
            Some(minutes) if minutes > 0 => minutes,
            _ => self.settings.default_session_duration,
        };
        minutes.clamp(1, MINUTES_PER_DAY)
    }

    /// Rendered chip height: the session's span on the grid, never shorter
    /// than the minimum readable height.
    pub fn chip_height(&self, geometry: &SlotGeometry, duration_minutes: u32) -> f64 {
        geometry
            .span(duration_minutes)
            .max(self.settings.min_chip_height())
    }

    /// One layout run for one day on a given grid.
    pub(crate) fn layout_day(
        &self,
        column: &DayColumn<'_>,
        geometry: &SlotGeometry,
        duration_minutes: u32,
    ) -> DayLayout {
        let mut layout = DayLayout::default();
        if geometry.is_empty() || column.sessions.is_empty() {
            return layout;
        }

        let chip_height = self.chip_height(geometry, duration_minutes);
        let events: Vec<Event> = column
            .sessions
            .iter()
            .map(|&session| Event::new(session, duration_minutes, geometry, chip_height))
            .collect();

        for group in group_collisions(events) {
            let placed = self.place_group(group, geometry);
            let badges = self.aggregate_overflow(placed.hidden, placed.visible_bottom);
            layout.chips.extend(placed.chips);
            layout.overflow_badges.extend(badges);
        }

        self.settle_badges(&mut layout, geometry);
        layout
    }
}
