//! Collision grouping of a day's events.

use std::cmp::Ordering;

use super::time_window::SlotGeometry;
use crate::models::session::Session;
use crate::utils::collation::compare_names;

/// A session positioned on the grid.
///
/// `top`/`bottom` are the session's *time* extent in pixels and drive
/// collision detection; `chip_height` is the rendered height, which may be
/// taller than the time extent for short sessions.
#[derive(Debug, Clone)]
pub struct Event<'a> {
    pub session: &'a Session,
    pub start: u32,
    pub end: u32,
    pub top: f64,
    pub bottom: f64,
    pub chip_height: f64,
}

impl<'a> Event<'a> {
    pub fn new(
        session: &'a Session,
        duration_minutes: u32,
        geometry: &SlotGeometry,
        chip_height: f64,
    ) -> Self {
        let start = session.start_minutes;
        let end = session.end_minutes(duration_minutes);
        Self {
            session,
            start,
            end,
            top: geometry.y(start),
            bottom: geometry.y(end),
            chip_height,
        }
    }

    /// Bottom edge of the rendered chip
    pub fn chip_bottom(&self) -> f64 {
        self.top + self.chip_height
    }
}

/// Display order of events: vertical position, exact start, student name,
/// then ids so that no two distinct sessions compare equal.
pub fn compare_events(a: &Event, b: &Event) -> Ordering {
    a.top
        .total_cmp(&b.top)
        .then(a.start.cmp(&b.start))
        .then_with(|| compare_names(&a.session.student_name, &b.session.student_name))
        .then_with(|| a.session.student_id.cmp(&b.session.student_id))
        .then_with(|| a.session.instructor_id.cmp(&b.session.instructor_id))
}

/// Maximal run of transitively overlapping events, in display order.
#[derive(Debug, Clone)]
pub struct CollisionGroup<'a> {
    pub events: Vec<Event<'a>>,
    /// Lowest time extent reached by any member
    pub max_bottom: f64,
}

impl<'a> CollisionGroup<'a> {
    fn new(event: Event<'a>) -> Self {
        Self {
            max_bottom: event.bottom,
            events: vec![event],
        }
    }

    fn push(&mut self, event: Event<'a>) {
        self.max_bottom = self.max_bottom.max(event.bottom);
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Sort events and sweep them into collision groups.
///
/// An event opens a new group when its top is at or below the running
/// `max_bottom`; ranges that merely touch do not collide.
pub fn group_collisions(mut events: Vec<Event<'_>>) -> Vec<CollisionGroup<'_>> {
    events.sort_by(compare_events);

    let mut groups: Vec<CollisionGroup> = Vec::new();
    for event in events {
        match groups.last_mut() {
            Some(group) if event.top < group.max_bottom => group.push(event),
            _ => groups.push(CollisionGroup::new(event)),
        }
    }
    groups
}
