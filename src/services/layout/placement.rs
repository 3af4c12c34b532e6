//! Side-by-side placement of the visible chips of a collision group.

use super::collision::{CollisionGroup, Event};
use super::time_window::SlotGeometry;
use super::LayoutEngine;
use crate::models::layout::{Chip, ChipStyle};
use crate::services::palette::chip_fill;

/// Events of one collision group that share an exact start minute.
#[derive(Debug, Clone)]
pub struct StartBucket<'a> {
    pub start: u32,
    pub events: Vec<Event<'a>>,
}

/// Result of placing a collision group: its visible chips and the events
/// left for the overflow badges.
#[derive(Debug)]
pub struct GroupPlacement<'a> {
    pub chips: Vec<Chip>,
    pub hidden: Vec<StartBucket<'a>>,
    /// Lowest chip bottom of the group
    pub visible_bottom: f64,
}

/// Split display-ordered events into buckets of identical start minutes.
pub fn bucket_by_start(events: Vec<Event<'_>>) -> Vec<StartBucket<'_>> {
    let mut buckets: Vec<StartBucket> = Vec::new();
    for event in events {
        match buckets.last_mut() {
            Some(bucket) if bucket.start == event.start => bucket.events.push(event),
            _ => buckets.push(StartBucket {
                start: event.start,
                events: vec![event],
            }),
        }
    }
    buckets
}

/// Fill `cap` visible columns from the earliest buckets; whatever does not
/// fit stays hidden, still grouped by start minute.
fn split_visible(events: Vec<Event<'_>>, cap: usize) -> (Vec<Event<'_>>, Vec<StartBucket<'_>>) {
    let mut visible = Vec::with_capacity(cap);
    let mut hidden = Vec::new();

    for mut bucket in bucket_by_start(events) {
        let room = cap - visible.len();
        if bucket.events.len() <= room {
            visible.append(&mut bucket.events);
            continue;
        }

        let rest = bucket.events.split_off(room);
        visible.append(&mut bucket.events);
        hidden.push(StartBucket {
            start: bucket.start,
            events: rest,
        });
    }

    (visible, hidden)
}

impl LayoutEngine<'_> {
    /// Place a collision group: at most `max_visible_chips` equal-width
    /// columns in display order, the rest handed back as hidden buckets.
    pub fn place_group<'e>(
        &self,
        group: CollisionGroup<'e>,
        geometry: &SlotGeometry,
    ) -> GroupPlacement<'e> {
        let cap = self.settings.max_visible_chips.max(1);
        let (visible, hidden) = if group.len() <= cap {
            (group.events, Vec::new())
        } else {
            split_visible(group.events, cap)
        };

        let columns = visible.len();
        let chips: Vec<Chip> = visible
            .iter()
            .enumerate()
            .map(|(column, event)| self.build_chip(event, column, columns, geometry))
            .collect();

        let visible_bottom = chips
            .iter()
            .map(Chip::bottom)
            .fold(f64::NEG_INFINITY, f64::max);

        GroupPlacement {
            chips,
            hidden,
            visible_bottom,
        }
    }

    fn build_chip(
        &self,
        event: &Event,
        column: usize,
        columns: usize,
        geometry: &SlotGeometry,
    ) -> Chip {
        let width_pct = 100.0 / columns as f64;
        let session = event.session;

        Chip {
            session: session.clone(),
            top: event.top,
            height: event.chip_height,
            style: ChipStyle {
                left_pct: column as f64 * width_pct,
                width_pct,
                gap_px: self.settings.column_gap_px,
            },
            // Earlier columns draw on top
            z_index: self.settings.z_index_base + (columns - column) as i32,
            start_minutes: event.start,
            fill: chip_fill(
                &session.instructor_color,
                session.instructor_is_active,
                &self.settings.neutral_color,
            ),
            boundary_hint: boundary_hint(event, geometry),
        }
    }
}

/// Offset from the chip top of the next slot boundary, for sessions that
/// start mid-slot and run across it.
fn boundary_hint(event: &Event, geometry: &SlotGeometry) -> Option<f64> {
    if geometry.is_empty() {
        return None;
    }

    let index = geometry.slot_index(event.start);
    if geometry.slot_start(index) == event.start {
        return None;
    }

    let offset = geometry.slot_bottom(index) - event.top;
    (offset > 0.0 && offset < event.chip_height).then_some(offset)
}
