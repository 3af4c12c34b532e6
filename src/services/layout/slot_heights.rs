//! Two-pass slot height calculation shared by every day column.
//!
//! Pass 1 lays every day out on base-height rows and records how tall each
//! slot must be to hold what is anchored in it. Heights are merged across
//! days (the columns share one row grid) and pass 2 lays everything out
//! again on the merged grid.

use super::time_window::{resolve_slots, SlotGeometry};
use super::{DayColumn, LayoutEngine};
use crate::models::layout::{DayLayout, WeekLayout};
use crate::models::time_window::TimeWindow;

/// Collision groups depend only on minutes, never on slot heights, so the
/// second pass always settles. The third is a guard.
const MAX_PASSES: usize = 3;

/// Record the height each slot needs for one day's chips and badges.
///
/// An item is anchored in the slot containing its start minute. A chip may
/// legitimately run into the slots its time span covers, so their heights
/// are credited against it; a badge has to fit inside its anchor slot.
pub fn record_requirements(
    layout: &DayLayout,
    geometry: &SlotGeometry,
    duration_minutes: u32,
    required: &mut [f64],
) {
    if geometry.is_empty() {
        return;
    }

    for chip in &layout.chips {
        let anchor = geometry.slot_index(chip.start_minutes);
        let last_minute = chip.start_minutes.saturating_add(duration_minutes.max(1) - 1);
        let last = geometry.slot_index(last_minute).max(anchor);
        let spill: f64 = (anchor + 1..=last).map(|i| geometry.height(i)).sum();
        let need = chip.bottom() - geometry.slot_top(anchor) - spill;
        required[anchor] = required[anchor].max(need);
    }

    for badge in &layout.overflow_badges {
        let anchor = geometry.slot_index(badge.start_minutes);
        let need = badge.bottom() - geometry.slot_top(anchor);
        required[anchor] = required[anchor].max(need);
    }
}

/// Raise `heights` to `required` where needed. Returns whether anything grew.
pub fn merge_heights(heights: &mut [f64], required: &[f64]) -> bool {
    let mut grew = false;
    for (height, need) in heights.iter_mut().zip(required) {
        if *need > *height {
            *height = *need;
            grew = true;
        }
    }
    grew
}

impl LayoutEngine<'_> {
    pub(super) fn layout_columns(
        &self,
        columns: &[DayColumn<'_>],
        window: &TimeWindow,
        duration_minutes: u32,
    ) -> WeekLayout {
        let base = self.settings.base_row_height;
        let mut geometry =
            SlotGeometry::uniform(resolve_slots(window), window.interval_minutes, base);
        let mut pass = 1;

        let layouts = loop {
            let layouts: Vec<DayLayout> = columns
                .iter()
                .map(|column| self.layout_day(column, &geometry, duration_minutes))
                .collect();

            let mut required = vec![base; geometry.len()];
            for layout in &layouts {
                record_requirements(layout, &geometry, duration_minutes, &mut required);
            }

            let mut heights = geometry.heights().to_vec();
            if !merge_heights(&mut heights, &required) {
                break layouts;
            }

            if pass == MAX_PASSES {
                log::warn!(
                    "Slot heights still growing after {} passes; keeping last layout",
                    pass
                );
                break layouts;
            }

            geometry = SlotGeometry::with_heights(
                geometry.slots().to_vec(),
                geometry.interval_minutes(),
                base,
                heights,
            );
            pass += 1;
        };

        log::debug!(
            "Laid out {} day column(s) over {} slot(s) in {} pass(es), grid height {}px",
            columns.len(),
            geometry.len(),
            pass,
            geometry.total_height()
        );

        let slot_heights = geometry.height_map();
        columns
            .iter()
            .zip(layouts)
            .map(|(column, mut layout)| {
                layout.slot_heights = slot_heights.clone();
                layout.dropped = column.dropped;
                (column.date, layout)
            })
            .collect()
    }
}
