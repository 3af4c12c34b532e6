//! Slot resolution and the minute-to-pixel mapping of the row grid.

use std::collections::BTreeMap;

use crate::models::time_window::TimeWindow;

/// Ordered slot start minutes for a window: `start, start + interval, ...`
/// up to `end`, including `end` when it is interval-aligned.
///
/// An invalid window (reversed, zero interval, outside the day) resolves to
/// no slots, which callers treat as "nothing to render".
pub fn resolve_slots(window: &TimeWindow) -> Vec<u32> {
    if let Err(reason) = window.validate() {
        log::debug!("Time window resolves to no slots: {}", reason);
        return Vec::new();
    }

    let start = window.start_minutes as u32;
    let end = window.end_minutes as u32;
    (start..=end)
        .step_by(window.interval_minutes as usize)
        .collect()
}

/// Vertical geometry of the row grid: slot heights and their cumulative
/// offsets.
///
/// Inside a slot, minutes advance at `base_row_height / interval` pixels per
/// minute no matter how tall the slot has grown; the extra height sits at
/// the bottom of the slot. The mapping is strictly increasing in minutes, so
/// which events overlap never depends on the slot heights.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotGeometry {
    slots: Vec<u32>,
    heights: Vec<f64>,
    offsets: Vec<f64>,
    base_row_height: f64,
    interval_minutes: u32,
}

impl SlotGeometry {
    /// Every slot at the base row height (first pass).
    pub fn uniform(slots: Vec<u32>, interval_minutes: u32, base_row_height: f64) -> Self {
        let heights = vec![base_row_height; slots.len()];
        Self::with_heights(slots, interval_minutes, base_row_height, heights)
    }

    /// Slots with merged heights (second pass).
    pub fn with_heights(
        slots: Vec<u32>,
        interval_minutes: u32,
        base_row_height: f64,
        heights: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(slots.len(), heights.len());

        let mut offsets = Vec::with_capacity(heights.len());
        let mut y = 0.0;
        for height in &heights {
            offsets.push(y);
            y += height;
        }

        Self {
            slots,
            heights,
            offsets,
            base_row_height,
            interval_minutes: interval_minutes.max(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[u32] {
        &self.slots
    }

    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    pub fn slot_start(&self, index: usize) -> u32 {
        self.slots[index]
    }

    pub fn slot_top(&self, index: usize) -> f64 {
        self.offsets[index]
    }

    pub fn height(&self, index: usize) -> f64 {
        self.heights[index]
    }

    /// Y of the boundary below slot `index`
    pub fn slot_bottom(&self, index: usize) -> f64 {
        self.offsets[index] + self.heights[index]
    }

    pub fn total_height(&self) -> f64 {
        self.heights.iter().sum()
    }

    /// Index of the slot containing `minute`. Minutes past the last slot
    /// start belong to the last slot; minutes before the first to the first.
    pub fn slot_index(&self, minute: u32) -> usize {
        self.slots
            .partition_point(|&start| start <= minute)
            .saturating_sub(1)
    }

    /// Pixel length of a duration at the in-slot rate
    pub fn span(&self, minutes: u32) -> f64 {
        minutes as f64 * self.base_row_height / self.interval_minutes as f64
    }

    pub fn interval_minutes(&self) -> u32 {
        self.interval_minutes
    }

    /// Pixel Y of a minute.
    pub fn y(&self, minute: u32) -> f64 {
        if self.slots.is_empty() {
            return 0.0;
        }

        let index = self.slot_index(minute);
        let into_slot = minute.saturating_sub(self.slots[index]);
        self.offsets[index] + self.span(into_slot)
    }

    /// Slot start minute to height, as reported to the renderer
    pub fn height_map(&self) -> BTreeMap<u32, f64> {
        self.slots
            .iter()
            .copied()
            .zip(self.heights.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_slots_inclusive_aligned_end() {
        let slots = resolve_slots(&TimeWindow::new(480, 600));
        assert_eq!(slots, vec![480, 510, 540, 570, 600]);
    }

    #[test]
    fn test_resolve_slots_unaligned_end() {
        let slots = resolve_slots(&TimeWindow::new(480, 590));
        assert_eq!(slots, vec![480, 510, 540, 570]);
    }

    #[test]
    fn test_resolve_slots_custom_interval() {
        let slots = resolve_slots(&TimeWindow::new(600, 660).with_interval(15));
        assert_eq!(slots, vec![600, 615, 630, 645, 660]);
    }

    #[test]
    fn test_resolve_slots_invalid_windows_are_empty() {
        assert!(resolve_slots(&TimeWindow::new(600, 600)).is_empty());
        assert!(resolve_slots(&TimeWindow::new(700, 600)).is_empty());
        assert!(resolve_slots(&TimeWindow::new(-60, 600)).is_empty());
        assert!(resolve_slots(&TimeWindow::new(480, 600).with_interval(0)).is_empty());
        assert!(resolve_slots(&TimeWindow::EMPTY).is_empty());
    }

    #[test]
    fn test_uniform_geometry_positions() {
        let geometry = SlotGeometry::uniform(vec![480, 510, 540], 30, 44.0);
        assert_eq!(geometry.y(480), 0.0);
        assert_eq!(geometry.y(495), 22.0);
        assert_eq!(geometry.y(510), 44.0);
        assert_eq!(geometry.y(540), 88.0);
        assert_eq!(geometry.total_height(), 132.0);
    }

    #[test]
    fn test_grown_slot_keeps_in_slot_rate() {
        let geometry =
            SlotGeometry::with_heights(vec![480, 510, 540], 30, 44.0, vec![44.0, 70.0, 44.0]);
        assert_eq!(geometry.y(525), 44.0 + 22.0);
        assert_eq!(geometry.y(540), 114.0);
        assert_eq!(geometry.slot_bottom(1), 114.0);
    }

    #[test]
    fn test_slot_index() {
        let geometry = SlotGeometry::uniform(vec![480, 510, 540], 30, 44.0);
        assert_eq!(geometry.slot_index(480), 0);
        assert_eq!(geometry.slot_index(509), 0);
        assert_eq!(geometry.slot_index(510), 1);
        assert_eq!(geometry.slot_index(560), 2);
        assert_eq!(geometry.slot_index(900), 2);
        assert_eq!(geometry.slot_index(100), 0);
    }

    #[test]
    fn test_y_is_strictly_increasing_across_grown_boundaries() {
        let geometry =
            SlotGeometry::with_heights(vec![480, 510, 540], 30, 44.0, vec![90.0, 44.0, 60.0]);
        let ys: Vec<f64> = (480..600).map(|m| geometry.y(m)).collect();
        assert!(ys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_height_map() {
        let geometry = SlotGeometry::uniform(vec![480, 510], 30, 44.0);
        let map = geometry.height_map();
        assert_eq!(map.get(&480), Some(&44.0));
        assert_eq!(map.len(), 2);
    }
}
