// Property-based tests for the week layout
// Random weeks must keep the partition, cap and height guarantees

use std::collections::BTreeMap;

use chrono::NaiveDate;
use proptest::prelude::*;
use session_layout::models::layout::DayLayout;
use session_layout::models::schedule::Day;
use session_layout::models::session::Session;
use session_layout::services::layout::collision::{group_collisions, Event};
use session_layout::services::layout::time_window::{resolve_slots, SlotGeometry};
use session_layout::services::layout::LayoutEngine;
use session_layout::{LayoutSettings, TimeWindow};

const NAMES: [&str; 6] = ["אבי", "בני", "דנה", "Zoe", "Amir", "נועה"];

fn session_strategy() -> impl Strategy<Value = (u32, usize)> {
    // Mostly in-window starts on a five minute grid, some outside
    ((84u32..=252).prop_map(|step| step * 5), 0..NAMES.len())
}

fn week_strategy() -> impl Strategy<Value = Vec<Vec<(u32, usize)>>> {
    prop::collection::vec(prop::collection::vec(session_strategy(), 0..12), 1..4)
}

fn build_days(week: &[Vec<(u32, usize)>]) -> Vec<Day> {
    let monday = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    week.iter()
        .enumerate()
        .map(|(d, sessions)| {
            let sessions = sessions
                .iter()
                .enumerate()
                .map(|(i, (start, name))| {
                    Session::new(format!("{}-{}", d, i), NAMES[*name], *start).unwrap()
                })
                .collect();
            Day::with_sessions(monday + chrono::Days::new(d as u64), sessions)
        })
        .collect()
}

/// Slot start -> (offset, height) from a layout's shared height map
fn slot_offsets(layout: &DayLayout) -> BTreeMap<u32, (f64, f64)> {
    let mut offset = 0.0;
    layout
        .slot_heights
        .iter()
        .map(|(&start, &height)| {
            let entry = (start, (offset, height));
            offset += height;
            entry
        })
        .collect()
}

/// Anchor slot start of a minute
fn anchor(offsets: &BTreeMap<u32, (f64, f64)>, minute: u32) -> u32 {
    offsets
        .range(..=minute)
        .next_back()
        .map(|(&start, _)| start)
        .unwrap_or(0)
}

proptest! {
    /// Property: every in-window session is shown exactly once, as a chip or
    /// inside a badge
    #[test]
    fn prop_sessions_are_partitioned(week in week_strategy(), duration in prop::sample::select(vec![15u32, 30, 45, 60])) {
        let settings = LayoutSettings::default();
        let engine = LayoutEngine::new(&settings);
        let window = TimeWindow::new(480, 1200);
        let days = build_days(&week);
        let layouts = engine.compute(&days, &window, duration);

        for day in &days {
            let layout = &layouts[&day.date];
            let mut expected: Vec<&str> = day
                .sessions
                .iter()
                .filter(|s| window.contains(s.start_minutes))
                .map(|s| s.student_id.as_str())
                .collect();
            let mut shown: Vec<&str> = layout.sessions().map(|s| s.student_id.as_str()).collect();
            expected.sort();
            shown.sort();
            prop_assert_eq!(&shown, &expected);
            prop_assert_eq!(
                layout.dropped.outside_window,
                day.sessions.len() - expected.len()
            );
        }
    }

    /// Property: no collision group shows more chips than the cap, and every
    /// member it does not show is handed to the overflow badges
    #[test]
    fn prop_collision_groups_respect_the_cap(
        starts in prop::collection::vec((96u32..=240).prop_map(|step| step * 5), 0..16),
        cap in 1usize..4,
        duration in prop::sample::select(vec![15u32, 30, 60]),
    ) {
        let settings = LayoutSettings {
            max_visible_chips: cap,
            ..LayoutSettings::default()
        };
        let engine = LayoutEngine::new(&settings);
        let window = TimeWindow::new(480, 1200);
        let geometry = SlotGeometry::uniform(resolve_slots(&window), window.interval_minutes, 44.0);
        let chip_height = engine.chip_height(&geometry, duration);

        let sessions: Vec<Session> = starts
            .iter()
            .enumerate()
            .map(|(i, start)| Session::new(i.to_string(), NAMES[i % NAMES.len()], *start).unwrap())
            .collect();
        let events: Vec<Event> = sessions
            .iter()
            .map(|session| Event::new(session, duration, &geometry, chip_height))
            .collect();

        let mut placed_total = 0;
        for group in group_collisions(events) {
            let group_len = group.len();
            let placement = engine.place_group(group, &geometry);
            let hidden: usize = placement.hidden.iter().map(|bucket| bucket.events.len()).sum();

            prop_assert!(placement.chips.len() <= cap);
            prop_assert_eq!(placement.chips.len(), group_len.min(cap));
            prop_assert_eq!(hidden, group_len - placement.chips.len());
            prop_assert!(placement.hidden.iter().all(|bucket| !bucket.events.is_empty()));
            prop_assert!(placement.hidden.windows(2).all(|pair| pair[0].start < pair[1].start));

            let width = 100.0 / placement.chips.len() as f64;
            prop_assert!(placement.chips.iter().all(|chip| chip.style.width_pct == width));
            placed_total += group_len;
        }
        prop_assert_eq!(placed_total, sessions.len());
    }

    /// Property: visible chips stay inside their day column
    #[test]
    fn prop_visible_columns_fit_the_day(week in week_strategy()) {
        let settings = LayoutSettings::default();
        let engine = LayoutEngine::new(&settings);
        let layouts = engine.compute(&build_days(&week), &TimeWindow::new(480, 1200), 30);

        let min_width = 100.0 / settings.max_visible_chips as f64;
        for layout in layouts.values() {
            for chip in &layout.chips {
                prop_assert!(chip.style.width_pct >= min_width);
                prop_assert!(chip.style.left_pct + chip.style.width_pct <= 100.0 + 1e-9);
            }
        }
    }

    /// Property: slots are tall enough for everything anchored in them
    #[test]
    fn prop_slot_heights_are_sufficient(week in week_strategy(), duration in prop::sample::select(vec![15u32, 30, 60])) {
        let settings = LayoutSettings::default();
        let engine = LayoutEngine::new(&settings);
        let layouts = engine.compute(&build_days(&week), &TimeWindow::new(480, 1200), duration);
        let eps = 1e-6;

        for layout in layouts.values() {
            let offsets = slot_offsets(layout);
            prop_assert!(layout.slot_heights.values().all(|h| *h >= settings.base_row_height));

            for chip in &layout.chips {
                let first = anchor(&offsets, chip.start_minutes);
                let last = anchor(&offsets, chip.start_minutes + duration - 1);
                let (top, _) = offsets[&first];
                let room: f64 = offsets.range(first..=last).map(|(_, (_, h))| h).sum();
                prop_assert!(chip.top >= top - eps);
                prop_assert!(chip.bottom() <= top + room + eps);
            }

            for badge in &layout.overflow_badges {
                let (top, height) = offsets[&anchor(&offsets, badge.start_minutes)];
                prop_assert!(badge.bottom() <= top + height + eps);
            }
        }
    }

    /// Property: a badge never covers a chip or another badge
    #[test]
    fn prop_badges_cover_nothing(week in week_strategy(), duration in prop::sample::select(vec![15u32, 30, 60])) {
        let settings = LayoutSettings::default();
        let engine = LayoutEngine::new(&settings);
        let layouts = engine.compute(&build_days(&week), &TimeWindow::new(480, 1200), duration);
        let eps = 1e-6;

        for layout in layouts.values() {
            for (i, badge) in layout.overflow_badges.iter().enumerate() {
                for chip in &layout.chips {
                    prop_assert!(badge.bottom() <= chip.top + eps || badge.top >= chip.bottom() - eps);
                }
                for other in &layout.overflow_badges[i + 1..] {
                    prop_assert!(badge.bottom() <= other.top + eps || badge.top >= other.bottom() - eps);
                }
            }
        }
    }

    /// Property: all days of a week share the same slot heights
    #[test]
    fn prop_days_share_slot_heights(week in week_strategy()) {
        let settings = LayoutSettings::default();
        let engine = LayoutEngine::new(&settings);
        let layouts = engine.compute(&build_days(&week), &TimeWindow::new(480, 1200), 30);

        let mut heights = layouts.values().map(|layout| &layout.slot_heights);
        if let Some(first) = heights.next() {
            for other in heights {
                prop_assert_eq!(first, other);
            }
        }
    }

    /// Property: the same input always gives byte-identical output, whatever
    /// the input order of sessions
    #[test]
    fn prop_layout_is_deterministic(week in week_strategy()) {
        let settings = LayoutSettings::default();
        let engine = LayoutEngine::new(&settings);
        let window = TimeWindow::new(480, 1200);
        let days = build_days(&week);

        let reversed: Vec<Day> = days
            .iter()
            .map(|day| {
                let mut day = day.clone();
                day.sessions.reverse();
                day
            })
            .collect();

        let first = serde_json::to_string(&engine.compute(&days, &window, 30)).unwrap();
        let again = serde_json::to_string(&engine.compute(&days, &window, 30)).unwrap();
        let shuffled = serde_json::to_string(&engine.compute(&reversed, &window, 30)).unwrap();
        prop_assert_eq!(&first, &again);
        prop_assert_eq!(&first, &shuffled);
    }

    /// Property: chips come out in display order
    #[test]
    fn prop_chips_sorted_by_top(week in week_strategy()) {
        let settings = LayoutSettings::default();
        let engine = LayoutEngine::new(&settings);
        let layouts = engine.compute(&build_days(&week), &TimeWindow::new(480, 1200), 30);

        for layout in layouts.values() {
            for pair in layout.chips.windows(2) {
                prop_assert!(pair[0].top <= pair[1].top);
            }
        }
    }
}
