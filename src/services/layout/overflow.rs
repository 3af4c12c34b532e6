//! "+N more" badges for the hidden part of a collision group.

use super::placement::StartBucket;
use super::time_window::SlotGeometry;
use super::LayoutEngine;
use crate::models::layout::{BadgePlacement, DayLayout, OverflowBadge, StatusCounts};
use crate::models::session::Session;

impl LayoutEngine<'_> {
    /// One badge per hidden start minute, stacked below the group's lowest
    /// visible chip in start-time order. Each badge owns its own row so
    /// expanding one never moves another.
    pub fn aggregate_overflow(
        &self,
        hidden: Vec<StartBucket<'_>>,
        visible_bottom: f64,
    ) -> Vec<OverflowBadge> {
        let settings = self.settings;
        let step = settings.badge_height + settings.badge_gap;

        hidden
            .into_iter()
            .filter(|bucket| !bucket.events.is_empty())
            .enumerate()
            .map(|(row, bucket)| {
                let sessions: Vec<Session> = bucket
                    .events
                    .iter()
                    .map(|event| event.session.clone())
                    .collect();
                let status_counts: StatusCounts = sessions.iter().collect();

                OverflowBadge {
                    top: visible_bottom + settings.badge_gap + row as f64 * step,
                    height: settings.badge_height,
                    start_minutes: bucket.start,
                    placement: BadgePlacement::full_width(settings.badge_inset_px),
                    status_counts,
                    sessions,
                }
            })
            .collect()
    }

    /// Move badges down until none covers a chip or an earlier badge.
    ///
    /// Short sessions let a later collision group start inside the slot of
    /// an earlier group's badges, and full-width badges would sit on top of
    /// its chips. Only items anchored in the badge's slot or before it count:
    /// the badge's slot is grown to hold it, so later slots start below it.
    pub fn settle_badges(&self, layout: &mut DayLayout, geometry: &SlotGeometry) {
        if geometry.is_empty() {
            return;
        }

        let gap = self.settings.badge_gap;
        for index in 0..layout.overflow_badges.len() {
            let (placed, rest) = layout.overflow_badges.split_at_mut(index);
            let badge = &mut rest[0];
            let anchor = geometry.slot_index(badge.start_minutes);

            let obstacles: Vec<(f64, f64)> = layout
                .chips
                .iter()
                .filter(|chip| geometry.slot_index(chip.start_minutes) <= anchor)
                .map(|chip| (chip.top, chip.bottom()))
                .chain(
                    placed
                        .iter()
                        .filter(|other| geometry.slot_index(other.start_minutes) <= anchor)
                        .map(|other| (other.top, other.bottom())),
                )
                .collect();

            // Every move clears the obstacles it jumped, so this ends
            loop {
                let (top, bottom) = (badge.top, badge.bottom());
                let covered = obstacles
                    .iter()
                    .filter(|&&(other_top, other_bottom)| other_top < bottom && other_bottom > top)
                    .map(|&(_, other_bottom)| other_bottom)
                    .reduce(f64::max);
                match covered {
                    Some(lowest) => badge.top = lowest + gap,
                    None => break,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::SessionStatus;
    use crate::models::settings::LayoutSettings;
    use crate::services::layout::collision::Event;
    use crate::services::layout::time_window::SlotGeometry;

    fn session(id: &str, start: u32, status: SessionStatus) -> Session {
        Session::builder()
            .student(id, id)
            .start_minutes(start)
            .status(status)
            .build()
            .unwrap()
    }

    fn bucket<'a>(sessions: &'a [Session], geometry: &SlotGeometry) -> StartBucket<'a> {
        StartBucket {
            start: sessions[0].start_minutes,
            events: sessions
                .iter()
                .map(|s| Event::new(s, 30, geometry, 44.0))
                .collect(),
        }
    }

    #[test]
    fn test_one_badge_per_start_time() {
        let settings = LayoutSettings::default();
        let engine = LayoutEngine::new(&settings);
        let geometry = SlotGeometry::uniform(vec![600, 630], 30, 44.0);

        let at_ten = vec![
            session("a", 600, SessionStatus::Missing),
            session("b", 600, SessionStatus::Missing),
            session("c", 600, SessionStatus::Complete),
        ];
        let at_quarter = vec![session("d", 615, SessionStatus::Upcoming)];

        let badges = engine.aggregate_overflow(
            vec![bucket(&at_ten, &geometry), bucket(&at_quarter, &geometry)],
            44.0,
        );

        assert_eq!(badges.len(), 2);
        assert_eq!(badges[0].start_minutes, 600);
        assert_eq!(badges[0].sessions.len(), 3);
        assert_eq!(badges[0].status_counts.missing, 2);
        assert_eq!(badges[0].status_counts.complete, 1);
        assert_eq!(badges[1].start_minutes, 615);
        assert_eq!(badges[1].sessions.len(), 1);
        assert_eq!(badges[1].label(), "+1 more");
    }

    #[test]
    fn test_badges_stack_below_visible_chips() {
        let settings = LayoutSettings::default();
        let engine = LayoutEngine::new(&settings);
        let geometry = SlotGeometry::uniform(vec![600, 630], 30, 44.0);

        let first = vec![session("a", 600, SessionStatus::Upcoming)];
        let second = vec![session("b", 620, SessionStatus::Upcoming)];
        let badges = engine.aggregate_overflow(
            vec![bucket(&first, &geometry), bucket(&second, &geometry)],
            44.0,
        );

        assert_eq!(badges[0].top, 48.0);
        assert_eq!(badges[1].top, 48.0 + 22.0 + 4.0);
        assert!(badges[1].top >= badges[0].bottom());
        assert_eq!(badges[0].placement, BadgePlacement::full_width(4.0));
    }

    #[test]
    fn test_badge_moves_below_next_group_in_same_slot() {
        let settings = LayoutSettings::default();
        let engine = LayoutEngine::new(&settings);
        let geometry = SlotGeometry::uniform(vec![600, 630], 30, 44.0);
        let sessions = vec![
            session("a", 600, SessionStatus::Upcoming),
            session("b", 600, SessionStatus::Upcoming),
            session("c", 600, SessionStatus::Upcoming),
            session("d", 615, SessionStatus::Upcoming),
        ];
        let column = crate::services::layout::DayColumn {
            date: chrono::NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            sessions: sessions.iter().collect(),
            dropped: Default::default(),
        };

        // 15 minute sessions: 10:00 chips 0..36, 10:15 chip 22..58
        let layout = engine.layout_day(&column, &geometry, 15);
        assert_eq!(layout.chips.len(), 3);
        let badge = &layout.overflow_badges[0];
        let quarter_chip = layout.chips.iter().find(|c| c.start_minutes == 615).unwrap();

        assert_eq!(quarter_chip.top, 22.0);
        assert_eq!(badge.top, quarter_chip.bottom() + 4.0);
        for chip in &layout.chips {
            assert!(badge.top >= chip.bottom() || badge.bottom() <= chip.top);
        }
    }

    #[test]
    fn test_badge_ignores_chips_of_later_slots() {
        let settings = LayoutSettings::default();
        let engine = LayoutEngine::new(&settings);
        let geometry = SlotGeometry::uniform(vec![600, 630], 30, 44.0);
        let sessions = vec![
            session("a", 600, SessionStatus::Upcoming),
            session("b", 600, SessionStatus::Upcoming),
            session("c", 600, SessionStatus::Upcoming),
            session("d", 630, SessionStatus::Upcoming),
        ];
        let column = crate::services::layout::DayColumn {
            date: chrono::NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            sessions: sessions.iter().collect(),
            dropped: Default::default(),
        };

        // The 10:30 chip overlaps the badge only until the 10:00 slot grows
        let layout = engine.layout_day(&column, &geometry, 30);
        assert_eq!(layout.overflow_badges[0].top, 48.0);
    }

    #[test]
    fn test_no_hidden_events_no_badges() {
        let settings = LayoutSettings::default();
        let engine = LayoutEngine::new(&settings);
        assert!(engine.aggregate_overflow(Vec::new(), 44.0).is_empty());
    }
}
