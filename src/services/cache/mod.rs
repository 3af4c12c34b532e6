//! Call-site memo for week layouts.
//!
//! The engine itself never caches. A view that re-renders with unchanged
//! input asks this cache instead, which keys the input by a blake3 digest of
//! its canonical JSON and keeps only the last result.

use std::sync::Arc;

use serde::Serialize;

use crate::models::layout::WeekLayout;
use crate::models::schedule::{Day, Schedule};
use crate::models::settings::LayoutSettings;
use crate::models::time_window::TimeWindow;
use crate::services::layout::LayoutEngine;

/// Content digest of one engine input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutCacheKey([u8; 32]);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyInput<'a> {
    days: &'a [Day],
    time_window: &'a TimeWindow,
    session_duration: u32,
    settings: &'a LayoutSettings,
}

impl LayoutCacheKey {
    pub fn new(
        days: &[Day],
        window: &TimeWindow,
        session_duration: u32,
        settings: &LayoutSettings,
    ) -> serde_json::Result<Self> {
        let bytes = serde_json::to_vec(&KeyInput {
            days,
            time_window: window,
            session_duration,
            settings,
        })?;
        Ok(Self(*blake3::hash(&bytes).as_bytes()))
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|byte| format!("{:02x}", byte)).collect()
    }
}

/// Hit/miss counters since creation or the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutCacheStats {
    pub hits: u64,
    pub misses: u64,
    /// `hits / (hits + misses)`, zero before the first lookup
    pub hit_rate: f64,
}

/// Single-entry layout memo.
#[derive(Debug, Default)]
pub struct LayoutCache {
    last: Option<(LayoutCacheKey, Arc<WeekLayout>)>,
    hits: u64,
    misses: u64,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the stored layout when `key` matches, otherwise compute and
    /// store the new one.
    pub fn get_or_compute<F>(&mut self, key: LayoutCacheKey, compute: F) -> Arc<WeekLayout>
    where
        F: FnOnce() -> WeekLayout,
    {
        if let Some((cached_key, layout)) = &self.last {
            if *cached_key == key {
                self.hits += 1;
                return Arc::clone(layout);
            }
        }

        self.misses += 1;
        log::debug!("Layout cache miss for {}", key.to_hex());
        let layout = Arc::new(compute());
        self.last = Some((key, Arc::clone(&layout)));
        layout
    }

    /// Memoised [`LayoutEngine::compute`].
    pub fn layout(
        &mut self,
        engine: &LayoutEngine<'_>,
        days: &[Day],
        window: &TimeWindow,
        session_duration: u32,
    ) -> Arc<WeekLayout> {
        match LayoutCacheKey::new(days, window, session_duration, engine.settings()) {
            Ok(key) => self.get_or_compute(key, || engine.compute(days, window, session_duration)),
            Err(e) => {
                log::warn!("Could not key layout input ({}); computing uncached", e);
                self.misses += 1;
                Arc::new(engine.compute(days, window, session_duration))
            }
        }
    }

    /// Memoised [`LayoutEngine::layout_schedule`].
    pub fn layout_schedule(
        &mut self,
        engine: &LayoutEngine<'_>,
        schedule: &Schedule,
    ) -> Arc<WeekLayout> {
        let duration = engine.effective_duration(schedule.session_duration_minutes);
        self.layout(engine, &schedule.days, &schedule.time_window, duration)
    }

    pub fn stats(&self) -> LayoutCacheStats {
        let total = self.hits + self.misses;
        LayoutCacheStats {
            hits: self.hits,
            misses: self.misses,
            hit_rate: if total == 0 {
                0.0
            } else {
                self.hits as f64 / total as f64
            },
        }
    }

    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    /// Drop the stored layout; the next lookup recomputes.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }
}
