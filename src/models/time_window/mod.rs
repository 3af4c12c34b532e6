// Time window module
// The visible portion of the day and the grid granularity

use serde::{Deserialize, Serialize};

use super::session::MINUTES_PER_DAY;

/// Grid interval used when the provider does not send one.
pub const DEFAULT_INTERVAL_MINUTES: u32 = 30;

fn default_interval() -> u32 {
    DEFAULT_INTERVAL_MINUTES
}

/// Grid boundaries (`[start_minutes, end_minutes]`, both inclusive for
/// session filtering) and slot granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub start_minutes: i32,
    pub end_minutes: i32,
    #[serde(default = "default_interval")]
    pub interval_minutes: u32,
}

impl TimeWindow {
    /// A window that resolves to no slots at all.
    pub const EMPTY: TimeWindow = TimeWindow {
        start_minutes: 0,
        end_minutes: 0,
        interval_minutes: DEFAULT_INTERVAL_MINUTES,
    };

    /// Create a window with the default 30 minute interval
    pub fn new(start_minutes: i32, end_minutes: i32) -> Self {
        Self {
            start_minutes,
            end_minutes,
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
        }
    }

    pub fn with_interval(mut self, interval_minutes: u32) -> Self {
        self.interval_minutes = interval_minutes;
        self
    }

    /// Validate the window bounds
    pub fn validate(&self) -> Result<(), String> {
        if self.interval_minutes == 0 {
            return Err("Time window interval must be positive".to_string());
        }

        let day = 0..=MINUTES_PER_DAY as i32;
        if !day.contains(&self.start_minutes) || !day.contains(&self.end_minutes) {
            return Err(format!(
                "Time window {}..{} is outside the day",
                self.start_minutes, self.end_minutes
            ));
        }

        if self.end_minutes <= self.start_minutes {
            return Err("Time window end must be after start".to_string());
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Whether a session starting at `minute` is rendered in this window.
    pub fn contains(&self, minute: u32) -> bool {
        let minute = minute as i64;
        self.is_valid()
            && minute >= self.start_minutes as i64
            && minute <= self.end_minutes as i64
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        // 08:00 - 20:00, the provider's usual working window
        Self::new(480, 1200)
    }
}
