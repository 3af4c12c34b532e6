// Settings module
// Tunable constants of the session layout grid

use serde::{Deserialize, Serialize};

/// Pixel and density settings for the layout engine.
///
/// Every field has a default, so a partial TOML file only overrides what it
/// names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutSettings {
    /// Height of an unstretched grid row, in pixels
    pub base_row_height: f64,
    /// Session length used when the payload does not carry one
    pub default_session_duration: u32,
    /// Chips shown side by side in one collision group before overflowing
    pub max_visible_chips: usize,
    /// Horizontal gap subtracted from every chip column
    pub column_gap_px: f64,
    /// Minimum chip height is `base_row_height - chip_min_height_inset`
    pub chip_min_height_inset: f64,
    pub badge_height: f64,
    /// Vertical gap above each overflow badge
    pub badge_gap: f64,
    /// Side inset of full-width overflow badges
    pub badge_inset_px: f64,
    pub z_index_base: i32,
    /// Fill for instructors without colour tokens
    pub neutral_color: String,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            base_row_height: 44.0,
            default_session_duration: 30,
            max_visible_chips: 2,
            column_gap_px: 2.0,
            chip_min_height_inset: 8.0,
            badge_height: 22.0,
            badge_gap: 4.0,
            badge_inset_px: 4.0,
            z_index_base: 10,
            neutral_color: "#9ca3af".to_string(),
        }
    }
}

impl LayoutSettings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if !self.base_row_height.is_finite() || self.base_row_height <= 0.0 {
            return Err("Base row height must be a positive number".to_string());
        }

        if self.default_session_duration == 0 {
            return Err("Default session duration must be positive".to_string());
        }

        if self.max_visible_chips == 0 {
            return Err("At least one chip must be visible per collision group".to_string());
        }

        if !self.chip_min_height_inset.is_finite()
            || self.chip_min_height_inset < 0.0
            || self.chip_min_height_inset >= self.base_row_height
        {
            return Err("Chip height inset must be smaller than the base row height".to_string());
        }

        for (name, value) in [
            ("Column gap", self.column_gap_px),
            ("Badge gap", self.badge_gap),
            ("Badge inset", self.badge_inset_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} cannot be negative", name));
            }
        }

        if !self.badge_height.is_finite() || self.badge_height <= 0.0 {
            return Err("Badge height must be a positive number".to_string());
        }

        if self.neutral_color.trim().is_empty() {
            return Err("Neutral color cannot be empty".to_string());
        }

        Ok(())
    }

    /// Smallest readable chip height
    pub fn min_chip_height(&self) -> f64 {
        self.base_row_height - self.chip_min_height_inset
    }
}
