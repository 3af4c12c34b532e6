//! Instructor colour tokens to chip fills.
//!
//! The provider sends `instructorColor` as comma-joined tokens. Zero tokens
//! fall back to the neutral colour, one token is a solid fill and several
//! become ordered gradient stops. Inactive instructors keep their colours
//! but get the stripe overlay.

use crate::models::layout::{ChipFill, Paint};

const LIGHT_TEXT: &str = "#ffffff";
const DARK_TEXT: &str = "#141c2d";

/// Split a raw colour string into trimmed, non-empty tokens.
pub fn parse_color_tokens(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build the fill for an instructor colour string.
pub fn chip_fill(raw: &str, instructor_is_active: bool, neutral: &str) -> ChipFill {
    let mut tokens = parse_color_tokens(raw);
    let paint = match tokens.len() {
        0 => Paint::Solid {
            color: neutral.to_string(),
        },
        1 => Paint::Solid {
            color: tokens.remove(0),
        },
        _ => Paint::Gradient { stops: tokens },
    };

    let text_color = readable_text_color(&paint).to_string();

    ChipFill {
        paint,
        striped: !instructor_is_active,
        text_color,
    }
}

/// Parse a hex colour string (`#RRGGBB`, `RRGGBB` or `#RGB`).
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim().trim_start_matches('#');
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
            let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
            let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            let expand = |range: std::ops::Range<usize>| -> Option<u8> {
                u8::from_str_radix(hex.get(range)?, 16).ok().map(|v| v * 17)
            };
            Some((expand(0..1)?, expand(1..2)?, expand(2..3)?))
        }
        _ => None,
    }
}

/// Pick a label colour that stays readable on the paint. Gradients are
/// judged by their average; named colours are assumed mid-tone.
fn readable_text_color(paint: &Paint) -> &'static str {
    let stops: Vec<(u8, u8, u8)> = match paint {
        Paint::Solid { color } => parse_hex_color(color).into_iter().collect(),
        Paint::Gradient { stops } => stops.iter().filter_map(|s| parse_hex_color(s)).collect(),
    };

    if stops.is_empty() {
        return DARK_TEXT;
    }

    let luminance =
        stops.iter().map(|&rgb| relative_luminance(rgb)).sum::<f32>() / stops.len() as f32;
    if luminance > 0.5 {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

fn relative_luminance((r, g, b): (u8, u8, u8)) -> f32 {
    fn srgb_component(value: u8) -> f32 {
        let channel = value as f32 / 255.0;
        if channel <= 0.03928 {
            channel / 12.92
        } else {
            ((channel + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * srgb_component(r) + 0.7152 * srgb_component(g) + 0.0722 * srgb_component(b)
}
