//! Tick label text: formatting and pixel-width estimation.

use num_format::{Locale, ToFormattedString};

/// Default label font size in pixels.
pub const DEFAULT_FONT_PX: u32 = 11;

/// Gap kept between neighbouring labels, in pixels.
pub const LABEL_GAP_PX: u32 = 4;

/// Heuristic: estimate pixel width of text (no font metrics available here).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Format a tick value: thousands grouping from 1000 up, otherwise up to two
/// decimals depending on magnitude, trailing zeros trimmed.
pub fn format_tick(v: f64) -> String {
    if !v.is_finite() {
        return "NA".to_string();
    }
    let a = v.abs();
    if a >= 1000.0 {
        return (v.round() as i64).to_formatted_string(&Locale::en);
    }
    let prec = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    let s = format!("{:.*}", prec, v);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };
    if s == "-0" { "0".to_string() } else { s }
}

/// Spacing wide enough for the widest formatted label plus [`LABEL_GAP_PX`].
pub fn min_label_distance_for(values: &[f64], font_px: u32) -> f64 {
    let widest = values
        .iter()
        .map(|v| estimate_text_width_px(&format_tick(*v), font_px))
        .max()
        .unwrap_or(font_px);
    (widest + LABEL_GAP_PX) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_format_by_magnitude() {
        assert_eq!(format_tick(30000.0), "30,000");
        assert_eq!(format_tick(250.4), "250");
        assert_eq!(format_tick(12.34), "12.3");
        assert_eq!(format_tick(0.5), "0.5");
        assert_eq!(format_tick(2.0), "2");
        assert_eq!(format_tick(-0.001), "0");
        assert_eq!(format_tick(f64::NAN), "NA");
    }

    #[test]
    fn distance_tracks_the_widest_label() {
        // "10,000" is 6 chars at 10px -> 36px, plus the gap
        assert_eq!(min_label_distance_for(&[1.0, 10000.0], 10), 40.0);
        assert_eq!(min_label_distance_for(&[], 10), 14.0);
    }
}
