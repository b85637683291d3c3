//! Foreground color selection for text drawn over a fill.

use super::Rgb;
use serde::{Deserialize, Serialize};

/// Luminance above which a background counts as light.
pub const LUMINANCE_THRESHOLD: f64 = 0.5;

/// Default text color over light fills.
pub const DARK_TEXT: Rgb = Rgb::new(0x1A, 0x1A, 0x1A);

/// Default text color over dark fills.
pub const LIGHT_TEXT: Rgb = Rgb::WHITE;

/// The two foreground colors text can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContrastPair {
    pub dark: Rgb,
    pub light: Rgb,
}

impl Default for ContrastPair {
    fn default() -> Self {
        Self {
            dark: DARK_TEXT,
            light: LIGHT_TEXT,
        }
    }
}

impl ContrastPair {
    pub fn new(dark: Rgb, light: Rgb) -> Self {
        Self { dark, light }
    }

    /// Dark text when the background luminance is strictly above 0.5, light otherwise.
    pub fn pick(&self, background: Rgb) -> Rgb {
        if background.luminance() > LUMINANCE_THRESHOLD {
            self.dark
        } else {
            self.light
        }
    }
}

/// Legible text color over `background` using the default dark/light pair.
pub fn contrast_color(background: Rgb) -> Rgb {
    ContrastPair::default().pick(background)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_and_white_extremes() {
        assert_eq!(contrast_color(Rgb::BLACK), LIGHT_TEXT);
        assert_eq!(contrast_color(Rgb::WHITE), DARK_TEXT);
    }

    #[test]
    fn mid_gray_sits_on_the_light_side_of_the_threshold() {
        // 127/255 ~ 0.498, 128/255 ~ 0.502
        assert_eq!(contrast_color(Rgb::new(127, 127, 127)), LIGHT_TEXT);
        assert_eq!(contrast_color(Rgb::new(128, 128, 128)), DARK_TEXT);
    }

    #[test]
    fn green_weighs_more_than_blue() {
        // pure green: 0.587 -> dark text; pure blue: 0.114 -> light text
        assert_eq!(contrast_color(Rgb::new(0, 255, 0)), DARK_TEXT);
        assert_eq!(contrast_color(Rgb::new(0, 0, 255)), LIGHT_TEXT);
    }
}
