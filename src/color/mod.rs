//! Color handling: the [`Rgb`] value type, value-to-color scales, and
//! foreground contrast selection.
//!
//! - Sequential and diverging palettes
//! - Continuous interpolation or equal-width / quantile buckets
//! - Dark/light text choice from relative luminance

pub mod contrast;
pub mod rgb;
pub mod scale;

pub use contrast::{ContrastPair, DARK_TEXT, LIGHT_TEXT, contrast_color};
pub use rgb::Rgb;
pub use scale::{ColorScale, LegendEntry, Palette, ScaleMode};
