//! Chart configuration with defaults, loaded from JSON.
//!
//! Keys are camelCase and every key is optional:
//!
//! ```json
//! { "totalUnits": 100, "paletteMode": "diverging", "scaleType": "binned",
//!   "divisions": 5, "colorLow": "#CA0020", "colorMid": "#F7F7F7",
//!   "colorHigh": "#0571B0", "midpoint": 0, "useLogScale": true }
//! ```
//!
//! Defaults are applied here, once; the layout and color functions only ever
//! see explicit values.

use crate::color::{ColorScale, ContrastPair, DARK_TEXT, LIGHT_TEXT, Palette, Rgb, ScaleMode};
use crate::error::{Error, Result};
use crate::range::{BarAxis, OpenEnds, RangeOptions};
use crate::text::DEFAULT_FONT_PX;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteMode {
    #[default]
    Sequential,
    Diverging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    #[default]
    Continuous,
    Binned,
}

/// How binned scales place their bucket boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Binning {
    /// Equal-width buckets over the domain.
    #[default]
    EqualWidth,
    /// Equal-population buckets from the data.
    Quantile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartConfig {
    pub total_units: u32,
    pub palette_mode: PaletteMode,
    pub scale_type: ScaleType,
    pub binning: Binning,
    pub divisions: usize,
    pub color_min: Rgb,
    pub color_max: Rgb,
    pub color_low: Rgb,
    pub color_mid: Rgb,
    pub color_high: Rgb,
    pub midpoint: Option<f64>,
    pub dark_text: Rgb,
    pub light_text: Rgb,
    pub use_log_scale: bool,
    pub open_start_range: bool,
    pub open_end_range: bool,
    pub min_label_distance: Option<f64>,
    pub label_font_px: u32,
    pub element_size: f64,
    pub min_element_size: Option<f64>,
    pub max_element_size: Option<f64>,
    pub spacing_h: f64,
    pub spacing_v: f64,
    pub available_width: f64,
    pub available_height: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            total_units: crate::allocate::DEFAULT_TOTAL_UNITS,
            palette_mode: PaletteMode::Sequential,
            scale_type: ScaleType::Continuous,
            binning: Binning::EqualWidth,
            divisions: 5,
            color_min: Rgb::new(0xDE, 0xEB, 0xF7),
            color_max: Rgb::new(0x08, 0x51, 0x9C),
            color_low: Rgb::new(0xCA, 0x00, 0x20),
            color_mid: Rgb::new(0xF7, 0xF7, 0xF7),
            color_high: Rgb::new(0x05, 0x71, 0xB0),
            midpoint: None,
            dark_text: DARK_TEXT,
            light_text: LIGHT_TEXT,
            use_log_scale: false,
            open_start_range: false,
            open_end_range: false,
            min_label_distance: None,
            label_font_px: DEFAULT_FONT_PX,
            element_size: 20.0,
            min_element_size: None,
            max_element_size: None,
            spacing_h: 4.0,
            spacing_v: 4.0,
            available_width: 600.0,
            available_height: 400.0,
        }
    }
}

impl ChartConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: ChartConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json_str(&s)
    }

    /// Reject values no chart can be built from.
    pub fn validate(&self) -> Result<()> {
        if self.total_units == 0 {
            return Err(Error::InvalidConfig("totalUnits must be at least 1".into()));
        }
        if self.divisions == 0 {
            return Err(Error::InvalidConfig("divisions must be at least 1".into()));
        }
        let sizes = [
            ("elementSize", Some(self.element_size)),
            ("minElementSize", self.min_element_size),
            ("maxElementSize", self.max_element_size),
            ("spacingH", Some(self.spacing_h)),
            ("spacingV", Some(self.spacing_v)),
            ("availableWidth", Some(self.available_width)),
            ("availableHeight", Some(self.available_height)),
            ("minLabelDistance", self.min_label_distance),
        ];
        for (name, value) in sizes {
            if let Some(v) = value
                && (!v.is_finite() || v < 0.0)
            {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {v}"
                )));
            }
        }
        if let Some(m) = self.midpoint
            && !m.is_finite()
        {
            return Err(Error::InvalidConfig(format!("midpoint must be finite, got {m}")));
        }
        Ok(())
    }

    pub fn palette(&self) -> Palette {
        match self.palette_mode {
            PaletteMode::Sequential => Palette::Sequential {
                min: self.color_min,
                max: self.color_max,
            },
            PaletteMode::Diverging => Palette::Diverging {
                low: self.color_low,
                mid: self.color_mid,
                high: self.color_high,
                midpoint: self.midpoint,
            },
        }
    }

    pub fn scale_mode(&self) -> ScaleMode {
        match self.scale_type {
            ScaleType::Continuous => ScaleMode::Continuous,
            ScaleType::Binned => ScaleMode::Binned {
                divisions: self.divisions,
            },
        }
    }

    pub fn contrast(&self) -> ContrastPair {
        ContrastPair::new(self.dark_text, self.light_text)
    }

    pub fn open_ends(&self) -> OpenEnds {
        OpenEnds {
            start: self.open_start_range,
            end: self.open_end_range,
        }
    }

    /// Color scale for a set of data values: the domain is their extent, and
    /// quantile binning uses the values themselves as the sample.
    pub fn color_scale_for(&self, values: &[f64]) -> ColorScale {
        match (self.scale_type, self.binning) {
            (ScaleType::Binned, Binning::Quantile) => {
                ColorScale::quantile(values, self.divisions, self.palette())
            }
            _ => {
                let domain = crate::stats::extent(values).unwrap_or((0.0, 0.0));
                ColorScale::build(domain, self.scale_mode(), self.palette())
            }
        }
    }

    /// Range-chart options with the bar and value axis both spanning the
    /// available width.
    pub fn range_options(&self) -> RangeOptions {
        RangeOptions {
            use_log: self.use_log_scale,
            open: self.open_ends(),
            bar: BarAxis::new(0.0, self.available_width),
            value_axis: (0.0, self.available_width),
            extent: None,
            min_label_distance: self.min_label_distance,
            label_font_px: self.label_font_px,
        }
    }
}
