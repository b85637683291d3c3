//! Numeric value axis: linear or base-10 logarithmic mapping to pixels.
//!
//! A log axis cannot show values at or below zero, so a non-positive lower
//! extent is raised to [`LOG_FLOOR`] when the scale is built. The clamped
//! extent is stored on the scale and is the only one any caller should use.

use log::warn;
use serde::{Deserialize, Serialize};

/// Lowest value a log axis starts at when the data extent reaches zero or below.
pub const LOG_FLOOR: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    Linear,
    Log,
}

/// Maps domain values onto a pixel range. Values outside the domain are
/// extrapolated, not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    kind: ScaleKind,
    domain: (f64, f64),
    range: (f64, f64),
    floored: bool,
}

impl ValueScale {
    /// Build a scale for `extent` onto the pixel interval `range`.
    pub fn new(extent: (f64, f64), use_log: bool, range: (f64, f64)) -> Self {
        if use_log {
            Self::log(extent, range)
        } else {
            Self::linear(extent, range)
        }
    }

    pub fn linear(extent: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            kind: ScaleKind::Linear,
            domain: ordered(finite_or_zero(extent.0), finite_or_zero(extent.1)),
            range,
            floored: false,
        }
    }

    pub fn log(extent: (f64, f64), range: (f64, f64)) -> Self {
        let (mut lo, mut hi) = ordered(finite_or_zero(extent.0), finite_or_zero(extent.1));
        let floored = lo <= 0.0;
        if floored {
            warn!("log scale minimum {lo} is not positive, using {LOG_FLOOR}");
            lo = LOG_FLOOR;
        }
        if hi < lo {
            hi = lo;
        }
        Self {
            kind: ScaleKind::Log,
            domain: (lo, hi),
            range,
            floored,
        }
    }

    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    /// The extent actually in use, after any log floor was applied.
    pub fn extent(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Whether the lower extent was raised to [`LOG_FLOOR`].
    pub fn was_floored(&self) -> bool {
        self.floored
    }

    /// Position of `value` in the domain as a 0..=1 fraction (unclamped).
    /// A collapsed domain maps everything to 0.5.
    pub fn normalize(&self, value: f64) -> f64 {
        let (lo, hi) = self.domain;
        if lo == hi {
            return 0.5;
        }
        match self.kind {
            ScaleKind::Linear => (value - lo) / (hi - lo),
            ScaleKind::Log => {
                let v = if value > 0.0 { value } else { lo };
                (v.ln() - lo.ln()) / (hi.ln() - lo.ln())
            }
        }
    }

    /// Pixel position of `value`.
    pub fn map(&self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        r0 + (r1 - r0) * self.normalize(value)
    }

    /// About `count` round tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = self.domain;
        if lo == hi {
            return vec![lo];
        }
        match self.kind {
            ScaleKind::Linear => linear_ticks(lo, hi, count.max(1)),
            ScaleKind::Log => log_ticks(lo, hi, count.max(1)),
        }
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Steps of 1, 2 or 5 times a power of ten.
fn linear_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    let raw = (hi - lo) / count as f64;
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    // Negative powers divide by an integer to keep values like 0.3 exact.
    if power >= 0.0 {
        let step = factor * 10f64.powf(power);
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    } else {
        let inv = 10f64.powf(-power) / factor;
        let first = (lo * inv).ceil() as i64;
        let last = (hi * inv).floor() as i64;
        (first..=last).map(|i| i as f64 / inv).collect()
    }
}

/// Powers of ten, with 2x and 5x in between when few decades are visible.
fn log_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    let first = lo.log10().floor() as i32;
    let last = hi.log10().ceil() as i32;
    let decades = (last - first).max(1) as usize;
    let multipliers: &[f64] = if decades * 3 <= count {
        &[1.0, 2.0, 5.0]
    } else {
        &[1.0]
    };
    let stride = decades.div_ceil(count).max(1);
    let eps = 1e-9 * hi;
    (first..=last)
        .filter(|k| ((k - first) as usize) % stride == 0)
        .flat_map(|k| multipliers.iter().map(move |m| m * 10f64.powi(k)))
        .filter(|v| *v >= lo - eps && *v <= hi + eps)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_ticks_use_round_steps() {
        assert_eq!(linear_ticks(0.0, 100.0, 5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(linear_ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn log_ticks_subdivide_short_ranges() {
        assert_eq!(log_ticks(1.0, 100.0, 10), vec![1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0]);
        assert_eq!(log_ticks(1.0, 1000.0, 5), vec![1.0, 10.0, 100.0, 1000.0]);
    }
}
