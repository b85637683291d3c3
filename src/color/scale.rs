//! Value-to-color mapping: continuous or binned, sequential or diverging.
//!
//! A [`ColorScale`] is built once from a domain and a palette and then only
//! read. Out-of-domain values clamp to the nearest end color. A collapsed
//! domain (`min == max`) yields a constant scale instead of dividing by zero.
//!
//! Binned scales split the domain into `divisions` buckets using half-open
//! intervals `[low, high)`; the last bucket is closed so the domain maximum
//! lands in it. Bucket colors are the continuous palette sampled at the
//! bucket indices `0..divisions`.

use super::Rgb;
use log::debug;
use serde::{Deserialize, Serialize};

/// Continuous interpolation or a fixed number of buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleMode {
    Continuous,
    Binned { divisions: usize },
}

/// Palette families.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Palette {
    /// Two-color ramp from `min` to `max`.
    Sequential { min: Rgb, max: Rgb },
    /// Three-color ramp meeting at `midpoint` (domain center when absent).
    Diverging {
        low: Rgb,
        mid: Rgb,
        high: Rgb,
        midpoint: Option<f64>,
    },
}

impl Palette {
    /// Color used when the domain collapses to a single value.
    fn neutral(&self) -> Rgb {
        match *self {
            Palette::Sequential { min, .. } => min,
            Palette::Diverging { mid, .. } => mid,
        }
    }

    /// Resolved midpoint for `domain`, clamped into it.
    fn midpoint_in(&self, lo: f64, hi: f64) -> Option<f64> {
        match *self {
            Palette::Sequential { .. } => None,
            Palette::Diverging { midpoint, .. } => {
                let m = midpoint
                    .filter(|m| m.is_finite())
                    .unwrap_or((lo + hi) / 2.0);
                Some(m.clamp(lo, hi))
            }
        }
    }

    /// Continuous evaluation over `lo..=hi` with an explicit midpoint.
    /// Callers guarantee `lo < hi`.
    fn eval(&self, v: f64, lo: f64, hi: f64, midpoint: Option<f64>) -> Rgb {
        match *self {
            Palette::Sequential { min, max } => {
                if v.is_nan() || v <= lo {
                    return min;
                }
                if v >= hi {
                    return max;
                }
                min.mix(max, (v - lo) / (hi - lo))
            }
            Palette::Diverging { low, mid, high, .. } => {
                if v.is_nan() || v <= lo {
                    return low;
                }
                if v >= hi {
                    return high;
                }
                let m = midpoint.unwrap_or((lo + hi) / 2.0);
                if v <= m {
                    // m > lo here, otherwise v <= lo would have returned
                    low.mix(mid, (v - lo) / (m - lo))
                } else {
                    mid.mix(high, (v - m) / (hi - m))
                }
            }
        }
    }
}

/// One legend swatch. Continuous stops have `lower == upper`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub lower: f64,
    pub upper: f64,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
enum Mapping {
    Constant(Rgb),
    Continuous { midpoint: Option<f64> },
    Binned { thresholds: Vec<f64>, colors: Vec<Rgb> },
}

/// A built color scale. Use [`ColorScale::color`] (or [`ColorScale::as_fn`]) to map values.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScale {
    mode: ScaleMode,
    palette: Palette,
    domain: (f64, f64),
    mapping: Mapping,
}

impl ColorScale {
    /// Build a scale over `domain` (ends are reordered if reversed).
    ///
    /// `Binned { divisions: 0 }` is treated as a single bucket.
    pub fn build(domain: (f64, f64), mode: ScaleMode, palette: Palette) -> Self {
        let (lo, hi) = ordered(domain);
        let mode = normalize_mode(mode);
        if is_degenerate(lo, hi) {
            debug!("color scale domain [{lo}, {hi}] is degenerate, using a constant color");
            return Self {
                mode,
                palette,
                domain: (lo, hi),
                mapping: Mapping::Constant(palette.neutral()),
            };
        }
        let mapping = match mode {
            ScaleMode::Continuous => Mapping::Continuous {
                midpoint: palette.midpoint_in(lo, hi),
            },
            ScaleMode::Binned { divisions } => {
                let thresholds = (1..divisions)
                    .map(|k| lo + (hi - lo) * k as f64 / divisions as f64)
                    .collect();
                Mapping::Binned {
                    thresholds,
                    colors: bucket_colors(&palette, divisions, lo, hi),
                }
            }
        };
        Self {
            mode,
            palette,
            domain: (lo, hi),
            mapping,
        }
    }

    /// Binned scale whose buckets hold roughly equal numbers of `sample` values.
    ///
    /// Thresholds are the sorted sample values at `floor(len * i / divisions)`.
    /// Non-finite sample values are ignored; an empty sample gives a constant scale.
    pub fn quantile(sample: &[f64], divisions: usize, palette: Palette) -> Self {
        let divisions = divisions.max(1);
        let mode = ScaleMode::Binned { divisions };
        let mut sorted: Vec<f64> = sample.iter().copied().filter(|v| v.is_finite()).collect();
        sorted.sort_by(f64::total_cmp);
        let (Some(&lo), Some(&hi)) = (sorted.first(), sorted.last()) else {
            return Self {
                mode,
                palette,
                domain: (0.0, 0.0),
                mapping: Mapping::Constant(palette.neutral()),
            };
        };
        if is_degenerate(lo, hi) {
            return Self {
                mode,
                palette,
                domain: (lo, hi),
                mapping: Mapping::Constant(palette.neutral()),
            };
        }
        let thresholds = crate::stats::quantile_thresholds(&sorted, divisions);
        Self {
            mode,
            palette,
            domain: (lo, hi),
            mapping: Mapping::Binned {
                thresholds,
                colors: bucket_colors(&palette, divisions, lo, hi),
            },
        }
    }

    pub fn mode(&self) -> ScaleMode {
        self.mode
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn divisions(&self) -> Option<usize> {
        match self.mode {
            ScaleMode::Binned { divisions } => Some(divisions),
            ScaleMode::Continuous => None,
        }
    }

    /// The midpoint actually used by a diverging palette after defaulting and clamping.
    pub fn midpoint(&self) -> Option<f64> {
        let (lo, hi) = self.domain;
        self.palette.midpoint_in(lo, hi)
    }

    /// Whether every value maps to the same color.
    pub fn is_constant(&self) -> bool {
        matches!(self.mapping, Mapping::Constant(_))
    }

    /// Interior bucket boundaries (empty for continuous scales).
    pub fn thresholds(&self) -> &[f64] {
        match &self.mapping {
            Mapping::Binned { thresholds, .. } => thresholds,
            _ => &[],
        }
    }

    /// Bucket index of `value`, for binned scales.
    pub fn bucket(&self, value: f64) -> Option<usize> {
        match &self.mapping {
            Mapping::Binned { thresholds, .. } => {
                Some(thresholds.partition_point(|t| *t <= value))
            }
            Mapping::Constant(_) if self.divisions().is_some() => Some(0),
            _ => None,
        }
    }

    /// Map a value to its color.
    pub fn color(&self, value: f64) -> Rgb {
        match &self.mapping {
            Mapping::Constant(c) => *c,
            Mapping::Continuous { midpoint } => {
                let (lo, hi) = self.domain;
                self.palette.eval(value, lo, hi, *midpoint)
            }
            Mapping::Binned { thresholds, colors } => {
                let idx = thresholds.partition_point(|t| *t <= value);
                colors[idx.min(colors.len() - 1)]
            }
        }
    }

    /// Borrow the scale as a plain `value -> color` function.
    pub fn as_fn(&self) -> impl Fn(f64) -> Rgb + '_ {
        move |v| self.color(v)
    }

    /// Legend swatches: one per bucket for binned scales, `stops` evenly spaced
    /// samples for continuous ones.
    pub fn legend(&self, stops: usize) -> Vec<LegendEntry> {
        let (lo, hi) = self.domain;
        match &self.mapping {
            Mapping::Binned { thresholds, colors } => {
                let mut bounds = Vec::with_capacity(thresholds.len() + 2);
                bounds.push(lo);
                bounds.extend_from_slice(thresholds);
                bounds.push(hi);
                bounds
                    .windows(2)
                    .zip(colors)
                    .map(|(w, &color)| LegendEntry {
                        lower: w[0],
                        upper: w[1],
                        color,
                    })
                    .collect()
            }
            Mapping::Constant(c) => vec![LegendEntry {
                lower: lo,
                upper: hi,
                color: *c,
            }],
            Mapping::Continuous { .. } => {
                let stops = stops.max(2);
                (0..stops)
                    .map(|i| {
                        let v = if i == stops - 1 {
                            hi
                        } else {
                            lo + (hi - lo) * i as f64 / (stops - 1) as f64
                        };
                        LegendEntry {
                            lower: v,
                            upper: v,
                            color: self.color(v),
                        }
                    })
                    .collect()
            }
        }
    }
}

/// Colors for buckets `0..divisions`, taken from the continuous palette over
/// the index domain `[0, divisions - 1]`. A diverging midpoint given in value
/// units is carried over to index units.
fn bucket_colors(palette: &Palette, divisions: usize, lo: f64, hi: f64) -> Vec<Rgb> {
    if divisions <= 1 {
        return vec![palette.neutral()];
    }
    let last = (divisions - 1) as f64;
    let midpoint = palette
        .midpoint_in(lo, hi)
        .map(|m| (m - lo) / (hi - lo) * last);
    (0..divisions)
        .map(|i| palette.eval(i as f64, 0.0, last, midpoint))
        .collect()
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

fn is_degenerate(lo: f64, hi: f64) -> bool {
    !lo.is_finite() || !hi.is_finite() || lo == hi
}

fn normalize_mode(mode: ScaleMode) -> ScaleMode {
    match mode {
        ScaleMode::Binned { divisions } => ScaleMode::Binned {
            divisions: divisions.max(1),
        },
        m => m,
    }
}
