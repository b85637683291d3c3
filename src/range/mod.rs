//! Composition-range geometry: a 100% bar split into segments, each tied to a
//! range on an independent (linear or log) value axis.
//!
//! - [`segments`]: weighted rows to contiguous percentage segments
//! - [`scale`]: the value axis, with a single log floor
//! - [`connectors`]: bar-to-axis line endpoints
//! - [`labels`]: tick label de-overlap
//!
//! [`RangeLayout::compute`] runs all four with one shared [`ValueScale`].

pub mod connectors;
pub mod labels;
pub mod scale;
pub mod segments;

pub use connectors::{BarAxis, Connector, compute_connectors};
pub use labels::{RawLabel, place_labels};
pub use scale::{LOG_FLOOR, ScaleKind, ValueScale};
pub use segments::{BAR_TOTAL, OpenEnds, compute_segments};

use crate::color::Rgb;
use crate::models::{RangeRow, ScaleLabel, Segment};
use crate::text;
use log::debug;
use serde::Serialize;

/// Inputs for a full range-chart layout besides the rows themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeOptions {
    pub use_log: bool,
    pub open: OpenEnds,
    /// Pixel span of the composition bar.
    pub bar: BarAxis,
    /// Pixel span of the value axis `(start, end)`.
    pub value_axis: (f64, f64),
    /// Value extent to show; derived from the bounded row ends when `None`.
    pub extent: Option<(f64, f64)>,
    /// Minimum label spacing; derived from label text widths when `None`.
    pub min_label_distance: Option<f64>,
    pub label_font_px: u32,
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            use_log: false,
            open: OpenEnds::default(),
            bar: BarAxis::new(0.0, 400.0),
            value_axis: (0.0, 400.0),
            extent: None,
            min_label_distance: None,
            label_font_px: text::DEFAULT_FONT_PX,
        }
    }
}

/// Everything a renderer needs to paint one range chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeLayout {
    pub segments: Vec<Segment>,
    pub scale: ValueScale,
    pub connectors: Vec<Connector>,
    pub labels: Vec<ScaleLabel>,
    pub min_label_distance: f64,
}

impl RangeLayout {
    /// Lay out `rows`. `color_of(i)` gives the color of segment `i`, which its
    /// boundary labels inherit.
    pub fn compute<F>(rows: &[RangeRow], options: &RangeOptions, color_of: F) -> Self
    where
        F: Fn(usize) -> Rgb,
    {
        let segments = compute_segments(rows, options.open);
        let bounded = bounded_values(&segments);
        let extent = options
            .extent
            .or_else(|| crate::stats::extent(&bounded.iter().map(|(v, _)| *v).collect::<Vec<_>>()))
            .unwrap_or((0.0, 0.0));
        let scale = ValueScale::new(extent, options.use_log, options.value_axis);
        let connectors = compute_connectors(&segments, options.bar, &scale);

        let raw: Vec<RawLabel> = bounded
            .iter()
            .map(|&(value, seg)| RawLabel::new(value, scale.map(value), color_of(seg)))
            .collect();
        let min_label_distance = options.min_label_distance.unwrap_or_else(|| {
            let values: Vec<f64> = raw.iter().map(|r| r.value).collect();
            text::min_label_distance_for(&values, options.label_font_px)
        });
        let (axis_start, axis_end) = options.value_axis;
        let labels = place_labels(
            &raw,
            min_label_distance,
            axis_start.min(axis_end),
            axis_start.max(axis_end),
        );
        debug!(
            "range layout: {} segments, extent {:?}, {} labels ({} hidden)",
            segments.len(),
            scale.extent(),
            labels.len(),
            labels.iter().filter(|l| l.hidden).count()
        );

        Self {
            segments,
            scale,
            connectors,
            labels,
            min_label_distance,
        }
    }
}

/// Finite boundary values that are not open, with the index of their segment.
fn bounded_values(segments: &[Segment]) -> Vec<(f64, usize)> {
    let mut out = Vec::with_capacity(segments.len() * 2);
    for (i, s) in segments.iter().enumerate() {
        if !s.is_open_start && s.range_start.is_finite() {
            out.push((s.range_start, i));
        }
        if !s.is_open_end && s.range_end.is_finite() {
            out.push((s.range_end, i));
        }
    }
    out
}
