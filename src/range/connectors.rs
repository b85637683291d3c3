use super::scale::ValueScale;
use crate::models::Segment;
use serde::{Deserialize, Serialize};

/// Lines joining one bar segment to the value range it stands for.
///
/// `bar_*` are pixel positions along the composition bar; `value_*` are pixel
/// positions along the value axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Connector {
    pub label: String,
    pub bar_start: f64,
    pub bar_end: f64,
    pub value_start: f64,
    pub value_end: f64,
    pub open_start: bool,
    pub open_end: bool,
}

/// Pixel mapping for the composition bar (0..=100 percent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarAxis {
    pub start: f64,
    pub end: f64,
}

impl BarAxis {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn map(&self, percent: f64) -> f64 {
        self.start + (self.end - self.start) * percent / super::segments::BAR_TOTAL
    }
}

/// Connector endpoints for every segment.
///
/// Open ends go to the matching end of the value axis's pixel range instead of
/// being looked up on the scale.
pub fn compute_connectors(segments: &[Segment], bar: BarAxis, scale: &ValueScale) -> Vec<Connector> {
    let (axis_start, axis_end) = scale.range();
    segments
        .iter()
        .map(|s| Connector {
            label: s.label.clone(),
            bar_start: bar.map(s.start),
            bar_end: bar.map(s.end),
            value_start: if s.is_open_start {
                axis_start
            } else {
                scale.map(s.range_start)
            },
            value_end: if s.is_open_end {
                axis_end
            } else {
                scale.map(s.range_end)
            },
            open_start: s.is_open_start,
            open_end: s.is_open_end,
        })
        .collect()
}
