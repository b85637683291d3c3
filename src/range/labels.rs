//! Tick label de-overlap along one axis.
//!
//! Labels are deduplicated by value, sorted by position and swept once from
//! the axis start: a label closer than `min_distance` to the previous visible
//! label is pushed forward to exactly that distance. A label pushed past the
//! axis end is pinned to the end, and hidden if that still crowds its
//! neighbour. Labels that were not pushed keep their true position, even past
//! the axis end. True positions never move, so a leader line from tick to text
//! can always be drawn.

use crate::color::Rgb;
use crate::models::ScaleLabel;
use log::debug;
use serde::{Deserialize, Serialize};

/// A tick value at its true pixel position, before de-overlap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawLabel {
    pub value: f64,
    pub position: f64,
    pub color: Rgb,
}

impl RawLabel {
    pub fn new(value: f64, position: f64, color: Rgb) -> Self {
        Self {
            value,
            position,
            color,
        }
    }
}

/// Place labels so visible ones sit at least `min_distance` apart.
///
/// The output is sorted by true position. For duplicated values the first
/// occurrence in `raw` wins.
pub fn place_labels(
    raw: &[RawLabel],
    min_distance: f64,
    axis_start: f64,
    axis_end: f64,
) -> Vec<ScaleLabel> {
    let min_distance = if min_distance.is_finite() && min_distance > 0.0 {
        min_distance
    } else {
        0.0
    };
    let limit = axis_start.max(axis_end);

    let mut by_value: Vec<&RawLabel> = raw.iter().collect();
    by_value.sort_by(|a, b| a.value.total_cmp(&b.value));
    by_value.dedup_by(|later, earlier| later.value == earlier.value);
    by_value.sort_by(|a, b| a.position.total_cmp(&b.position));

    let mut out = Vec::with_capacity(by_value.len());
    let mut previous: Option<f64> = None;
    for label in by_value {
        let mut rendered = label.position;
        let mut hidden = false;
        if let Some(prev) = previous {
            let earliest = prev + min_distance;
            if rendered < earliest {
                rendered = earliest;
                if rendered > limit {
                    rendered = limit;
                    hidden = rendered < earliest;
                }
            }
        }
        if hidden {
            debug!("hiding label {} at {}: no room before axis end", label.value, label.position);
        } else {
            previous = Some(rendered);
        }
        out.push(ScaleLabel {
            value: label.value,
            true_position: label.position,
            rendered_position: rendered,
            hidden,
            color: label.color,
        });
    }
    out
}
