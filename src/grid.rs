//! Row/column fitting for repeated square elements (bubble matrices, unit grids).
//!
//! [`fit`] tries every column count from 1 to `item_count`, keeps the
//! arrangements that fit inside the available area, and picks the best one:
//!
//! 1. fewest empty cells (`columns * rows - item_count`);
//! 2. highest area utilization `(grid_width / width) * (grid_height / height)`;
//! 3. more columns.
//!
//! Utilization values within a relative `1e-9` of each other count as equal.
//! Rule 1 can pick a looser grid than the utilization product alone would
//! (5 items in 400x400 at 80/10: 3x2 over the wider 4x2).
//! When nothing fits, the result is a single column with `overflow` set.

use crate::models::{GridPlan, span};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

const TIE_TOLERANCE: f64 = 1e-9;

/// Outcome of a fitting pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GridFit {
    pub plan: GridPlan,
    /// Set when no arrangement fits; `plan` is then the one-column fallback
    /// and exceeds the available area.
    pub overflow: bool,
    /// `(grid_width / width) * (grid_height / height)` of the chosen plan.
    pub utilization: f64,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    columns: usize,
    rows: usize,
    empty: usize,
    score: f64,
}

impl Candidate {
    /// Whether `self` should replace `best`. Candidates arrive in ascending column order.
    fn beats(&self, best: &Candidate) -> bool {
        if self.empty != best.empty {
            return self.empty < best.empty;
        }
        let scale = self.score.abs().max(best.score.abs()).max(f64::MIN_POSITIVE);
        if (self.score - best.score).abs() <= TIE_TOLERANCE * scale {
            return self.columns > best.columns;
        }
        self.score > best.score
    }
}

/// Choose a grid for `item_count` elements of size `element_size` separated by
/// `spacing_h` / `spacing_v` inside `available_width` x `available_height`.
pub fn fit(
    item_count: usize,
    available_width: f64,
    available_height: f64,
    element_size: f64,
    spacing_h: f64,
    spacing_v: f64,
) -> GridFit {
    let spacing_h = non_negative(spacing_h);
    let spacing_v = non_negative(spacing_v);
    let plan_for = |columns: usize, rows: usize| GridPlan {
        columns,
        rows,
        cell_width: element_size,
        cell_height: element_size,
        spacing_h,
        spacing_v,
    };

    if item_count == 0 {
        return GridFit {
            plan: plan_for(0, 0),
            overflow: false,
            utilization: 0.0,
        };
    }

    let mut best: Option<Candidate> = None;
    for columns in 1..=item_count {
        let rows = item_count.div_ceil(columns);
        let grid_width = span(columns, element_size, spacing_h);
        let grid_height = span(rows, element_size, spacing_v);
        let fits = grid_width <= available_width && grid_height <= available_height;
        if !fits {
            continue;
        }
        let candidate = Candidate {
            columns,
            rows,
            empty: columns * rows - item_count,
            score: ratio(grid_width, available_width) * ratio(grid_height, available_height),
        };
        if best.is_none_or(|b| candidate.beats(&b)) {
            best = Some(candidate);
        }
    }

    match best {
        Some(c) => {
            debug!(
                "grid fit for {item_count} items: {}x{} (utilization {:.4})",
                c.columns, c.rows, c.score
            );
            GridFit {
                plan: plan_for(c.columns, c.rows),
                overflow: false,
                utilization: c.score,
            }
        }
        None => {
            warn!(
                "{item_count} elements of size {element_size} do not fit in \
                 {available_width}x{available_height}, falling back to one column"
            );
            let plan = plan_for(1, item_count);
            GridFit {
                plan,
                overflow: true,
                utilization: ratio(plan.grid_width(), available_width)
                    * ratio(plan.grid_height(), available_height),
            }
        }
    }
}

/// Like [`fit`], but the element size may grow anywhere within
/// `min_size..=max_size`: picks the partition that allows the largest element,
/// preferring more columns on ties.
///
/// Falls back to [`fit`] at `min_size` (which then reports overflow) when not
/// even the smallest element fits.
pub fn fit_with_size_bounds(
    item_count: usize,
    available_width: f64,
    available_height: f64,
    min_size: f64,
    max_size: f64,
    spacing_h: f64,
    spacing_v: f64,
) -> GridFit {
    let (min_size, max_size) = if min_size <= max_size {
        (min_size, max_size)
    } else {
        (max_size, min_size)
    };
    let sh = non_negative(spacing_h);
    let sv = non_negative(spacing_v);

    let mut best: Option<(usize, usize, f64)> = None;
    for columns in 1..=item_count {
        let rows = item_count.div_ceil(columns);
        let by_width = (available_width - sh * (columns - 1) as f64) / columns as f64;
        let by_height = (available_height - sv * (rows - 1) as f64) / rows as f64;
        let size = by_width.min(by_height).min(max_size);
        if size.is_nan() || size < min_size {
            continue;
        }
        let better = match best {
            None => true,
            Some((_, _, s)) => size >= s - TIE_TOLERANCE * s.abs().max(1.0),
        };
        if better {
            best = Some((columns, rows, size));
        }
    }

    match best {
        Some((columns, rows, size)) => {
            let plan = GridPlan {
                columns,
                rows,
                cell_width: size,
                cell_height: size,
                spacing_h: sh,
                spacing_v: sv,
            };
            debug!("flexible grid for {item_count} items: {columns}x{rows} at size {size:.3}");
            GridFit {
                plan,
                overflow: false,
                utilization: ratio(plan.grid_width(), available_width)
                    * ratio(plan.grid_height(), available_height),
            }
        }
        None => fit(
            item_count,
            available_width,
            available_height,
            min_size,
            spacing_h,
            spacing_v,
        ),
    }
}

/// Radius of a bubble whose area is proportional to `value`, reaching
/// `max_radius` at `max_value`. Non-positive inputs give zero.
pub fn bubble_radius(value: f64, max_value: f64, max_radius: f64) -> f64 {
    let valid = value > 0.0 && max_value > 0.0 && max_radius > 0.0;
    if !valid {
        return 0.0;
    }
    max_radius * (value / max_value).min(1.0).sqrt()
}

fn ratio(used: f64, available: f64) -> f64 {
    if available > 0.0 { used / available } else { 0.0 }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_scores_prefer_more_columns() {
        let a = Candidate { columns: 1, rows: 4, empty: 0, score: 0.25 };
        let b = Candidate { columns: 4, rows: 1, empty: 0, score: 0.25 };
        assert!(b.beats(&a));
        assert!(!a.beats(&b));
    }

    #[test]
    fn fewer_empty_cells_win_over_score() {
        let full = Candidate { columns: 4, rows: 2, empty: 1, score: 0.4 };
        let gappy = Candidate { columns: 3, rows: 3, empty: 2, score: 0.6 };
        assert!(full.beats(&gappy));
    }

    #[test]
    fn ratio_guards_zero_area() {
        assert_eq!(ratio(10.0, 0.0), 0.0);
        assert_eq!(ratio(10.0, 20.0), 0.5);
    }
}
