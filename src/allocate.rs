//! Proportional allocation of a fixed number of whole display units.
//!
//! Each category gets `round(share * total)` units, then the rounding error is
//! settled so the units add up to exactly `total`:
//!
//! - a shortfall goes entirely to the category holding the most units
//!   (the larger value, then the first in input order, on ties);
//! - a surplus is taken back one unit at a time from the category holding the
//!   most units, preferring the smallest value and then the later input
//!   position on ties, which keeps larger values at or above smaller ones.

use crate::models::{Allocation, Category};
use log::{debug, warn};

/// Default number of units in a proportional grid (one per percent).
pub const DEFAULT_TOTAL_UNITS: u32 = 100;

/// Split `total_units` across `categories` in proportion to their values.
///
/// Categories with a non-positive or non-finite value are left out. Returns an
/// empty list when nothing positive remains or `total_units` is zero.
pub fn allocate(categories: &[Category], total_units: u32) -> Vec<Allocation> {
    let kept: Vec<&Category> = categories
        .iter()
        .filter(|c| c.value.is_finite() && c.value > 0.0)
        .collect();
    if kept.len() < categories.len() {
        debug!(
            "skipping {} categories with non-positive values",
            categories.len() - kept.len()
        );
    }
    if kept.is_empty() || total_units == 0 {
        warn!("nothing to allocate ({} positive values, total_units={total_units})", kept.len());
        return Vec::new();
    }
    // summed relative to the largest value so huge inputs cannot overflow
    let max = kept.iter().map(|c| c.value).fold(0.0, f64::max);
    let sum: f64 = kept.iter().map(|c| c.value / max).sum();

    let mut out: Vec<Allocation> = kept
        .iter()
        .map(|c| {
            let proportion = c.value / max / sum;
            Allocation {
                label: c.label.clone(),
                value: c.value,
                proportion,
                units: (proportion * total_units as f64).round() as u32,
                percentage: (proportion * 100.0).round() as u32,
            }
        })
        .collect();

    let assigned: i64 = out.iter().map(|a| a.units as i64).sum();
    let diff = total_units as i64 - assigned;
    if diff > 0 {
        let idx = shortfall_target(&out);
        out[idx].units += diff as u32;
    } else if diff < 0 {
        for _ in 0..(-diff) {
            let idx = surplus_source(&out);
            out[idx].units -= 1;
        }
    }
    debug!("allocated {total_units} units over {} categories (correction {diff})", out.len());
    out
}

/// Index of the largest unit count; ties go to the larger value, then the earlier position.
fn shortfall_target(allocs: &[Allocation]) -> usize {
    let mut best = 0;
    for (i, a) in allocs.iter().enumerate().skip(1) {
        let b = &allocs[best];
        if a.units > b.units || (a.units == b.units && a.value > b.value) {
            best = i;
        }
    }
    best
}

/// Index of the largest unit count; ties go to the smaller value, then the later position.
fn surplus_source(allocs: &[Allocation]) -> usize {
    let mut best = 0;
    for (i, a) in allocs.iter().enumerate().skip(1) {
        let b = &allocs[best];
        if a.units > b.units || (a.units == b.units && a.value <= b.value) {
            best = i;
        }
    }
    best
}

/// Owner of every unit cell, in order: allocation `i` owns `units` consecutive cells.
///
/// The result has one entry per unit (the allocation total) and is what a
/// proportional grid paints row by row.
pub fn unit_owners(allocations: &[Allocation]) -> Vec<usize> {
    allocations
        .iter()
        .enumerate()
        .flat_map(|(i, a)| std::iter::repeat_n(i, a.units as usize))
        .collect()
}
