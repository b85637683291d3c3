use crate::models::{RangeRow, Segment};
use log::debug;

/// Percentage total of a composition bar.
pub const BAR_TOTAL: f64 = 100.0;

/// Which ends of the value axis are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenEnds {
    /// First segment's `range_start` has no lower bound.
    pub start: bool,
    /// Last segment's `range_end` has no upper bound.
    pub end: bool,
}

/// Turn weighted rows into contiguous bar segments, in input order.
///
/// Rows with a non-positive or non-finite weight are dropped. Each segment's
/// `start` is exactly the previous segment's `end`, and the last `end` is
/// exactly `100`.
pub fn compute_segments(rows: &[RangeRow], open: OpenEnds) -> Vec<Segment> {
    let kept: Vec<&RangeRow> = rows
        .iter()
        .filter(|r| r.weight.is_finite() && r.weight > 0.0)
        .collect();
    let total: f64 = kept.iter().map(|r| r.weight).sum();
    if kept.is_empty() || !total.is_finite() {
        debug!("no rows with positive weight, no segments");
        return Vec::new();
    }

    let last = kept.len() - 1;
    let mut cursor = 0.0;
    let mut out = Vec::with_capacity(kept.len());
    for (i, row) in kept.iter().enumerate() {
        let end = if i == last {
            BAR_TOTAL
        } else {
            (cursor + row.weight / total * BAR_TOTAL).min(BAR_TOTAL)
        };
        out.push(Segment {
            label: row.group.clone(),
            start: cursor,
            end,
            range_start: row.range_start,
            range_end: row.range_end,
            is_open_start: open.start && i == 0,
            is_open_end: open.end && i == last,
        });
        cursor = end;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirds_close_at_exactly_one_hundred() {
        let rows = vec![
            RangeRow::new("a", 0.0, 1.0, 1.0),
            RangeRow::new("b", 1.0, 2.0, 1.0),
            RangeRow::new("c", 2.0, 3.0, 1.0),
        ];
        let segs = compute_segments(&rows, OpenEnds::default());
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].start, 0.0);
        assert_eq!(segs[0].end, segs[1].start);
        assert_eq!(segs[1].end, segs[2].start);
        assert_eq!(segs[2].end, 100.0);
    }
}
