//! Property-based invariant tests for the layout and color core.
//!
//! 1. Allocated units always sum to the requested total.
//! 2. A larger value never gets fewer units than a smaller one.
//! 3. A grid either fits the area and holds every item, or reports overflow.
//! 4. Continuous scales hit their end colors exactly.
//! 5. Bar segments are contiguous and close at 100.
//! 6. Visible labels keep the minimum distance.

use proptest::prelude::*;
use statchart::allocate::allocate;
use statchart::grid::fit;
use statchart::range::{OpenEnds, RawLabel, compute_segments, place_labels};
use statchart::{Category, ColorScale, Palette, RangeRow, Rgb, ScaleMode};

fn categories() -> impl Strategy<Value = Vec<Category>> {
    prop::collection::vec(0.001f64..1e6, 1..25).prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| Category::new(format!("c{i}"), v))
            .collect()
    })
}

fn rgb() -> impl Strategy<Value = Rgb> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

fn domain() -> impl Strategy<Value = (f64, f64)> {
    (-1e6f64..1e6, 1e-3f64..1e6).prop_map(|(lo, width)| (lo, lo + width))
}

proptest! {
    #[test]
    fn allocation_sums_to_total(cats in categories(), total in 1u32..1000) {
        let out = allocate(&cats, total);
        prop_assert_eq!(out.len(), cats.len());
        prop_assert_eq!(out.iter().map(|a| a.units).sum::<u32>(), total);
    }

    #[test]
    fn allocation_is_monotonic(cats in categories(), total in 1u32..1000) {
        let out = allocate(&cats, total);
        for a in &out {
            for b in &out {
                if a.value > b.value {
                    prop_assert!(
                        a.units >= b.units,
                        "{} ({}) got {} units, {} ({}) got {}",
                        a.label, a.value, a.units, b.label, b.value, b.units
                    );
                }
            }
        }
    }

    #[test]
    fn grid_fits_or_flags_overflow(
        n in 1usize..200,
        width in 10f64..1000.0,
        height in 10f64..1000.0,
        size in 1f64..120.0,
        spacing_h in 0f64..20.0,
        spacing_v in 0f64..20.0,
    ) {
        let f = fit(n, width, height, size, spacing_h, spacing_v);
        prop_assert!(f.plan.capacity() >= n);
        prop_assert_eq!(f.plan.rows, n.div_ceil(f.plan.columns));
        if f.overflow {
            prop_assert_eq!(f.plan.columns, 1);
        } else {
            prop_assert!(f.plan.grid_width() <= width);
            prop_assert!(f.plan.grid_height() <= height);
        }
    }

    #[test]
    fn sequential_ends_are_exact(d in domain(), min in rgb(), max in rgb()) {
        let s = ColorScale::build(d, ScaleMode::Continuous, Palette::Sequential { min, max });
        prop_assert_eq!(s.color(d.0), min);
        prop_assert_eq!(s.color(d.1), max);
    }

    #[test]
    fn diverging_ends_are_exact(
        d in domain(),
        low in rgb(),
        mid in rgb(),
        high in rgb(),
        m in prop::option::of(-2e6f64..2e6),
    ) {
        let palette = Palette::Diverging { low, mid, high, midpoint: m };
        let s = ColorScale::build(d, ScaleMode::Continuous, palette);
        prop_assert_eq!(s.color(d.0), low);
        prop_assert_eq!(s.color(d.1), high);
    }

    #[test]
    fn segments_are_contiguous(
        weights in prop::collection::vec(-5f64..100.0, 1..30),
    ) {
        let rows: Vec<RangeRow> = weights
            .iter()
            .enumerate()
            .map(|(i, w)| RangeRow::new(format!("g{i}"), i as f64, i as f64 + 1.0, *w))
            .collect();
        let segs = compute_segments(&rows, OpenEnds { start: true, end: true });
        prop_assert_eq!(segs.len(), weights.iter().filter(|w| **w > 0.0).count());
        if let (Some(first), Some(last)) = (segs.first(), segs.last()) {
            prop_assert_eq!(first.start, 0.0);
            prop_assert!((last.end - 100.0).abs() < 1e-6);
        }
        for pair in segs.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
            prop_assert!(pair[0].start <= pair[0].end);
        }
    }

    #[test]
    fn visible_labels_keep_their_distance(
        positions in prop::collection::vec(0f64..500.0, 0..40),
        min_distance in 1f64..60.0,
    ) {
        let raw: Vec<RawLabel> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| RawLabel::new(i as f64, *p, Rgb::BLACK))
            .collect();
        let out = place_labels(&raw, min_distance, 0.0, 500.0);
        prop_assert_eq!(out.len(), raw.len());
        let visible: Vec<f64> = out
            .iter()
            .filter(|l| !l.hidden)
            .map(|l| l.rendered_position)
            .collect();
        for pair in visible.windows(2) {
            prop_assert!(pair[1] - pair[0] >= min_distance - 1e-9);
        }
        for l in &out {
            prop_assert!(l.rendered_position <= 500.0);
            prop_assert!(l.hidden || l.rendered_position >= l.true_position);
        }
    }
}
