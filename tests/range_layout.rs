use statchart::RangeRow;
use statchart::range::{
    BarAxis, OpenEnds, RangeLayout, RangeOptions, ScaleKind, ValueScale, compute_connectors,
    compute_segments,
};
use statchart::{Rgb, ScaleLabel};

fn rows() -> Vec<RangeRow> {
    vec![
        RangeRow::new("small", 0.0, 10.0, 1.0),
        RangeRow::new("medium", 10.0, 100.0, 1.0),
        RangeRow::new("large", 100.0, 1000.0, 2.0),
    ]
}

fn options(use_log: bool, open: OpenEnds) -> RangeOptions {
    RangeOptions {
        use_log,
        open,
        bar: BarAxis::new(0.0, 400.0),
        value_axis: (0.0, 300.0),
        min_label_distance: Some(20.0),
        ..RangeOptions::default()
    }
}

fn palette(i: usize) -> Rgb {
    [Rgb::new(200, 0, 0), Rgb::new(0, 200, 0), Rgb::new(0, 0, 200)][i % 3]
}

fn label_for(labels: &[ScaleLabel], value: f64) -> &ScaleLabel {
    labels.iter().find(|l| l.value == value).unwrap()
}

#[test]
fn segments_are_contiguous_and_weighted() {
    let segs = compute_segments(&rows(), OpenEnds::default());
    let bounds: Vec<(f64, f64)> = segs.iter().map(|s| (s.start, s.end)).collect();
    assert_eq!(bounds, vec![(0.0, 25.0), (25.0, 50.0), (50.0, 100.0)]);
    assert_eq!(segs[2].share(), 50.0);
    assert!(segs.iter().all(|s| !s.is_open_start && !s.is_open_end));
}

#[test]
fn zero_and_malformed_weights_are_dropped() {
    let rows = vec![
        RangeRow::new("a", 0.0, 1.0, 0.0),
        RangeRow::new("b", 1.0, 2.0, 3.0),
        RangeRow::new("c", 2.0, 3.0, -1.0),
        RangeRow::new("d", 3.0, 4.0, f64::NAN),
        RangeRow::new("e", 4.0, 5.0, 1.0),
    ];
    let segs = compute_segments(&rows, OpenEnds::default());
    let labels: Vec<&str> = segs.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["b", "e"]);
    assert_eq!(segs[0].end, 75.0);
    assert_eq!(segs[1].end, 100.0);
    assert!(compute_segments(&[], OpenEnds::default()).is_empty());
}

#[test]
fn open_flags_mark_only_the_outer_segments() {
    let segs = compute_segments(&rows(), OpenEnds { start: true, end: true });
    assert!(segs[0].is_open_start && !segs[0].is_open_end);
    assert!(!segs[1].is_open_start && !segs[1].is_open_end);
    assert!(!segs[2].is_open_start && segs[2].is_open_end);
}

#[test]
fn log_floor_applies_to_connectors_and_labels_alike() {
    let layout = RangeLayout::compute(&rows(), &options(true, OpenEnds::default()), palette);
    assert_eq!(layout.scale.kind(), ScaleKind::Log);
    assert!(layout.scale.was_floored());
    assert_eq!(layout.scale.extent(), (0.1, 1000.0));

    for c in &layout.connectors {
        let seg = layout.segments.iter().find(|s| s.label == c.label).unwrap();
        assert_eq!(label_for(&layout.labels, seg.range_start).true_position, c.value_start);
        assert_eq!(label_for(&layout.labels, seg.range_end).true_position, c.value_end);
    }
    // zero sits at the floor, i.e. the axis start
    assert_eq!(label_for(&layout.labels, 0.0).true_position, 0.0);
    let top = label_for(&layout.labels, 1000.0).true_position;
    assert!((top - 300.0).abs() < 1e-9);
}

#[test]
fn log_positions_are_evenly_spaced_per_decade() {
    let layout = RangeLayout::compute(&rows(), &options(true, OpenEnds::default()), palette);
    let ten = label_for(&layout.labels, 10.0).true_position;
    let hundred = label_for(&layout.labels, 100.0).true_position;
    assert!((ten - 150.0).abs() < 1e-9);
    assert!((hundred - 225.0).abs() < 1e-9);
}

#[test]
fn shared_boundaries_give_one_label_colored_by_the_first_segment() {
    let layout = RangeLayout::compute(&rows(), &options(false, OpenEnds::default()), palette);
    let values: Vec<f64> = layout.labels.iter().map(|l| l.value).collect();
    assert_eq!(values, vec![0.0, 10.0, 100.0, 1000.0]);
    assert_eq!(label_for(&layout.labels, 10.0).color, palette(0));
    assert_eq!(label_for(&layout.labels, 100.0).color, palette(1));
    assert_eq!(label_for(&layout.labels, 1000.0).color, palette(2));
}

#[test]
fn crowded_linear_labels_keep_their_true_positions() {
    let layout = RangeLayout::compute(&rows(), &options(false, OpenEnds::default()), palette);
    // 0, 10 and 100 map to 0, 3 and 30 px on a 0..1000 -> 0..300 axis
    let ten = label_for(&layout.labels, 10.0);
    assert!((ten.true_position - 3.0).abs() < 1e-9);
    assert_eq!(ten.rendered_position, 20.0);
    assert!(ten.is_shifted());
    let hundred = label_for(&layout.labels, 100.0);
    assert_eq!(hundred.rendered_position, 40.0);
    assert!(layout.labels.iter().all(|l| !l.hidden));
}

#[test]
fn open_ends_map_to_the_axis_extremes() {
    let open = OpenEnds { start: true, end: true };
    let layout = RangeLayout::compute(&rows(), &options(false, open), palette);
    let first = &layout.connectors[0];
    let last = &layout.connectors[2];
    assert!(first.open_start);
    assert_eq!(first.value_start, 0.0);
    assert!(last.open_end);
    assert_eq!(last.value_end, 300.0);
    // the open values themselves get no labels
    let values: Vec<f64> = layout.labels.iter().map(|l| l.value).collect();
    assert_eq!(values, vec![10.0, 100.0]);
    // the extent comes from the bounded ends only
    assert_eq!(layout.scale.extent(), (10.0, 100.0));
}

#[test]
fn connectors_follow_the_bar_axis() {
    let segs = compute_segments(&rows(), OpenEnds::default());
    let scale = ValueScale::linear((0.0, 1000.0), (0.0, 300.0));
    let conns = compute_connectors(&segs, BarAxis::new(50.0, 450.0), &scale);
    let bar: Vec<(f64, f64)> = conns.iter().map(|c| (c.bar_start, c.bar_end)).collect();
    assert_eq!(bar, vec![(50.0, 150.0), (150.0, 250.0), (250.0, 450.0)]);
    assert_eq!(conns[2].value_end, 300.0);
}

#[test]
fn explicit_extent_overrides_the_data() {
    let opts = RangeOptions {
        extent: Some((0.0, 2000.0)),
        ..options(false, OpenEnds::default())
    };
    let layout = RangeLayout::compute(&rows(), &opts, palette);
    assert_eq!(layout.scale.extent(), (0.0, 2000.0));
    assert_eq!(label_for(&layout.labels, 1000.0).true_position, 150.0);
}

#[test]
fn empty_input_is_an_empty_layout() {
    let layout = RangeLayout::compute(&[], &RangeOptions::default(), palette);
    assert!(layout.segments.is_empty());
    assert!(layout.connectors.is_empty());
    assert!(layout.labels.is_empty());
}

#[test]
fn default_label_distance_comes_from_text_width() {
    let opts = RangeOptions {
        min_label_distance: None,
        ..options(false, OpenEnds::default())
    };
    let layout = RangeLayout::compute(&rows(), &opts, palette);
    // "1,000" at 11px: ceil(5 * 11 * 0.6) = 33, plus a 4px gap
    assert_eq!(layout.min_label_distance, 37.0);
}

#[test]
fn value_scale_basics() {
    let s = ValueScale::linear((0.0, 100.0), (0.0, 500.0));
    assert_eq!(s.map(50.0), 250.0);
    assert_eq!(s.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);

    let flat = ValueScale::linear((3.0, 3.0), (0.0, 100.0));
    assert_eq!(flat.map(3.0), 50.0);
    assert_eq!(flat.ticks(5), vec![3.0]);

    let log = ValueScale::log((-5.0, 100.0), (0.0, 300.0));
    assert!(log.was_floored());
    assert_eq!(log.extent(), (0.1, 100.0));
    assert_eq!(log.map(-5.0), 0.0);

    let positive = ValueScale::new((1.0, 100.0), true, (0.0, 100.0));
    assert!(!positive.was_floored());
    assert_eq!(positive.ticks(10), vec![1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0]);
}
