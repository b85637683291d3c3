use crate::color::Rgb;
use serde::{Deserialize, Serialize};

/// One labelled input value (a parsed input row).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub label: String,
    #[serde(deserialize_with = "de_f64_lenient")]
    pub value: f64,
}

impl Category {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Share of the total assigned to one category.
///
/// `units` always sums to the requested total across one allocation pass;
/// `percentage` is the rounded display share and may differ from `units`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Allocation {
    pub label: String,
    pub value: f64,
    pub proportion: f64,
    pub units: u32,
    pub percentage: u32,
}

/// Row/column arrangement for a set of equally sized elements.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GridPlan {
    pub columns: usize,
    pub rows: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    pub spacing_h: f64,
    pub spacing_v: f64,
}

impl GridPlan {
    /// Number of cells the plan can hold.
    pub fn capacity(&self) -> usize {
        self.columns * self.rows
    }

    /// Total width including the gaps between columns.
    pub fn grid_width(&self) -> f64 {
        span(self.columns, self.cell_width, self.spacing_h)
    }

    /// Total height including the gaps between rows.
    pub fn grid_height(&self) -> f64 {
        span(self.rows, self.cell_height, self.spacing_v)
    }

    /// Top-left corner of cell `index`, filled row by row.
    pub fn cell_origin(&self, index: usize) -> Option<(f64, f64)> {
        if self.columns == 0 || index >= self.capacity() {
            return None;
        }
        let col = index % self.columns;
        let row = index / self.columns;
        Some((
            col as f64 * (self.cell_width + self.spacing_h),
            row as f64 * (self.cell_height + self.spacing_v),
        ))
    }

    /// Center point of cell `index`.
    pub fn cell_center(&self, index: usize) -> Option<(f64, f64)> {
        self.cell_origin(index)
            .map(|(x, y)| (x + self.cell_width / 2.0, y + self.cell_height / 2.0))
    }
}

pub(crate) fn span(count: usize, size: f64, spacing: f64) -> f64 {
    if count == 0 {
        0.0
    } else {
        size * count as f64 + spacing * (count - 1) as f64
    }
}

/// Raw input row for a composition-range chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RangeRow {
    pub group: String,
    #[serde(deserialize_with = "de_f64_lenient")]
    pub range_start: f64,
    #[serde(deserialize_with = "de_f64_lenient")]
    pub range_end: f64,
    #[serde(deserialize_with = "de_f64_lenient")]
    pub weight: f64,
}

impl RangeRow {
    pub fn new(group: impl Into<String>, range_start: f64, range_end: f64, weight: f64) -> Self {
        Self {
            group: group.into(),
            range_start,
            range_end,
            weight,
        }
    }
}

/// A slice of the composition bar plus the value range it covers.
///
/// `start`/`end` are cumulative percentages (0..=100); `range_start`/`range_end`
/// live on the independent value axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    pub label: String,
    pub start: f64,
    pub end: f64,
    pub range_start: f64,
    pub range_end: f64,
    pub is_open_start: bool,
    pub is_open_end: bool,
}

impl Segment {
    /// Width of the segment on the percentage axis.
    pub fn share(&self) -> f64 {
        self.end - self.start
    }
}

/// A tick label after de-overlap.
///
/// `true_position` is where the tick sits on the axis; `rendered_position` is
/// where its text goes. Hidden labels are not drawn at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScaleLabel {
    pub value: f64,
    pub true_position: f64,
    pub rendered_position: f64,
    pub hidden: bool,
    pub color: Rgb,
}

impl ScaleLabel {
    /// Whether the text was moved away from its tick.
    pub fn is_shifted(&self) -> bool {
        !self.hidden && self.rendered_position != self.true_position
    }
}

/// Parse a number the way chart input cells are read: surrounding whitespace and
/// thousands separators are ignored, anything unparseable becomes `0`.
pub fn parse_lenient(s: &str) -> f64 {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Serde helper: accept a JSON number, a numeric string, or anything else (as `0`).
fn de_f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct F64Visitor;

    impl<'de> Visitor<'de> for F64Visitor {
        type Value = f64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number or a string holding a number")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(if v.is_finite() { v } else { 0.0 })
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v as f64)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v as f64)
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(parse_lenient(s))
        }

        fn visit_bool<E>(self, _v: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(0.0)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(0.0)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(0.0)
        }
    }

    deserializer.deserialize_any(F64Visitor)
}
