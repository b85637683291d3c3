use serde::{Deserialize, Serialize};

/// Summary statistics for one column of values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Compute summary statistics; non-finite values count as missing.
pub fn summary(values: &[f64]) -> Summary {
    let mut vals: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let missing = values.len() - vals.len();
    vals.sort_by(f64::total_cmp);
    let count = vals.len();
    let min = vals.first().cloned();
    let max = vals.last().cloned();
    let mean = if count > 0 {
        Some(vals.iter().copied().sum::<f64>() / count as f64)
    } else {
        None
    };
    let median = if count == 0 {
        None
    } else if count % 2 == 1 {
        Some(vals[count / 2])
    } else {
        Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
    };
    Summary {
        count,
        missing,
        min,
        max,
        mean,
        median,
    }
}

/// `(min, max)` of the finite values, or `None` when there are none.
pub fn extent(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// The `n - 1` interior thresholds splitting an ascending `sorted` sample into
/// `n` groups of roughly equal size.
pub fn quantile_thresholds(sorted: &[f64], n: usize) -> Vec<f64> {
    if sorted.is_empty() {
        return Vec::new();
    }
    let len = sorted.len();
    (1..n)
        .map(|i| {
            let k = (len * i / n).min(len - 1);
            sorted[k]
        })
        .collect()
}
