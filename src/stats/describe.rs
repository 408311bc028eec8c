//! Per-channel descriptive statistics.
//!
//! Count, mean, sample standard deviation, min, quartiles and max over the
//! present readings of a channel. Quartiles interpolate linearly between the
//! closest ranks, so a channel of `[1, 2, 3, 4]` has a 25% value of `1.75`.

use crate::acquisition::Column;
use statrs::statistics::Statistics;

/// Summary of one sensor channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Statistic labels in display order.
    pub const LABELS: [&'static str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    /// Values in the same order as [`Self::LABELS`].
    pub fn as_row(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Summarize a numeric column. Text columns summarize as empty.
pub fn summarize(column: &Column) -> ColumnSummary {
    summarize_values(&column.present_values())
}

/// Summarize raw readings (missing values already removed).
pub fn summarize_values(values: &[f64]) -> ColumnSummary {
    if values.is_empty() {
        return ColumnSummary {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        };
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    ColumnSummary {
        count: values.len(),
        mean: values.iter().mean(),
        std: values.iter().std_dev(),
        min: sorted[0],
        q25: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.5),
        q75: quantile_sorted(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    }
}

/// Linear-interpolation quantile of an ascending slice. `q` is clamped to
/// `[0, 1]`; an empty slice yields NaN.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
