//! Distribution shapes: histograms, Gaussian KDE, box summaries.

use super::describe::quantile_sorted;
use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

/// Whisker reach in IQRs beyond the box.
pub const WHISKER_IQR: f64 = 1.5;

/// Equal-width histogram. `edges` has one more entry than `counts`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if !self.counts.is_empty() => {
                let n = self.counts.len() as f64;
                hi / n - lo / n
            }
            _ => 0.0,
        }
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// `(lo, hi, count)` per bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(w, c)| (w[0], w[1], *c))
    }
}

/// Bin `values` into `bins` equal-width bins spanning `[min, max]`. The last
/// bin is closed on both sides. A constant series spans `[v - 0.5, v + 0.5]`.
/// Returns `None` for empty input or zero bins.
pub fn histogram(values: &[f64], bins: usize) -> Option<Histogram> {
    if values.is_empty() || bins == 0 {
        return None;
    }
    let (mut lo, mut hi) = min_max(values);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    // hi - lo overflows for readings near ±f64::MAX; keep every step finite
    let width = hi / bins as f64 - lo / bins as f64;

    let edges: Vec<f64> = (0..=bins).map(|i| lerp(lo, hi, i as f64 / bins as f64)).collect();
    let mut counts = vec![0usize; bins];
    for v in values {
        let idx = ((v / width - lo / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Some(Histogram { edges, counts })
}

/// Gaussian kernel density estimate on `points` evenly spaced positions
/// across the data range, bandwidth by Scott's rule (σ · n^(-1/5)).
///
/// Returns `(x, density)` pairs; empty when there are fewer than 2 readings
/// or the series is constant.
pub fn gaussian_kde(values: &[f64], points: usize) -> Vec<(f64, f64)> {
    if values.len() < 2 || points < 2 {
        return Vec::new();
    }
    let std = values.iter().std_dev();
    let bandwidth = std * (values.len() as f64).powf(-0.2);
    if !bandwidth.is_finite() || bandwidth <= 0.0 {
        return Vec::new();
    }
    let Ok(kernel) = Normal::new(0.0, 1.0) else {
        return Vec::new();
    };

    let (lo, hi) = min_max(values);
    let norm = values.len() as f64 * bandwidth;

    (0..points)
        .map(|i| {
            let x = lerp(lo, hi, i as f64 / (points - 1) as f64);
            let density: f64 = values
                .iter()
                .map(|v| kernel.pdf((x - v) / bandwidth))
                .sum::<f64>()
                / norm;
            (x, density)
        })
        .collect()
}

/// Box-and-whisker summary of a channel.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Lowest reading within `q1 - 1.5·IQR`
    pub whisker_low: f64,
    /// Highest reading within `q3 + 1.5·IQR`
    pub whisker_high: f64,
    /// Readings beyond the whiskers, ascending
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile_sorted(&sorted, 0.25);
        let median = quantile_sorted(&sorted, 0.5);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR * iqr;
        let high_fence = q3 + WHISKER_IQR * iqr;

        let inside = sorted.iter().copied().filter(|v| *v >= low_fence && *v <= high_fence);
        let whisker_low = inside.clone().next().unwrap_or(q1);
        let whisker_high = inside.last().unwrap_or(q3);

        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < low_fence || *v > high_fence)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }

    /// Lowest and highest drawn value (whiskers and outliers).
    pub fn extent(&self) -> (f64, f64) {
        let lo = self.outliers.first().map_or(self.whisker_low, |o| o.min(self.whisker_low));
        let hi = self.outliers.last().map_or(self.whisker_high, |o| o.max(self.whisker_high));
        (lo, hi)
    }
}

/// Point `t` of the way from `a` to `b`, without forming `b - a`.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Smallest and largest value. Callers guarantee non-empty input.
pub(crate) fn min_max(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(*v), hi.max(*v))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts_and_closed_last_bin() {
        let h = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();
        assert_eq!(h.edges, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(h.counts, vec![1, 1, 1, 2]);
        assert!((h.bin_width() - 1.0).abs() < 1e-12);
        assert_eq!(h.max_count(), 2);
        assert_eq!(h.bins().count(), 4);
    }

    #[test]
    fn test_histogram_constant_and_empty() {
        let h = histogram(&[3.0, 3.0, 3.0], 2).unwrap();
        assert_eq!(h.edges, vec![2.5, 3.0, 3.5]);
        assert_eq!(h.counts.iter().sum::<usize>(), 3);
        assert!(histogram(&[], 30).is_none());
        assert!(histogram(&[1.0], 0).is_none());
    }

    #[test]
    fn test_histogram_thirty_bins_keep_every_value() {
        let values: Vec<f64> = (0..97).map(|i| f64::from(i).sin()).collect();
        let h = histogram(&values, 30).unwrap();
        assert_eq!(h.counts.len(), 30);
        assert_eq!(h.counts.iter().sum::<usize>(), 97);
    }

    #[test]
    fn test_kde_integrates_close_to_one() {
        let values: Vec<f64> = (0..200).map(|i| f64::from(i % 20)).collect();
        let curve = gaussian_kde(&values, 400);
        assert_eq!(curve.len(), 400);
        let step = curve[1].0 - curve[0].0;
        let area: f64 = curve.iter().map(|(_, d)| d * step).sum();
        // cut at the data range, so a little mass falls outside
        assert!(area > 0.85 && area < 1.01, "area = {area}");
    }

    #[test]
    fn test_kde_degenerate_inputs() {
        assert!(gaussian_kde(&[1.0], 100).is_empty());
        assert!(gaussian_kde(&[2.0, 2.0, 2.0], 100).is_empty());
    }

    #[test]
    fn test_box_summary_flags_far_value() {
        let mut values: Vec<f64> = (1..=20).map(f64::from).collect();
        values.push(100.0);
        let b = BoxSummary::from_values(&values).unwrap();
        assert!((b.median - 11.0).abs() < 1e-12);
        assert!((b.q1 - 6.0).abs() < 1e-12);
        assert!((b.q3 - 16.0).abs() < 1e-12);
        assert_eq!(b.outliers, vec![100.0]);
        assert!((b.whisker_low - 1.0).abs() < 1e-12);
        assert!((b.whisker_high - 20.0).abs() < 1e-12);
        assert_eq!(b.extent(), (1.0, 100.0));
    }

    #[test]
    fn test_box_summary_empty() {
        assert!(BoxSummary::from_values(&[]).is_none());
        let single = BoxSummary::from_values(&[4.0]).unwrap();
        assert!(single.outliers.is_empty());
        assert_eq!(single.extent(), (4.0, 4.0));
    }

    #[test]
    fn test_histogram_spanning_full_f64_range_stays_finite() {
        let h = histogram(&[-1e308, 1e308, 0.0], 30).unwrap();
        assert!(h.edges.iter().all(|e| e.is_finite()));
        assert_eq!(h.edges[0], -1e308);
        assert_eq!(h.edges[30], 1e308);
        assert!(h.bin_width().is_finite());
        assert_eq!(h.counts.iter().sum::<usize>(), 3);
        assert_eq!(h.counts[0], 1);
        assert_eq!(h.counts[29], 1);
        assert_eq!(h.counts[15], 1);
    }

    #[test]
    fn test_kde_on_overflowing_spread_is_empty() {
        assert!(gaussian_kde(&[-1e308, 1e308, 0.0], 50).is_empty());
    }
}
