//! Pearson Correlation Matrix
//!
//! Pairwise Pearson correlations between sensor channels with two-tailed
//! p-values from the Student's t-distribution (statrs).
//!
//! ## Key Features
//! - Pairwise-complete observations: a row contributes to a pair only when
//!   both channels have a reading
//! - Diagonal is exactly 1.0 for every non-constant channel
//! - Constant channels, or pairs with fewer than 2 shared readings, are NaN
//! - Strongest off-diagonal pairs ranked by |r| for the text summary

use crate::acquisition::Column;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Square matrix of Pearson r over a set of named channels.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    names: Vec<String>,
    /// Row-major, `names.len()` squared
    values: Vec<f64>,
    /// Shared sample count per cell, row-major
    counts: Vec<usize>,
}

/// One off-diagonal entry of the matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationPair {
    pub x: String,
    pub y: String,
    pub r: f64,
    pub p_value: f64,
    pub sample_count: usize,
}

impl CorrelationMatrix {
    /// Compute the matrix over numeric columns. Text columns are skipped.
    pub fn compute(columns: &[&Column]) -> Self {
        let series: Vec<(&str, &[Option<f64>])> = columns
            .iter()
            .filter_map(|c| c.values().map(|v| (c.name.as_str(), v)))
            .collect();

        let n = series.len();
        let mut values = vec![f64::NAN; n * n];
        let mut counts = vec![0; n * n];

        for i in 0..n {
            for j in i..n {
                let (x, y) = paired(series[i].1, series[j].1);
                let r = if i == j {
                    if is_constant(&x) { f64::NAN } else { 1.0 }
                } else {
                    pearson(&x, &y)
                };
                values[i * n + j] = r;
                values[j * n + i] = r;
                counts[i * n + j] = x.len();
                counts[j * n + i] = x.len();
            }
        }

        Self {
            names: series.iter().map(|(name, _)| (*name).to_string()).collect(),
            values,
            counts,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// r between channels `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.len() + j]
    }

    /// r between two channels by name.
    pub fn by_name(&self, x: &str, y: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == x)?;
        let j = self.names.iter().position(|n| n == y)?;
        Some(self.get(i, j))
    }

    /// Off-diagonal pairs sorted by |r|, strongest first, NaN entries
    /// dropped. At most `k` pairs.
    pub fn strongest_pairs(&self, k: usize) -> Vec<CorrelationPair> {
        let n = self.len();
        let mut pairs: Vec<CorrelationPair> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .filter_map(|(i, j)| {
                let r = self.get(i, j);
                if r.is_nan() {
                    return None;
                }
                let sample_count = self.counts[i * n + j];
                Some(CorrelationPair {
                    x: self.names[i].clone(),
                    y: self.names[j].clone(),
                    r,
                    p_value: p_value(r, sample_count),
                    sample_count,
                })
            })
            .collect();

        pairs.sort_by(|a, b| b.r.abs().total_cmp(&a.r.abs()));
        pairs.truncate(k);
        pairs
    }
}

/// Rows where both series have a reading.
fn paired(x: &[Option<f64>], y: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip()
}

fn is_constant(x: &[f64]) -> bool {
    x.len() < 2 || x.iter().all(|v| *v == x[0])
}

/// Pearson correlation coefficient.
///
/// Formula: r = Σ[(xi - x̄)(yi - ȳ)] / sqrt(Σ(xi - x̄)² × Σ(yi - ȳ)²)
///
/// NaN when fewer than 2 samples, lengths differ, or either side is constant.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n < 2 || n != y.len() {
        return f64::NAN;
    }
    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denominator = (sxx * syy).sqrt();
    if denominator == 0.0 {
        return f64::NAN;
    }
    (sxy / denominator).clamp(-1.0, 1.0)
}

/// Two-tailed p-value for r over `n` samples.
///
/// Formula: t = r × sqrt(n-2) / sqrt(1-r²), t-distribution with n-2 degrees
/// of freedom.
pub fn p_value(r: f64, n: usize) -> f64 {
    if n < 3 || r.is_nan() {
        return 1.0;
    }

    // Perfect or near-perfect correlation is highly significant
    if r.abs() >= 0.9999 {
        return 0.0;
    }

    let df = (n - 2) as f64;
    let t_stat = r * df.sqrt() / (1.0 - r * r).sqrt();

    match StudentsT::new(0.0, 1.0, df) {
        Ok(t_dist) => 2.0 * (1.0 - t_dist.cdf(t_stat.abs())),
        Err(_) => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::ColumnData;

    fn numeric(name: &str, values: &[Option<f64>]) -> Column {
        Column {
            name: name.to_string(),
            data: ColumnData::Numeric(values.to_vec()),
        }
    }

    fn dense(name: &str, values: &[f64]) -> Column {
        let v: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
        numeric(name, &v)
    }

    #[test]
    fn test_self_correlation_is_one() {
        let a = dense("a", &[1.0, 4.0, 2.0, 8.0, 5.0]);
        let m = CorrelationMatrix::compute(&[&a]);
        assert!((m.get(0, 0) - 1.0).abs() < 1e-12);
        assert!((pearson(&[1.0, 4.0, 2.0], &[1.0, 4.0, 2.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_positive_and_negative() {
        let a = dense("a", &[1.0, 2.0, 3.0, 4.0]);
        let b = dense("b", &[2.0, 4.0, 6.0, 8.0]);
        let c = dense("c", &[4.0, 3.0, 2.0, 1.0]);
        let m = CorrelationMatrix::compute(&[&a, &b, &c]);
        assert!((m.by_name("a", "b").unwrap() - 1.0).abs() < 1e-12);
        assert!((m.by_name("a", "c").unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(m.get(1, 2), m.get(2, 1));
    }

    #[test]
    fn test_constant_channel_is_nan() {
        let a = dense("a", &[1.0, 2.0, 3.0]);
        let k = dense("k", &[5.0, 5.0, 5.0]);
        let m = CorrelationMatrix::compute(&[&a, &k]);
        assert!(m.get(1, 1).is_nan());
        assert!(m.get(0, 1).is_nan());
        assert!(m.strongest_pairs(5).is_empty());
    }

    #[test]
    fn test_pairwise_complete_observations() {
        let a = numeric("a", &[Some(1.0), Some(2.0), None, Some(4.0)]);
        let b = numeric("b", &[Some(10.0), Some(20.0), Some(99.0), Some(40.0)]);
        let m = CorrelationMatrix::compute(&[&a, &b]);
        assert!((m.get(0, 1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_text_columns_are_skipped() {
        let a = dense("a", &[1.0, 2.0]);
        let t = Column {
            name: "label".to_string(),
            data: ColumnData::Text(vec!["x".into(), "y".into()]),
        };
        let m = CorrelationMatrix::compute(&[&a, &t]);
        assert_eq!(m.names(), &["a".to_string()]);
    }

    #[test]
    fn test_strongest_pairs_order() {
        let a = dense("a", &[1.0, 2.0, 3.0, 4.0, 5.0]);
        let b = dense("b", &[1.1, 2.0, 2.9, 4.2, 5.0]);
        let c = dense("c", &[3.0, 1.0, 4.0, 1.0, 5.0]);
        let m = CorrelationMatrix::compute(&[&a, &b, &c]);
        let pairs = m.strongest_pairs(2);
        assert_eq!(pairs.len(), 2);
        assert_eq!((pairs[0].x.as_str(), pairs[0].y.as_str()), ("a", "b"));
        assert!(pairs[0].r.abs() >= pairs[1].r.abs());
        assert_eq!(pairs[0].sample_count, 5);
    }

    #[test]
    fn test_p_value_edges() {
        assert!((p_value(0.5, 2) - 1.0).abs() < f64::EPSILON);
        assert!(p_value(1.0, 50).abs() < f64::EPSILON);
        assert!(p_value(0.0, 50) > 0.99);
        assert!(p_value(0.8, 100) < 0.001);
    }
}
