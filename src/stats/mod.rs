//! Descriptive statistics over sensor channels
//!
//! ## Architecture
//! - `describe`: count / mean / std / quartiles per channel
//! - `correlation`: Pearson matrix with Student-t p-values (statrs)
//! - `rolling`: trailing moving averages
//! - `distribution`: histograms, Gaussian KDE, box-and-whisker summaries

pub mod correlation;
pub mod describe;
pub mod distribution;
pub mod rolling;

pub use correlation::{pearson, p_value, CorrelationMatrix, CorrelationPair};
pub use describe::{quantile_sorted, summarize, summarize_values, ColumnSummary};
pub use distribution::{gaussian_kde, histogram, BoxSummary, Histogram};
pub use rolling::rolling_mean;
