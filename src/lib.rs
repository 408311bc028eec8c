//! sensorlog: Sensor Log Survey
//!
//! Cleans exported sensor logs, tabulates the readings and produces an
//! exploratory survey: textual summaries plus a battery of SVG charts.
//!
//! ## Architecture
//!
//! - **Acquisition**: boilerplate removal and CSV tabulation
//! - **Stats**: describe, Pearson correlation, rolling means, distributions
//! - **Plots**: histograms, heatmap, time series, box plots, pair plot
//! - **Report**: console tables for head, describe and correlations
//! - **Pipeline**: one-shot clean → tabulate → describe → chart run

pub mod acquisition;
pub mod config;
pub mod pipeline;
pub mod plots;
pub mod report;
pub mod stats;

// Re-export configuration
pub use config::{ConfigError, PlotConfig, ReportConfig, SurveyConfig};

// Re-export acquisition types
pub use acquisition::{clean_log, CleanStats, Column, ColumnData, SensorTable, TableError};

// Re-export statistics
pub use stats::{ColumnSummary, CorrelationMatrix, CorrelationPair};

// Re-export charts
pub use plots::{ChartFile, ChartKind, PlotError};

// Re-export pipeline
pub use pipeline::{run, PipelineError, SurveyReport};
