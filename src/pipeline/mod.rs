//! Survey Pipeline
//!
//! ```text
//! STAGE 1: Clean      strip UUID/page markers, trim, drop blank lines
//! STAGE 2: Tabulate   parse cleaned text as CSV into a SensorTable
//! STAGE 3: Describe   head, describe, correlation matrix
//! STAGE 4: Chart      render the SVG chart battery (unless disabled)
//! ```
//!
//! One pass per invocation; a tabulation failure stops the run before any
//! chart is written.

use crate::acquisition::{clean_log_with_stats, CleanStats, SensorTable, TableError};
use crate::config::SurveyConfig;
use crate::plots::{self, ChartFile, PlotError};
use crate::report;
use crate::stats::CorrelationMatrix;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that stop a survey run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to tabulate sensor log: {0}")]
    Table(#[from] TableError),

    #[error("Failed to render charts: {0}")]
    Plot(#[from] PlotError),
}

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct SurveyReport {
    pub clean_stats: CleanStats,
    pub n_rows: usize,
    pub n_columns: usize,
    pub numeric_columns: usize,
    /// Rendered `head` rows
    pub head: String,
    /// Rendered descriptive statistics
    pub describe: String,
    /// Rendered strongest correlations
    pub correlations: String,
    /// Chart files written, in battery order
    pub charts: Vec<ChartFile>,
}

/// Run the whole survey over `raw`.
///
/// Charts go to `output_dir` when given, else to `config.plots.output_dir`.
/// Nothing is drawn when `config.plots.enabled` is false.
pub fn run(raw: &str, config: &SurveyConfig, output_dir: Option<&Path>) -> Result<SurveyReport, PipelineError> {
    let started = Instant::now();

    let (cleaned, clean_stats) = clean_log_with_stats(raw);
    info!(
        markers = clean_stats.boilerplate_removed,
        lines_in = clean_stats.lines_in,
        lines_out = clean_stats.lines_out,
        "Stage 1: log cleaned"
    );

    let table = SensorTable::parse(&cleaned)?;
    let numeric_columns = table.numeric_columns();
    info!(
        rows = table.n_rows(),
        columns = table.n_columns(),
        numeric = numeric_columns.len(),
        "Stage 2: table parsed"
    );
    if numeric_columns.len() < table.n_columns() {
        warn!(
            skipped = table.n_columns() - numeric_columns.len(),
            "Non-numeric columns excluded from statistics and charts"
        );
    }

    let correlations = CorrelationMatrix::compute(&numeric_columns);
    let head = report::format_head(&table, config.report.head_rows);
    let describe = report::format_describe(&table);
    let correlation_text = report::format_correlations(&correlations, config.report.top_correlations);
    debug!(channels = correlations.len(), "Stage 3: summaries computed");

    let charts = if config.plots.enabled {
        let dir = output_dir.unwrap_or(&config.plots.output_dir);
        let charts = plots::render_all(&table, &correlations, &config.plots, dir)?;
        info!(charts = charts.len(), dir = %dir.display(), "Stage 4: charts rendered");
        charts
    } else {
        debug!("Stage 4: charts disabled");
        Vec::new()
    };

    info!(elapsed_ms = started.elapsed().as_millis(), "Survey complete");

    Ok(SurveyReport {
        clean_stats,
        n_rows: table.n_rows(),
        n_columns: table.n_columns(),
        numeric_columns: numeric_columns.len(),
        head,
        describe,
        correlations: correlation_text,
        charts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries_only() -> SurveyConfig {
        let mut config = SurveyConfig::default();
        config.plots.enabled = false;
        config
    }

    #[test]
    fn test_run_without_plots() {
        let raw = "0123abcd-0000-1111-2222-333344445555Page 1\n a,b \n1,2\n\n2,4\n3,7\n";
        let report = run(raw, &summaries_only(), None).unwrap();

        assert_eq!(report.clean_stats.boilerplate_removed, 1);
        assert_eq!(report.n_rows, 3);
        assert_eq!(report.n_columns, 2);
        assert!(report.charts.is_empty());
        assert_eq!(report.head.lines().next(), Some("   a  b"));
        assert!(report.head.contains("\n0  1  2"));
        assert!(report.correlations.starts_with("a ~ b"));
    }

    #[test]
    fn test_ragged_row_stops_run() {
        let err = run("a,b\n1,2\n3", &summaries_only(), None).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Table(TableError::RaggedRow { row: 2, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_empty_input_is_missing_header() {
        let err = run("   \n\n", &summaries_only(), None).unwrap_err();
        assert!(matches!(err, PipelineError::Table(TableError::MissingHeader)));
    }

    #[test]
    fn test_output_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("charts");
        let report = run("x,y\n1,3\n2,1\n3,2\n4,5", &SurveyConfig::default(), Some(&target)).unwrap();

        assert_eq!(report.charts.len(), 7);
        assert!(report.charts.iter().all(|c| c.path.starts_with(&target) && c.path.exists()));
    }
}
