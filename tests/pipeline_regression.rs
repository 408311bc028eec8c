//! Pipeline Regression Tests
//!
//! Runs the full survey over the bundled sample log (data/sample_sensor_log.txt)
//! and asserts on cleaning, table shape, summaries and the chart battery.

use sensorlog::acquisition::{clean_log, count_boilerplate, SensorTable, SAMPLE_LOG};
use sensorlog::config::SurveyConfig;
use sensorlog::plots::ChartKind;
use sensorlog::stats::CorrelationMatrix;
use sensorlog::{run, PipelineError, TableError};

const CHANNELS: [&str; 8] = [
    "temperature_c",
    "pressure_kpa",
    "humidity_pct",
    "vibration_mm_s",
    "motor_current_a",
    "supply_voltage_v",
    "flow_lpm",
    "shaft_rpm",
];

fn summaries_only() -> SurveyConfig {
    let mut config = SurveyConfig::default();
    config.plots.enabled = false;
    config
}

// ============================================================================
// Cleaning + Tabulation
// ============================================================================

#[test]
fn sample_log_cleans_to_header_plus_rows() {
    assert_eq!(count_boilerplate(SAMPLE_LOG), 5);

    let cleaned = clean_log(SAMPLE_LOG);
    assert_eq!(count_boilerplate(&cleaned), 0);
    assert!(!cleaned.contains("Page"));
    assert!(!cleaned.ends_with('\n'));
    assert_eq!(cleaned.lines().count(), 161);
    assert!(cleaned.lines().all(|l| l == l.trim() && !l.is_empty()));
}

#[test]
fn sample_log_parses_all_channels() {
    let table = SensorTable::parse(&clean_log(SAMPLE_LOG)).unwrap();
    assert_eq!(table.n_rows(), 160);
    assert_eq!(table.column_names(), CHANNELS.to_vec());
    assert_eq!(table.numeric_columns().len(), 8);
}

#[test]
fn sample_log_self_correlation_is_one() {
    let table = SensorTable::parse(&clean_log(SAMPLE_LOG)).unwrap();
    let matrix = CorrelationMatrix::compute(&table.numeric_columns());
    for i in 0..matrix.len() {
        assert!((matrix.get(i, i) - 1.0).abs() < 1e-12, "diag {i}");
    }
}

// ============================================================================
// Summaries
// ============================================================================

#[test]
fn summaries_cover_every_channel() {
    let report = run(SAMPLE_LOG, &summaries_only(), None).unwrap();

    assert_eq!(report.n_rows, 160);
    assert_eq!(report.n_columns, 8);
    assert_eq!(report.numeric_columns, 8);
    assert_eq!(report.clean_stats.boilerplate_removed, 5);

    // header + default five rows
    assert_eq!(report.head.lines().count(), 6);
    // header + eight statistics
    assert_eq!(report.describe.lines().count(), 9);
    for channel in CHANNELS {
        assert!(report.head.contains(channel));
        assert!(report.describe.contains(channel));
    }
    assert!(report.describe.contains("160.000000"));
    assert_eq!(report.correlations.lines().count(), 5);
    assert!(report.charts.is_empty());
}

#[test]
fn head_rows_follow_config() {
    let mut config = summaries_only();
    config.report.head_rows = 2;
    let report = run(SAMPLE_LOG, &config, None).unwrap();
    assert_eq!(report.head.lines().count(), 3);
}

// ============================================================================
// Chart Battery
// ============================================================================

#[test]
fn full_run_writes_seven_charts() {
    let dir = tempfile::tempdir().unwrap();
    let report = run(SAMPLE_LOG, &SurveyConfig::default(), Some(dir.path())).unwrap();

    let kinds: Vec<ChartKind> = report.charts.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, ChartKind::ALL.to_vec());

    for chart in &report.charts {
        let svg = std::fs::read_to_string(&chart.path).unwrap();
        assert!(svg.contains("<svg"), "{} is not SVG", chart.path.display());
    }

    let heatmap = std::fs::read_to_string(dir.path().join("correlation_heatmap.svg")).unwrap();
    assert!(heatmap.contains("shaft_rpm"));
    let rolling = std::fs::read_to_string(dir.path().join("rolling_averages.svg")).unwrap();
    assert!(rolling.contains("temperature_c (20-step avg)"));
    assert!(!rolling.contains("vibration_mm_s (20-step avg)"));
}

#[test]
fn readings_spanning_f64_range_still_chart() {
    let dir = tempfile::tempdir().unwrap();
    let raw = "wide,calm\n-1e308,1.0\n1e308,2.0\n0,1.5\n5e307,1.2";
    let report = run(raw, &SurveyConfig::default(), Some(dir.path())).unwrap();
    assert_eq!(report.charts.len(), 7);
    assert!(report.charts.iter().all(|c| c.path.exists()));
}

#[test]
fn text_only_table_skips_charts() {
    let dir = tempfile::tempdir().unwrap();
    let report = run("site,operator\nnorth,ana\nsouth,li", &SurveyConfig::default(), Some(dir.path())).unwrap();
    assert_eq!(report.numeric_columns, 0);
    assert!(report.charts.is_empty());
}

// ============================================================================
// Failure Surfacing
// ============================================================================

#[test]
fn ragged_sample_is_rejected() {
    let broken = format!("{SAMPLE_LOG}\n1.0,2.0,3.0");
    let err = run(&broken, &summaries_only(), None).unwrap_err();
    match err {
        PipelineError::Table(TableError::RaggedRow { row, expected, found }) => {
            assert_eq!(row, 161);
            assert_eq!(expected, 8);
            assert_eq!(found, 3);
        }
        other => panic!("expected ragged row, got {other}"),
    }
}

#[test]
fn boilerplate_only_input_has_no_header() {
    let raw = "6513270e-269e-0d37-f2a7-4de452e6b438Page 1\n\n";
    let err = run(raw, &summaries_only(), None).unwrap_err();
    assert!(matches!(err, PipelineError::Table(TableError::MissingHeader)));
}
