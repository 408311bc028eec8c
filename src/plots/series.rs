//! Line charts over the row index: raw time series and rolling averages.

use super::{canvas, channel_color, chart_err, draw_err, padded_range, PlotError, Result};
use crate::acquisition::Column;
use crate::config::PlotConfig;
use crate::stats::rolling_mean;
use plotters::prelude::*;
use std::path::Path;

/// One named line; `None` entries break the line.
pub(crate) struct Line {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

/// First `time_series_rows` readings of each channel.
pub fn draw_time_series(columns: &[&Column], cfg: &PlotConfig, path: &Path) -> Result<()> {
    let rows = cfg.time_series_rows;
    let lines: Vec<Line> = columns
        .iter()
        .filter_map(|c| {
            c.values().map(|v| Line {
                label: c.name.clone(),
                values: v.iter().take(rows).copied().collect(),
            })
        })
        .collect();

    draw_lines(
        &lines,
        &format!("Time Series of Sensor Readings (First {rows} Rows)"),
        "Sensor Values",
        cfg,
        path,
    )
}

/// Trailing `rolling_window`-sample mean of each channel.
pub fn draw_rolling_averages(columns: &[&Column], cfg: &PlotConfig, path: &Path) -> Result<()> {
    let window = cfg.rolling_window;
    let lines: Vec<Line> = columns
        .iter()
        .filter_map(|c| {
            c.values().map(|v| Line {
                label: format!("{} ({window}-step avg)", c.name),
                values: rolling_mean(v, window),
            })
        })
        .collect();

    draw_lines(&lines, "Rolling Averages of Sensor Readings", "Values", cfg, path)
}

/// Contiguous runs of present values as `(index, value)` points.
pub(crate) fn segments(values: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (i, v) in values.iter().enumerate() {
        match v {
            Some(y) => current.push((i as f64, *y)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn draw_lines(lines: &[Line], title: &str, y_desc: &str, cfg: &PlotConfig, path: &Path) -> Result<()> {
    if lines.is_empty() {
        return Err(PlotError::InvalidData("No channels to plot".to_string()));
    }

    let n_points = lines.iter().map(|l| l.values.len()).max().unwrap_or(0).max(2);
    let (lo, hi) = lines
        .iter()
        .flat_map(|l| l.values.iter().flatten())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

    let root = canvas(path, cfg)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..(n_points - 1) as f64, padded_range(lo, hi))
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Time Steps")
        .y_desc(y_desc)
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(draw_err)?;

    let mut labelled = false;
    for (idx, line) in lines.iter().enumerate() {
        let color = channel_color(idx);
        for (run_idx, run) in segments(&line.values).into_iter().enumerate() {
            let anno = chart
                .draw_series(LineSeries::new(run, color.stroke_width(2)))
                .map_err(draw_err)?;
            if run_idx == 0 {
                labelled = true;
                anno.label(line.label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
            }
        }
    }

    if labelled {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", 14))
            .draw()
            .map_err(draw_err)?;
    }

    root.present().map_err(draw_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::SensorTable;

    #[test]
    fn test_segments_split_on_gaps() {
        let runs = segments(&[None, Some(1.0), Some(2.0), None, None, Some(5.0)]);
        assert_eq!(runs, vec![vec![(1.0, 1.0), (2.0, 2.0)], vec![(5.0, 5.0)]]);
        assert!(segments(&[None, None]).is_empty());
    }

    fn ramp_table(rows: usize) -> SensorTable {
        let mut text = String::from("a,b,c,d");
        for i in 0..rows {
            text.push_str(&format!("\n{i},{},{},{}", i * 2, (i % 7) as f64 * 0.5, 100 - i));
        }
        SensorTable::parse(&text).unwrap()
    }

    #[test]
    fn test_time_series_legend_lists_channels() {
        let table = ramp_table(150);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ts.svg");
        draw_time_series(&table.leading_numeric(5), &PlotConfig::default(), &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("First 100 Rows"));
        assert!(svg.contains(">d<"));
    }

    #[test]
    fn test_rolling_averages_label_window() {
        let table = ramp_table(60);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roll.svg");
        draw_rolling_averages(&table.leading_numeric(3), &PlotConfig::default(), &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("a (20-step avg)"));
        assert!(!svg.contains("d (20-step avg)"));
    }

    #[test]
    fn test_time_series_of_extreme_readings_returns() {
        let table = SensorTable::parse("a\n-1e308\n1e308\n0").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extreme.svg");
        draw_time_series(&table.leading_numeric(5), &PlotConfig::default(), &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains(">a<"));
    }

    #[test]
    fn test_rolling_shorter_than_window_still_renders() {
        let table = ramp_table(5);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.svg");
        draw_rolling_averages(&table.leading_numeric(3), &PlotConfig::default(), &path).unwrap();
        assert!(path.exists());
    }
}
