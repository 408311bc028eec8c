//! Scatter matrix across channels.
//!
//! Off-diagonal cells scatter one channel against another over the rows
//! where both are present; diagonal cells show the channel's histogram.

use super::histogram::{draw_histogram_panel, HistogramPanel};
use super::{area_err, canvas, channel_color, chart_err, draw_err, padded_range, PlotError, Result};
use crate::acquisition::Column;
use crate::config::PlotConfig;
use crate::stats::distribution::min_max;
use plotters::prelude::*;
use std::path::Path;

/// Diagonal histogram resolution.
const DIAGONAL_BINS: usize = 20;

/// Rows where both channels have a reading.
pub(crate) fn paired_points(x: &[Option<f64>], y: &[Option<f64>]) -> Vec<(f64, f64)> {
    x.iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect()
}

/// n x n grid of pairwise scatter plots.
pub fn draw_pair_plot(columns: &[&Column], cfg: &PlotConfig, path: &Path) -> Result<()> {
    let series: Vec<(&str, &[Option<f64>])> = columns
        .iter()
        .filter_map(|c| c.values().map(|v| (c.name.as_str(), v)))
        .collect();
    let n = series.len();
    if n == 0 {
        return Err(PlotError::InvalidData("No channels to plot".to_string()));
    }

    let root = canvas(path, cfg)?;
    let body = root
        .titled("Pair Plot of Sensor Relationships", ("sans-serif", 30))
        .map_err(area_err)?;
    let cells = body.split_evenly((n, n));

    for (cell_idx, cell) in cells.iter().enumerate() {
        let (row, col) = (cell_idx / n, cell_idx % n);
        let (y_name, y_values) = series[row];
        let (x_name, x_values) = series[col];
        let x_desc = (row == n - 1).then_some(x_name);
        let y_desc = (col == 0).then_some(y_name);

        if row == col {
            let values: Vec<f64> = x_values.iter().flatten().copied().collect();
            draw_histogram_panel(
                cell,
                &HistogramPanel {
                    title: None,
                    x_desc,
                    y_desc,
                    bins: DIAGONAL_BINS,
                    kde_points: None,
                    color: channel_color(col),
                },
                &values,
            )?;
            continue;
        }

        let points = paired_points(x_values, y_values);
        if points.is_empty() {
            continue;
        }
        let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
        let (x_lo, x_hi) = min_max(&xs);
        let (y_lo, y_hi) = min_max(&ys);

        let mut chart = ChartBuilder::on(cell)
            .margin(8)
            .x_label_area_size(28)
            .y_label_area_size(40)
            .build_cartesian_2d(padded_range(x_lo, x_hi), padded_range(y_lo, y_hi))
            .map_err(chart_err)?;

        let mut mesh = chart.configure_mesh();
        mesh.label_style(("sans-serif", 11)).x_labels(4).y_labels(4);
        if let Some(desc) = x_desc {
            mesh.x_desc(desc);
        }
        if let Some(desc) = y_desc {
            mesh.y_desc(desc);
        }
        mesh.draw().map_err(draw_err)?;

        let color = channel_color(col).mix(0.6);
        chart
            .draw_series(points.into_iter().map(|p| Circle::new(p, 2, color.filled())))
            .map_err(draw_err)?;
    }

    root.present().map_err(draw_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::SensorTable;

    #[test]
    fn test_paired_points_skip_missing() {
        let x = [Some(1.0), None, Some(3.0), Some(4.0)];
        let y = [Some(10.0), Some(20.0), None, Some(40.0)];
        assert_eq!(paired_points(&x, &y), vec![(1.0, 10.0), (4.0, 40.0)]);
    }

    #[test]
    fn test_pair_plot_axes_named_on_edges() {
        let mut text = String::from("rpm,current,temp");
        for i in 0..30 {
            text.push_str(&format!("\n{},{},{}", 1000 + i * 10, f64::from(i) * 0.3, 20 + i % 4));
        }
        let table = SensorTable::parse(&text).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pair.svg");

        draw_pair_plot(&table.leading_numeric(5), &PlotConfig::default(), &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Pair Plot of Sensor Relationships"));
        assert!(svg.contains(">rpm<"));
        assert!(svg.contains(">temp<"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn test_single_channel_draws_histogram_only() {
        let table = SensorTable::parse("solo\n1\n2\n2\n3").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solo.svg");
        draw_pair_plot(&table.leading_numeric(5), &PlotConfig::default(), &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(!svg.contains("<circle"));
    }
}
