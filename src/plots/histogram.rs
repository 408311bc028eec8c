//! Per-channel distribution histograms with a Gaussian density overlay.

use super::{area_err, axis_range, canvas, channel_color, chart_err, draw_err, Area, PlotError, Result};
use crate::acquisition::Column;
use crate::config::PlotConfig;
use crate::stats::{gaussian_kde, histogram};
use plotters::prelude::*;
use std::path::Path;

/// Panels per side of the distribution grid.
const GRID: usize = 3;

/// 3x3 grid of histograms, one per channel, KDE curve on top.
pub fn draw_distributions(columns: &[&Column], cfg: &PlotConfig, path: &Path) -> Result<()> {
    if columns.is_empty() {
        return Err(PlotError::InvalidData("No channels to plot".to_string()));
    }

    let root = canvas(path, cfg)?;
    let body = root
        .titled("Sensor Value Distributions", ("sans-serif", 30))
        .map_err(area_err)?;
    let panels = body.split_evenly((GRID, GRID));

    for (idx, (column, panel)) in columns.iter().zip(panels.iter()).enumerate() {
        let values = column.present_values();
        draw_histogram_panel(
            panel,
            &HistogramPanel {
                title: Some(format!("Distribution of {}", column.name)),
                x_desc: None,
                y_desc: Some("Count"),
                bins: cfg.histogram_bins,
                kde_points: Some(cfg.kde_points),
                color: channel_color(idx),
            },
            &values,
        )?;
    }

    root.present().map_err(draw_err)
}

/// Appearance of one histogram panel.
pub(crate) struct HistogramPanel<'a> {
    pub title: Option<String>,
    pub x_desc: Option<&'a str>,
    pub y_desc: Option<&'a str>,
    pub bins: usize,
    /// Density overlay resolution; `None` draws bars only
    pub kde_points: Option<usize>,
    pub color: RGBColor,
}

/// Draw one histogram into `area`. A channel with no readings leaves the
/// panel with its title only.
pub(crate) fn draw_histogram_panel(area: &Area<'_>, panel: &HistogramPanel<'_>, values: &[f64]) -> Result<()> {
    let Some(hist) = histogram(values, panel.bins) else {
        if let Some(title) = &panel.title {
            area.titled(title, ("sans-serif", 16)).map_err(area_err)?;
        }
        return Ok(());
    };

    let x_range = axis_range(hist.edges[0], hist.edges[hist.edges.len() - 1]);
    let y_max = hist.max_count().max(1) as f64 * 1.1;

    let mut builder = ChartBuilder::on(area);
    builder.margin(8).x_label_area_size(28).y_label_area_size(40);
    if let Some(title) = &panel.title {
        builder.caption(title, ("sans-serif", 16));
    }
    let mut chart = builder
        .build_cartesian_2d(x_range, 0.0..y_max)
        .map_err(chart_err)?;

    let mut mesh = chart.configure_mesh();
    mesh.label_style(("sans-serif", 11)).x_labels(5).y_labels(5);
    if let Some(desc) = panel.x_desc {
        mesh.x_desc(desc);
    }
    if let Some(desc) = panel.y_desc {
        mesh.y_desc(desc);
    }
    mesh.draw().map_err(draw_err)?;

    let color = panel.color;
    chart
        .draw_series(hist.bins().map(|(lo, hi, count)| {
            Rectangle::new([(lo, 0.0), (hi, count as f64)], color.mix(0.5).filled())
        }))
        .map_err(draw_err)?;

    if let Some(points) = panel.kde_points {
        // density scaled to bar heights
        let scale = values.len() as f64 * hist.bin_width();
        let curve = gaussian_kde(values, points);
        if !curve.is_empty() {
            chart
                .draw_series(LineSeries::new(
                    curve.into_iter().map(|(x, d)| (x, d * scale)),
                    color.stroke_width(2),
                ))
                .map_err(draw_err)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::ColumnData;

    fn column(name: &str, values: &[f64]) -> Column {
        Column {
            name: name.to_string(),
            data: ColumnData::Numeric(values.iter().copied().map(Some).collect()),
        }
    }

    #[test]
    fn test_distribution_grid_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dist.svg");
        let a = column("alpha", &(0..60).map(|i| f64::from(i % 17)).collect::<Vec<_>>());
        let b = column("beta", &[1.0, 1.0, 1.0]);
        let c = Column {
            name: "gamma".to_string(),
            data: ColumnData::Numeric(vec![None, None]),
        };

        draw_distributions(&[&a, &b, &c], &PlotConfig::default(), &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Distribution of alpha"));
        assert!(svg.contains("Distribution of gamma"));
    }

    #[test]
    fn test_distribution_of_extreme_readings_returns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extreme.svg");
        let wide = column("wide", &[-1e308, 1e308, 0.0]);

        draw_distributions(&[&wide], &PlotConfig::default(), &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Distribution of wide"));
    }

    #[test]
    fn test_no_channels_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let err = draw_distributions(&[], &PlotConfig::default(), &dir.path().join("x.svg"));
        assert!(matches!(err, Err(PlotError::InvalidData(_))));
    }
}
