//! Box-and-whisker charts.
//!
//! Whiskers reach the most extreme reading within 1.5·IQR of the box;
//! readings beyond them are drawn as hollow circles.

use super::{
    area_err, below, canvas, channel_color, chart_err, draw_category_labels, draw_err, padded_range, Chart,
    PlotError, Result,
};
use crate::acquisition::Column;
use crate::config::PlotConfig;
use crate::stats::BoxSummary;
use plotters::prelude::*;
use std::path::Path;

/// Outlier grid shape (rows, columns).
const OUTLIER_GRID: (usize, usize) = (2, 3);

const BOX_HALF_WIDTH: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    /// Category along x, values along y
    Vertical,
    /// Values along x
    Horizontal,
}

/// Side-by-side vertical boxes, one per channel.
pub fn draw_box_plots(columns: &[&Column], cfg: &PlotConfig, path: &Path) -> Result<()> {
    if columns.is_empty() {
        return Err(PlotError::InvalidData("No channels to plot".to_string()));
    }

    let summaries: Vec<Option<BoxSummary>> = columns
        .iter()
        .map(|c| BoxSummary::from_values(&c.present_values()))
        .collect();
    let (lo, hi) = summaries
        .iter()
        .flatten()
        .map(BoxSummary::extent)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| (lo.min(a), hi.max(b)));

    let root = canvas(path, cfg)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Box Plot of Sensor Readings", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..columns.len() as f64, padded_range(lo, hi))
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|_: &f64| String::new())
        .y_desc("Values")
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(draw_err)?;

    for (idx, summary) in summaries.iter().enumerate() {
        if let Some(summary) = summary {
            draw_box(&mut chart, idx as f64 + 0.5, summary, Orientation::Vertical, channel_color(idx))?;
        }
    }

    let labels: Vec<(String, (i32, i32))> = columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let (x, y) = chart.backend_coord(&(idx as f64 + 0.5, chart.y_range().start));
            (column.name.clone(), (x, y + 8))
        })
        .collect();
    draw_category_labels(&root, labels, below())?;

    root.present().map_err(draw_err)
}

/// 2x3 grid of horizontal single-channel boxes.
pub fn draw_outliers(columns: &[&Column], cfg: &PlotConfig, path: &Path) -> Result<()> {
    if columns.is_empty() {
        return Err(PlotError::InvalidData("No channels to plot".to_string()));
    }

    let root = canvas(path, cfg)?;
    let panels = root.split_evenly(OUTLIER_GRID);

    for (idx, (column, panel)) in columns.iter().zip(panels.iter()).enumerate() {
        let title = format!("Outliers in {}", column.name);
        let Some(summary) = BoxSummary::from_values(&column.present_values()) else {
            panel.titled(&title, ("sans-serif", 18)).map_err(area_err)?;
            continue;
        };
        let (lo, hi) = summary.extent();

        let mut chart = ChartBuilder::on(panel)
            .caption(&title, ("sans-serif", 18))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(10)
            .build_cartesian_2d(padded_range(lo, hi), 0.0..1.0)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_label_formatter(&|_: &f64| String::new())
            .x_desc(column.name.as_str())
            .x_labels(6)
            .label_style(("sans-serif", 12))
            .draw()
            .map_err(draw_err)?;

        draw_box(&mut chart, 0.5, &summary, Orientation::Horizontal, channel_color(idx))?;
    }

    root.present().map_err(draw_err)
}

fn draw_box(
    chart: &mut Chart<'_, '_>,
    center: f64,
    summary: &BoxSummary,
    orientation: Orientation,
    color: RGBColor,
) -> Result<()> {
    let at = |pos: f64, value: f64| match orientation {
        Orientation::Vertical => (pos, value),
        Orientation::Horizontal => (value, pos),
    };
    let w = BOX_HALF_WIDTH;
    let outline = BLACK.stroke_width(1);

    chart
        .draw_series(std::iter::once(Rectangle::new(
            [at(center - w, summary.q1), at(center + w, summary.q3)],
            color.mix(0.7).filled(),
        )))
        .map_err(draw_err)?;
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [at(center - w, summary.q1), at(center + w, summary.q3)],
            outline,
        )))
        .map_err(draw_err)?;

    let strokes = vec![
        vec![at(center - w, summary.median), at(center + w, summary.median)],
        vec![at(center, summary.q1), at(center, summary.whisker_low)],
        vec![at(center, summary.q3), at(center, summary.whisker_high)],
        vec![at(center - w / 2.0, summary.whisker_low), at(center + w / 2.0, summary.whisker_low)],
        vec![at(center - w / 2.0, summary.whisker_high), at(center + w / 2.0, summary.whisker_high)],
    ];
    chart
        .draw_series(strokes.into_iter().map(|points| PathElement::new(points, outline)))
        .map_err(draw_err)?;

    chart
        .draw_series(summary.outliers.iter().map(|v| Circle::new(at(center, *v), 4, outline)))
        .map_err(draw_err)?;

    Ok(())
}
