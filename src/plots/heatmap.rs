//! Annotated correlation heatmap.
//!
//! Cells are coloured on a diverging blue-white-red scale over [-1, 1] and
//! annotated with r to two decimals. Row 0 is drawn at the top, matching the
//! printed matrix order. A colour bar sits to the right.

use super::{
    area_err, below, canvas, chart_err, draw_category_labels, draw_err, left_of, PlotError,
    Result,
};
use crate::config::PlotConfig;
use crate::stats::CorrelationMatrix;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// Diverging colour for r in [-1, 1]. NaN maps to light grey.
pub fn coolwarm(r: f64) -> RGBColor {
    if r.is_nan() {
        return RGBColor(240, 240, 240);
    }
    let t = (r.clamp(-1.0, 1.0) + 1.0) / 2.0;
    let (from, to, f) = if t < 0.5 {
        (COOL, NEUTRAL, t * 2.0)
    } else {
        (NEUTRAL, WARM, (t - 0.5) * 2.0)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * f).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// Render the matrix as an annotated heatmap.
pub fn draw_correlation_heatmap(matrix: &CorrelationMatrix, cfg: &PlotConfig, path: &Path) -> Result<()> {
    let n = matrix.len();
    if n == 0 {
        return Err(PlotError::InvalidData("Empty correlation matrix".to_string()));
    }
    let names = matrix.names();
    let size = n as f64;

    let root = canvas(path, cfg)?;
    let body = root
        .titled("Sensor Correlation Heatmap", ("sans-serif", 30))
        .map_err(area_err)?;
    let (cells_area, bar_area) = body.split_horizontally(cells_width(cfg.width));

    let mut chart = ChartBuilder::on(&cells_area)
        .margin(20)
        .x_label_area_size(110)
        .y_label_area_size(170)
        .build_cartesian_2d(0.0..size, 0.0..size)
        .map_err(chart_err)?;

    let cell_rows = (0..n).flat_map(|i| (0..n).map(move |j| (i, j)));
    chart
        .draw_series(cell_rows.clone().map(|(i, j)| {
            let top = size - i as f64;
            Rectangle::new(
                [(j as f64, top - 1.0), (j as f64 + 1.0, top)],
                coolwarm(matrix.get(i, j)).filled(),
            )
        }))
        .map_err(draw_err)?;

    let annotation_size = if n > 12 { 10 } else { 15 };
    chart
        .draw_series(cell_rows.map(|(i, j)| {
            let r = matrix.get(i, j);
            let text = if r.is_nan() { "nan".to_string() } else { format!("{r:.2}") };
            let ink = if r.abs() > 0.6 { WHITE } else { BLACK };
            Text::new(
                text,
                (j as f64 + 0.5, size - i as f64 - 0.5),
                ("sans-serif", annotation_size)
                    .into_font()
                    .color(&ink)
                    .pos(Pos::new(HPos::Center, VPos::Center)),
            )
        }))
        .map_err(draw_err)?;

    let x_labels: Vec<(String, (i32, i32))> = names
        .iter()
        .enumerate()
        .map(|(j, name)| {
            let (x, y) = chart.backend_coord(&(j as f64 + 0.5, 0.0));
            (name.clone(), (x, y + 8))
        })
        .collect();
    let y_labels: Vec<(String, (i32, i32))> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let (x, y) = chart.backend_coord(&(0.0, size - i as f64 - 0.5));
            (name.clone(), (x - 8, y))
        })
        .collect();
    draw_category_labels(&root, x_labels, below())?;
    draw_category_labels(&root, y_labels, left_of())?;

    draw_color_bar(&bar_area)?;

    root.present().map_err(draw_err)
}

fn draw_color_bar(area: &super::Area<'_>) -> Result<()> {
    const STEPS: usize = 100;

    let mut bar = ChartBuilder::on(area)
        .margin_top(40)
        .margin_bottom(130)
        .margin_right(20)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..1.0, -1.0..1.0)
        .map_err(chart_err)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(9)
        .y_label_formatter(&|v| format!("{v:.2}"))
        .label_style(("sans-serif", 12))
        .draw()
        .map_err(draw_err)?;

    let step = 2.0 / STEPS as f64;
    bar.draw_series((0..STEPS).map(|k| {
        let lo = -1.0 + step * k as f64;
        Rectangle::new([(0.0, lo), (1.0, lo + step)], coolwarm(lo + step / 2.0).filled())
    }))
    .map_err(draw_err)?;

    Ok(())
}

/// Width of the cell grid; the remaining 12% holds the colour bar.
fn cells_width(width: u32) -> u32 {
    u32::try_from(u64::from(width) * 88 / 100).unwrap_or(width)
}
