//! Chart rendering
//!
//! Draws the exploratory chart battery with the [`plotters`] crate. Each
//! chart is written as its own SVG file, so rendering works headless and
//! needs no system fonts.
//!
//! ## Charts
//! - `histogram`: per-channel distributions with a density overlay, and the
//!   shared histogram panel used on the pair plot diagonal
//! - `heatmap`: annotated correlation heatmap with a colour bar
//! - `series`: time series and rolling averages
//! - `boxplot`: side-by-side box plots and single-channel outlier views
//! - `pairplot`: scatter matrix

pub mod boxplot;
pub mod heatmap;
pub mod histogram;
pub mod pairplot;
pub mod series;

use crate::acquisition::{Column, SensorTable};
use crate::config::PlotConfig;
use crate::stats::CorrelationMatrix;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to prepare output directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = core::result::Result<T, PlotError>;

pub(crate) type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;
pub(crate) type Chart<'a, 'b> = ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

pub(crate) fn area_err(e: impl std::fmt::Display) -> PlotError {
    PlotError::DrawingArea(e.to_string())
}

pub(crate) fn chart_err(e: impl std::fmt::Display) -> PlotError {
    PlotError::ChartConfig(e.to_string())
}

pub(crate) fn draw_err(e: impl std::fmt::Display) -> PlotError {
    PlotError::Drawing(e.to_string())
}

/// Line/marker colours, one per channel in order.
const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

pub(crate) fn channel_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Largest axis magnitude handed to plotters. Wider spans overflow its
/// tick arithmetic and never finish laying out the mesh.
pub(crate) const AXIS_LIMIT: f64 = 1e300;

/// `[lo, hi]` clamped to `±AXIS_LIMIT`. Readings outside still draw,
/// clipped at the plot edge. An empty range is widened around its value.
pub(crate) fn axis_range(lo: f64, hi: f64) -> Range<f64> {
    let lo = lo.clamp(-AXIS_LIMIT, AXIS_LIMIT);
    let hi = hi.clamp(-AXIS_LIMIT, AXIS_LIMIT);
    if lo < hi {
        return lo..hi;
    }
    let pad = (lo.abs() * 0.05).max(1.0);
    (lo - pad)..(hi + pad)
}

/// `[lo, hi]` widened by 5% each side; a flat range is widened by 1, or 5%
/// of its value when that is larger.
pub(crate) fn padded_range(lo: f64, hi: f64) -> Range<f64> {
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    if (hi - lo).abs() < f64::EPSILON {
        return axis_range(lo, hi);
    }
    let Range { start: lo, end: hi } = axis_range(lo, hi);
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}

/// New blank SVG canvas at `path`.
pub(crate) fn canvas<'a>(path: &'a Path, cfg: &PlotConfig) -> Result<Area<'a>> {
    let root = SVGBackend::new(path, (cfg.width, cfg.height)).into_drawing_area();
    root.fill(&WHITE).map_err(area_err)?;
    Ok(root)
}

/// Text style anchored at `pos`.
pub(crate) fn label_style(size: u32, pos: Pos) -> TextStyle<'static> {
    ("sans-serif", size).into_font().color(&BLACK).pos(pos)
}

/// Draw category names at absolute backend positions on the root canvas.
pub(crate) fn draw_category_labels(
    root: &Area<'_>,
    labels: impl IntoIterator<Item = (String, (i32, i32))>,
    pos: Pos,
) -> Result<()> {
    let style = label_style(13, pos);
    for (text, at) in labels {
        root.draw(&Text::new(text, at, style.clone()))
            .map_err(draw_err)?;
    }
    Ok(())
}

/// Anchor for labels hanging below an axis.
pub(crate) fn below() -> Pos {
    Pos::new(HPos::Center, VPos::Top)
}

/// Anchor for labels left of an axis.
pub(crate) fn left_of() -> Pos {
    Pos::new(HPos::Right, VPos::Center)
}

// ============================================================================
// Chart battery
// ============================================================================

/// The chart types of one survey, one file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Distributions,
    CorrelationHeatmap,
    TimeSeries,
    BoxPlots,
    PairPlot,
    Outliers,
    RollingAverages,
}

impl ChartKind {
    pub const ALL: [Self; 7] = [
        Self::Distributions,
        Self::CorrelationHeatmap,
        Self::TimeSeries,
        Self::BoxPlots,
        Self::PairPlot,
        Self::Outliers,
        Self::RollingAverages,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Distributions => "distributions.svg",
            Self::CorrelationHeatmap => "correlation_heatmap.svg",
            Self::TimeSeries => "time_series.svg",
            Self::BoxPlots => "box_plots.svg",
            Self::PairPlot => "pair_plot.svg",
            Self::Outliers => "outliers.svg",
            Self::RollingAverages => "rolling_averages.svg",
        }
    }
}

/// A chart file written by [`render_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartFile {
    pub kind: ChartKind,
    pub path: PathBuf,
}

/// Render every chart of the battery into `output_dir`.
///
/// Charts with no eligible channels are skipped with a warning; drawing
/// failures abort the run.
pub fn render_all(
    table: &SensorTable,
    correlations: &CorrelationMatrix,
    cfg: &PlotConfig,
    output_dir: &Path,
) -> Result<Vec<ChartFile>> {
    std::fs::create_dir_all(output_dir)?;

    if table.n_rows() == 0 || table.numeric_columns().is_empty() {
        warn!("No numeric readings to chart, skipping all charts");
        return Ok(Vec::new());
    }

    let mut written = Vec::new();
    for kind in ChartKind::ALL {
        let path = output_dir.join(kind.file_name());
        let drawn = match kind {
            ChartKind::Distributions => draw_if_any(table.leading_numeric(cfg.histogram_columns), |c| {
                histogram::draw_distributions(c, cfg, &path)
            })?,
            ChartKind::CorrelationHeatmap => {
                if correlations.is_empty() {
                    false
                } else {
                    heatmap::draw_correlation_heatmap(correlations, cfg, &path)?;
                    true
                }
            }
            ChartKind::TimeSeries => draw_if_any(table.leading_numeric(cfg.time_series_columns), |c| {
                series::draw_time_series(c, cfg, &path)
            })?,
            ChartKind::BoxPlots => draw_if_any(table.leading_numeric(cfg.box_plot_columns), |c| {
                boxplot::draw_box_plots(c, cfg, &path)
            })?,
            ChartKind::PairPlot => draw_if_any(table.leading_numeric(cfg.pair_plot_columns), |c| {
                pairplot::draw_pair_plot(c, cfg, &path)
            })?,
            ChartKind::Outliers => draw_if_any(table.leading_numeric(cfg.outlier_columns), |c| {
                boxplot::draw_outliers(c, cfg, &path)
            })?,
            ChartKind::RollingAverages => draw_if_any(table.leading_numeric(cfg.rolling_columns), |c| {
                series::draw_rolling_averages(c, cfg, &path)
            })?,
        };

        if drawn {
            info!(chart = kind.file_name(), path = %path.display(), "Chart written");
            written.push(ChartFile { kind, path });
        } else {
            warn!(chart = kind.file_name(), "No channels selected for chart, skipped");
        }
    }

    Ok(written)
}

fn draw_if_any(columns: Vec<&Column>, draw: impl FnOnce(&[&Column]) -> Result<()>) -> Result<bool> {
    if columns.is_empty() {
        return Ok(false);
    }
    draw(&columns)?;
    Ok(true)
}
