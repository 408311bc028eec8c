//! System-wide default constants.
//!
//! Grouped by the stage that consumes them.

// ============================================================================
// Text summaries
// ============================================================================

/// Rows printed in the data overview.
pub const HEAD_ROWS: usize = 5;

/// Strongest correlation pairs printed after the statistics table.
pub const TOP_CORRELATIONS: usize = 5;

// ============================================================================
// Charts
// ============================================================================

/// Chart output directory, relative to the working directory.
pub const OUTPUT_DIR: &str = "plots";

/// Canvas size in pixels (15 x 10 inches at 100 dpi).
pub const CANVAS_WIDTH: u32 = 1500;
pub const CANVAS_HEIGHT: u32 = 1000;

/// Largest accepted canvas side in pixels.
pub const MAX_CANVAS_SIDE: u32 = 20_000;

/// Histogram grid: first 8 channels in a 3x3 layout.
pub const HISTOGRAM_COLUMNS: usize = 8;
pub const HISTOGRAM_BINS: usize = 30;

/// Density overlay evaluation points.
pub const KDE_POINTS: usize = 200;

/// Time series: first 5 channels over the first 100 rows.
pub const TIME_SERIES_COLUMNS: usize = 5;
pub const TIME_SERIES_ROWS: usize = 100;

/// Side-by-side box plots of the first 8 channels.
pub const BOX_PLOT_COLUMNS: usize = 8;

/// Pair plot of the first 5 channels.
pub const PAIR_PLOT_COLUMNS: usize = 5;

/// Single-channel outlier box plots: first 6 channels in a 2x3 layout.
pub const OUTLIER_COLUMNS: usize = 6;

/// Rolling averages: first 3 channels, 20-sample trailing window.
pub const ROLLING_COLUMNS: usize = 3;
pub const ROLLING_WINDOW: usize = 20;
