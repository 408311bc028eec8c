//! Survey Configuration - report and chart settings as TOML values
//!
//! Every column subset, bin count and window size used by the chart battery
//! is a field here. Each struct implements `Default` with the stock values,
//! so a missing config file changes nothing.

use super::defaults;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "SENSORLOG_CONFIG";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "sensorlog.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one survey run.
///
/// Load with `SurveyConfig::load()` which searches:
/// 1. `$SENSORLOG_CONFIG` env var
/// 2. `./sensorlog.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// Text summary settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Chart battery settings
    #[serde(default)]
    pub plots: PlotConfig,
}

impl SurveyConfig {
    /// Load configuration using the standard search order:
    /// 1. `$SENSORLOG_CONFIG` environment variable
    /// 2. `./sensorlog.toml` in the current working directory
    /// 3. Built-in defaults
    ///
    /// A candidate that is missing or fails to load is skipped with a
    /// warning; loading never fails.
    pub fn load() -> Self {
        let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::load_from_sources(env_path.as_deref(), Path::new(DEFAULT_CONFIG_FILE))
    }

    /// [`load`](Self::load) with the env-var value and local file path given
    /// explicitly.
    pub fn load_from_sources(env_path: Option<&Path>, local_path: &Path) -> Self {
        // 1. Env var
        if let Some(p) = env_path {
            if p.exists() {
                match Self::load_from_file(p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded survey config from {}", CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %p.display(), "{} points to non-existent file, falling back", CONFIG_ENV_VAR);
            }
        }

        // 2. Local file
        if local_path.exists() {
            match Self::load_from_file(local_path) {
                Ok(config) => {
                    info!(path = %local_path.display(), "Loaded survey config");
                    return config;
                }
                Err(e) => {
                    warn!(path = %local_path.display(), error = %e, "Failed to load local config, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No survey config found, using built-in defaults");
        Self::default()
    }

    /// Load and validate a specific TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::ParseStr(source) => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate TOML text. Unknown keys only warn.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!(field = %w.field, "{}", w);
        }

        let config: Self = toml::from_str(contents).map_err(ConfigError::ParseStr)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML (used by `--print-config`).
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Reject values the chart stage cannot work with; log unusual ones.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_ranges(self);
        for w in &warnings {
            warn!(field = %w.field, "{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config parse error ({}): {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Config parse error: {0}")]
    ParseStr(toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Report
// ============================================================================

/// Text summary settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Rows shown in the data overview
    pub head_rows: usize,
    /// Strongest correlation pairs listed
    pub top_correlations: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            head_rows: defaults::HEAD_ROWS,
            top_correlations: defaults::TOP_CORRELATIONS,
        }
    }
}

// ============================================================================
// Plots
// ============================================================================

/// Chart battery settings. `*_columns` count leading sensor channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Render charts at all
    pub enabled: bool,
    /// Directory chart files are written to
    pub output_dir: PathBuf,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    pub histogram_columns: usize,
    pub histogram_bins: usize,
    /// Evaluation points of the density overlay
    pub kde_points: usize,
    pub time_series_columns: usize,
    /// Leading rows drawn in the time series
    pub time_series_rows: usize,
    pub box_plot_columns: usize,
    pub pair_plot_columns: usize,
    pub outlier_columns: usize,
    pub rolling_columns: usize,
    /// Trailing window of the rolling averages, in samples
    pub rolling_window: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
            width: defaults::CANVAS_WIDTH,
            height: defaults::CANVAS_HEIGHT,
            histogram_columns: defaults::HISTOGRAM_COLUMNS,
            histogram_bins: defaults::HISTOGRAM_BINS,
            kde_points: defaults::KDE_POINTS,
            time_series_columns: defaults::TIME_SERIES_COLUMNS,
            time_series_rows: defaults::TIME_SERIES_ROWS,
            box_plot_columns: defaults::BOX_PLOT_COLUMNS,
            pair_plot_columns: defaults::PAIR_PLOT_COLUMNS,
            outlier_columns: defaults::OUTLIER_COLUMNS,
            rolling_columns: defaults::ROLLING_COLUMNS,
            rolling_window: defaults::ROLLING_WINDOW,
        }
    }
}
