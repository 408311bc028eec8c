//! Survey Configuration Module
//!
//! Report and chart settings loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `--config <path>` on the command line
//! 2. `SENSORLOG_CONFIG` environment variable (path to TOML file)
//! 3. `sensorlog.toml` in the current working directory
//! 4. Built-in defaults
//!
//! ## Usage
//!
//! Load once at startup and pass the config down:
//!
//! ```ignore
//! let config = SurveyConfig::load();
//! let report = sensorlog::run(&raw, &config, None)?;
//! ```

pub mod defaults;
mod survey_config;
pub mod validation;

pub use survey_config::*;
