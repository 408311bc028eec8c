//! Sensor log acquisition
//!
//! Turns raw exported log text into a parsed [`SensorTable`]:
//! boilerplate removal first, then CSV tabulation.

pub mod cleaner;
pub mod table;

pub use cleaner::{clean_log, clean_log_with_stats, count_boilerplate, CleanStats};
pub use table::{Column, ColumnData, SensorTable, TableError};

/// Built-in sample log used by `--demo`.
pub const SAMPLE_LOG: &str = include_str!("../../data/sample_sensor_log.txt");
