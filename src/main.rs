//! sensorlog - Sensor Log Survey
//!
//! Cleans an exported sensor log, prints head/describe/correlation
//! summaries and writes the exploratory chart battery as SVG files.
//!
//! # Usage
//!
//! ```bash
//! # Survey the built-in sample log
//! cargo run --release -- --demo
//!
//! # Survey a file, charts into ./out
//! sensorlog export.txt --output-dir out
//!
//! # Read from stdin, summaries only
//! cat export.txt | sensorlog --no-plots
//! ```
//!
//! # Environment Variables
//!
//! - `SENSORLOG_CONFIG`: Path to a TOML config file
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use sensorlog::acquisition::SAMPLE_LOG;
use sensorlog::config::SurveyConfig;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "sensorlog")]
#[command(about = "Clean a sensor log and produce an exploratory survey")]
#[command(version)]
struct CliArgs {
    /// Log file to survey; `-` or omitted reads standard input
    #[arg(value_name = "INPUT", conflicts_with = "demo")]
    input: Option<PathBuf>,

    /// Survey the built-in sample log instead of reading input
    #[arg(long)]
    demo: bool,

    /// Directory for chart files (overrides `plots.output_dir`)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Print summaries only, write no charts
    #[arg(long)]
    no_plots: bool,

    /// Path to a TOML config file (else `SENSORLOG_CONFIG`, then ./sensorlog.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

// ============================================================================
// Input
// ============================================================================

enum Input {
    Demo,
    Stdin,
    File(PathBuf),
}

impl Input {
    fn from_args(args: &CliArgs) -> Self {
        if args.demo {
            return Self::Demo;
        }
        match &args.input {
            Some(path) if path.as_os_str() != "-" => Self::File(path.clone()),
            _ => Self::Stdin,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Demo => "built-in sample log".to_string(),
            Self::Stdin => "standard input".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            Self::Demo => Ok(SAMPLE_LOG.to_string()),
            Self::Stdin => {
                let mut raw = String::new();
                std::io::stdin()
                    .read_to_string(&mut raw)
                    .context("Failed to read standard input")?;
                Ok(raw)
            }
            Self::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

fn load_config(args: &CliArgs) -> Result<SurveyConfig> {
    let mut survey_config = match &args.config {
        Some(path) => SurveyConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SurveyConfig::load(),
    };
    if args.no_plots {
        survey_config.plots.enabled = false;
    }
    if let Some(dir) = &args.output_dir {
        survey_config.plots.output_dir.clone_from(dir);
    }
    Ok(survey_config)
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the summaries
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let survey_config = load_config(&args)?;
    if args.print_config {
        print!("{}", survey_config.to_toml()?);
        return Ok(());
    }

    let input = Input::from_args(&args);
    info!(input = %input.describe(), "Reading sensor log");
    let raw = input.read()?;

    let report = sensorlog::run(&raw, &survey_config, None)
        .with_context(|| format!("Survey of {} failed", input.describe()))?;

    println!("Data Overview:");
    println!("{}", report.head);
    println!();
    println!("Data Statistics:");
    println!("{}", report.describe);
    println!();
    println!("Strongest Correlations:");
    println!("{}", report.correlations);

    if !report.charts.is_empty() {
        println!();
        println!("Charts:");
        for chart in &report.charts {
            println!("  {}", chart.path.display());
        }
    }

    Ok(())
}
