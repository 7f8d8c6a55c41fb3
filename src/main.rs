//! Indicator Digest - reshape and summarize case-count & development-indicator data
//!
//! Reads both datasets from a dated run directory and writes the pivoted
//! per-country table as CSV.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use indicator_digest::data::{write_csv, write_summary_json, LocalDirectory};
use indicator_digest::{pipeline, RunConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "indicator_digest")]
#[command(about = "Summarize development indicators for countries with case data")]
#[command(version)]
struct Args {
    /// JSON run configuration; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Root directory holding dated run directories
    #[arg(long)]
    data_root: Option<PathBuf>,

    /// Run date (YYYY-MM-DD) selecting `<data_root>/<date>`
    #[arg(long)]
    run_date: Option<NaiveDate>,

    /// Read the datasets from this directory instead of the dated one
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Number of most recent years to keep
    #[arg(long)]
    window_years: Option<usize>,

    /// Pivot table CSV destination
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the per-series summaries as JSON
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn build_config(args: &Args) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => RunConfig::default(),
    };

    if let Some(root) = &args.data_root {
        config.data_root = root.clone();
    }
    if let Some(date) = args.run_date {
        config.run_date = date;
    }
    if let Some(years) = args.window_years {
        config.window_years = years;
    }
    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if let Some(summary) = &args.summary_json {
        config.summary_json = Some(summary.clone());
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = build_config(&args)?;
    let dir = args
        .input_dir
        .clone()
        .unwrap_or_else(|| config.run_directory());
    info!(dir = %dir.display(), "starting run");

    let source = LocalDirectory::new(&dir, &config.cases_file, &config.indicators_file);
    let mut output = pipeline::run(&config, &source)
        .with_context(|| format!("pipeline failed for {}", dir.display()))?;

    write_csv(&mut output.pivot, &config.output)
        .with_context(|| format!("writing {}", config.output.display()))?;
    info!(path = %config.output.display(), "wrote pivot table");

    if let Some(path) = &config.summary_json {
        write_summary_json(&output.summaries, path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote summaries");
    }

    Ok(())
}
