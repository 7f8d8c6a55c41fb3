//! End-to-end run: raw tables in, summaries and pivot table out.

use crate::config::RunConfig;
use crate::data::{
    clean_indicator_frame, filter_countries, filter_indicators, normalize_columns,
    prepare_case_frame, CleanOptions, DataProcessor, DatasetSource, RawDatasets,
};
use crate::error::Result;
use crate::stats::{PivotAssembler, StatsCalculator, SummaryRecord};
use polars::prelude::*;
use tracing::info;

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub summaries: Vec<SummaryRecord>,
    pub pivot: DataFrame,
}

/// Load the datasets from `source` and run every stage on them.
pub fn run(config: &RunConfig, source: &dyn DatasetSource) -> Result<PipelineOutput> {
    let raw = source.load()?;
    run_frames(config, &raw)
}

/// Run every stage on datasets already in memory.
pub fn run_frames(config: &RunConfig, raw: &RawDatasets) -> Result<PipelineOutput> {
    let span = tracing::info_span!("pipeline", window_years = config.window_years);
    let _enter = span.enter();
    config.validate()?;

    let cases = prepare_case_frame(&normalize_columns(&raw.cases)?, &config.aliases)?;
    let indicators = normalize_columns(&raw.indicators)?;

    let options = CleanOptions {
        window_years: config.window_years,
        drop_columns: &config.drop_columns,
        aliases: &config.aliases,
    };
    let cleaned = clean_indicator_frame(&indicators, &options)?;
    info!(rows = cleaned.height(), columns = cleaned.width(), "cleaned indicators");

    let in_cases = filter_countries(&cleaned, &cases)?;
    let selected = filter_indicators(&in_cases, &config.indicators)?;
    info!(
        country_rows = in_cases.height(),
        indicator_rows = selected.height(),
        "filtered indicators"
    );

    let long = DataProcessor::melt_to_long(&selected)?;
    let filled = DataProcessor::interpolate(&long)?;
    info!(rows = filled.height(), "long-form series ready");

    let summaries = StatsCalculator::summarize(&filled)?;
    let pivot = PivotAssembler::assemble(&summaries)?;
    info!(
        series = summaries.len(),
        countries = pivot.height(),
        columns = pivot.width(),
        "pivot assembled"
    );

    Ok(PipelineOutput { summaries, pivot })
}
