//! Frame Cleaner
//! Drops metadata columns, trims to a window of recent years, removes empty
//! rows and harmonizes country-name aliases.

use crate::data::long_form::{parse_year_label, string_values};
use crate::data::schema::{require_columns, COUNTRY, COUNTRY_NAME, INDICATOR_NAME};
use crate::error::{PipelineError, Result};
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Settings for cleaning the wide indicator table.
#[derive(Debug, Clone)]
pub struct CleanOptions<'a> {
    pub window_years: usize,
    pub drop_columns: &'a [String],
    pub aliases: &'a BTreeMap<String, String>,
}

/// Year columns of `df`, ordered by year. Labels that are not years are skipped.
pub fn year_columns(df: &DataFrame) -> Vec<(i32, String)> {
    let mut years: Vec<(i32, String)> = df
        .get_column_names()
        .iter()
        .filter_map(|name| {
            parse_year_label(name.as_str())
                .ok()
                .map(|year| (year, name.to_string()))
        })
        .collect();
    years.sort();
    years
}

/// Clean the normalized indicator table.
///
/// Every entry of `drop_columns` must be present. The retained year columns are
/// chosen by label: the `window_years` calendar years ending at the latest year
/// column. Any other non-identity column is left out.
pub fn clean_indicator_frame(df: &DataFrame, options: &CleanOptions<'_>) -> Result<DataFrame> {
    let mut frame = df.clone();
    for name in options.drop_columns {
        require_columns(&frame, "indicator", &[name.as_str()])?;
        frame = frame.drop(name)?;
    }
    require_columns(&frame, "indicator", &[COUNTRY_NAME, INDICATOR_NAME])?;

    let years = year_columns(&frame);
    let Some(&(latest, _)) = years.last() else {
        return Err(PipelineError::NoYearColumns("indicator".to_string()));
    };
    let first_kept = i32::try_from(options.window_years)
        .ok()
        .and_then(|window| latest.checked_sub(window))
        .and_then(|year| year.checked_add(1))
        .ok_or_else(|| {
            PipelineError::InvalidConfig(format!(
                "window_years {} is out of range for year {latest}",
                options.window_years
            ))
        })?;
    let kept: Vec<&String> = years
        .iter()
        .filter(|(year, _)| *year >= first_kept)
        .map(|(_, name)| name)
        .collect();
    debug!(
        from = first_kept,
        to = latest,
        columns = kept.len(),
        "selected year window"
    );

    let mut columns: Vec<Column> = vec![
        frame.column(COUNTRY_NAME)?.cast(&DataType::String)?,
        frame.column(INDICATOR_NAME)?.cast(&DataType::String)?,
    ];
    for name in &kept {
        columns.push(frame.column(name.as_str())?.cast(&DataType::Float64)?);
    }
    let windowed = DataFrame::new(columns)?;

    let populated = drop_empty_rows(&windowed, &kept)?;
    debug!(
        before = windowed.height(),
        after = populated.height(),
        "dropped all-null rows"
    );

    apply_aliases(&populated, options.aliases)
}

/// Keep rows with at least one non-null value among `value_columns`.
pub fn drop_empty_rows(df: &DataFrame, value_columns: &[&String]) -> Result<DataFrame> {
    let mut keep = vec![false; df.height()];
    for name in value_columns {
        let values = df.column(name.as_str())?.cast(&DataType::Float64)?;
        for (row, value) in values.f64()?.into_iter().enumerate() {
            if value.is_some() {
                keep[row] = true;
            }
        }
    }

    let mask = Series::new("keep".into(), keep);
    Ok(df.filter(mask.bool()?)?)
}

/// Replace aliased country names in every string column.
pub fn apply_aliases(df: &DataFrame, aliases: &BTreeMap<String, String>) -> Result<DataFrame> {
    if aliases.is_empty() {
        return Ok(df.clone());
    }

    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .map(|column| {
            if column.dtype() != &DataType::String {
                return Ok(column.clone());
            }
            let mapped: Vec<Option<String>> = string_values(column)?
                .into_iter()
                .map(|value| {
                    value.map(|v| match aliases.get(&v) {
                        Some(alias) => alias.clone(),
                        None => v,
                    })
                })
                .collect();
            Ok(Column::new(column.name().clone(), mapped))
        })
        .collect::<Result<_>>()?;

    Ok(DataFrame::new(columns)?)
}

/// Prepare the normalized case table: it must carry `COUNTRY`, and aliases are
/// applied so its names line up with the indicator table.
pub fn prepare_case_frame(df: &DataFrame, aliases: &BTreeMap<String, String>) -> Result<DataFrame> {
    require_columns(df, "case", &[COUNTRY])?;
    apply_aliases(df, aliases)
}
