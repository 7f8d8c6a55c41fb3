//! Row filters: restrict the indicator table to countries present in the case
//! table and to whitelisted indicators.

use crate::data::long_form::string_values;
use crate::data::schema::{require_columns, COUNTRY, COUNTRY_NAME, INDICATOR_NAME};
use crate::error::Result;
use polars::prelude::*;
use std::collections::HashSet;

/// Distinct non-null values of the case table's `COUNTRY` column.
pub fn country_set(cases: &DataFrame) -> Result<HashSet<String>> {
    require_columns(cases, "case", &[COUNTRY])?;
    Ok(string_values(cases.column(COUNTRY)?)?
        .into_iter()
        .flatten()
        .collect())
}

/// Keep rows whose `column` value is an exact member of `allowed`. Order is kept.
pub fn filter_by_membership(
    df: &DataFrame,
    column: &str,
    allowed: &HashSet<String>,
) -> Result<DataFrame> {
    let keep: Vec<bool> = string_values(df.column(column)?)?
        .iter()
        .map(|value| value.as_ref().is_some_and(|v| allowed.contains(v)))
        .collect();

    let mask = Series::new("keep".into(), keep);
    Ok(df.filter(mask.bool()?)?)
}

/// Indicator rows for countries that also appear in `cases`.
pub fn filter_countries(indicators: &DataFrame, cases: &DataFrame) -> Result<DataFrame> {
    require_columns(indicators, "indicator", &[COUNTRY_NAME])?;
    let countries = country_set(cases)?;
    filter_by_membership(indicators, COUNTRY_NAME, &countries)
}

/// Indicator rows whose `INDICATOR_NAME` is on the whitelist.
pub fn filter_indicators(indicators: &DataFrame, whitelist: &[String]) -> Result<DataFrame> {
    require_columns(indicators, "indicator", &[INDICATOR_NAME])?;
    let allowed: HashSet<String> = whitelist.iter().cloned().collect();
    filter_by_membership(indicators, INDICATOR_NAME, &allowed)
}
