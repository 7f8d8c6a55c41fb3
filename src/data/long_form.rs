//! Long-form table access: year labels and per-series grouping.

use crate::data::schema::{require_columns, COUNTRY_NAME, INDICATOR_NAME, VALUE, YEAR};
use crate::error::{PipelineError, Result};
use polars::prelude::*;
use std::collections::HashMap;

/// Parse a wide-table column label into a calendar year.
pub fn parse_year_label(label: &str) -> Result<i32> {
    let trimmed = label.trim();
    if trimmed.len() != 4 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(PipelineError::BadYearLabel(label.to_string()));
    }
    trimmed
        .parse::<i32>()
        .map_err(|_| PipelineError::BadYearLabel(label.to_string()))
}

/// Column-wise copy of a long-form frame.
#[derive(Debug, Clone)]
pub struct LongRows {
    pub countries: Vec<Option<String>>,
    pub indicators: Vec<Option<String>>,
    pub years: Vec<Option<i32>>,
    pub values: Vec<Option<f64>>,
}

/// Row indices of one (country, indicator) series, ordered by year.
#[derive(Debug, Clone)]
pub struct SeriesGroup {
    pub country: String,
    pub indicator: String,
    pub rows: Vec<usize>,
}

impl LongRows {
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        require_columns(df, "long-form", &[COUNTRY_NAME, INDICATOR_NAME, YEAR, VALUE])?;

        let countries = string_values(df.column(COUNTRY_NAME)?)?;
        let indicators = string_values(df.column(INDICATOR_NAME)?)?;

        let year_col = df.column(YEAR)?.cast(&DataType::Int32)?;
        let years: Vec<Option<i32>> = year_col.i32()?.into_iter().collect();

        let value_col = df.column(VALUE)?.cast(&DataType::Float64)?;
        let values: Vec<Option<f64>> = value_col.f64()?.into_iter().collect();

        Ok(Self {
            countries,
            indicators,
            years,
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Group rows by (country, indicator) in first-appearance order.
    /// Rows without a country, indicator or year belong to no series.
    pub fn groups(&self) -> Vec<SeriesGroup> {
        let mut index: HashMap<(&str, &str), usize> = HashMap::new();
        let mut groups: Vec<SeriesGroup> = Vec::new();

        for row in 0..self.len() {
            let (Some(country), Some(indicator), Some(_)) = (
                self.countries[row].as_deref(),
                self.indicators[row].as_deref(),
                self.years[row],
            ) else {
                continue;
            };

            let slot = *index.entry((country, indicator)).or_insert_with(|| {
                groups.push(SeriesGroup {
                    country: country.to_string(),
                    indicator: indicator.to_string(),
                    rows: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].rows.push(row);
        }

        for group in &mut groups {
            group.rows.sort_by_key(|&row| self.years[row]);
        }
        groups
    }

    /// Years and values of one group, in the group's (year) order.
    pub fn series(&self, group: &SeriesGroup) -> (Vec<i32>, Vec<Option<f64>>) {
        group
            .rows
            .iter()
            .map(|&row| (self.years[row].unwrap_or_default(), self.values[row]))
            .unzip()
    }
}

pub(crate) fn string_values(column: &Column) -> Result<Vec<Option<String>>> {
    let as_str = column.cast(&DataType::String)?;
    Ok(as_str
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}
