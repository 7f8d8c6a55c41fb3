//! Data Processor Module
//! Wide-to-long reshaping (melt) and gap interpolation of yearly series.

use crate::data::long_form::{parse_year_label, string_values, LongRows};
use crate::data::schema::{require_columns, COUNTRY_NAME, INDICATOR_NAME, VALUE, YEAR};
use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Handles reshaping and filling of indicator tables.
pub struct DataProcessor;

impl DataProcessor {
    /// Transform a wide year-per-column table to long format.
    ///
    /// Every column besides `COUNTRY_NAME` and `INDICATOR_NAME` must be labelled
    /// with a year. Null values are kept, so the output has
    /// `rows * year_columns` rows.
    ///
    /// Output columns: [COUNTRY_NAME, INDICATOR_NAME, YEAR, VALUE]
    pub fn melt_to_long(df: &DataFrame) -> Result<DataFrame> {
        require_columns(df, "wide", &[COUNTRY_NAME, INDICATOR_NAME])?;

        let year_cols: Vec<(i32, String)> = df
            .get_column_names()
            .iter()
            .filter(|name| name.as_str() != COUNTRY_NAME && name.as_str() != INDICATOR_NAME)
            .map(|name| parse_year_label(name.as_str()).map(|year| (year, name.to_string())))
            .collect::<Result<_>>()?;

        let country_values = string_values(df.column(COUNTRY_NAME)?)?;
        let indicator_values = string_values(df.column(INDICATOR_NAME)?)?;

        let capacity = df.height() * year_cols.len();
        let mut countries: Vec<Option<String>> = Vec::with_capacity(capacity);
        let mut indicators: Vec<Option<String>> = Vec::with_capacity(capacity);
        let mut years: Vec<i32> = Vec::with_capacity(capacity);
        let mut values: Vec<Option<f64>> = Vec::with_capacity(capacity);

        // Build the result manually by iterating through columns
        for (year, name) in &year_cols {
            let value_f64 = df.column(name.as_str())?.cast(&DataType::Float64)?;
            let value_ca = value_f64.f64()?;

            for (row, value) in value_ca.into_iter().enumerate() {
                countries.push(country_values[row].clone());
                indicators.push(indicator_values[row].clone());
                years.push(*year);
                values.push(value);
            }
        }

        debug!(
            rows = df.height(),
            year_columns = year_cols.len(),
            "melted to long form"
        );

        let df = DataFrame::new(vec![
            Column::new(COUNTRY_NAME.into(), countries),
            Column::new(INDICATOR_NAME.into(), indicators),
            Column::new(YEAR.into(), years),
            Column::new(VALUE.into(), values),
        ])?;

        Ok(df)
    }

    /// Fill interior gaps of every (country, indicator) series by linear
    /// interpolation over the year axis.
    ///
    /// Existing values are never changed and leading/trailing gaps stay null.
    /// Row count and row order are preserved.
    pub fn interpolate(df: &DataFrame) -> Result<DataFrame> {
        let rows = LongRows::from_frame(df)?;
        let mut filled = rows.values.clone();
        let mut filled_count = 0usize;

        for group in rows.groups() {
            let (years, values) = rows.series(&group);
            let interpolated = Self::interpolate_series(&years, &values);
            for (&row, (before, after)) in group.rows.iter().zip(values.iter().zip(interpolated)) {
                if before.is_none() && after.is_some() {
                    filled_count += 1;
                }
                filled[row] = after;
            }
        }
        debug!(filled = filled_count, "interpolated interior gaps");

        let mut out = df.clone();
        out.with_column(Column::new(VALUE.into(), filled))?;
        Ok(out)
    }

    /// Interpolate one year-ordered series. Only `None` entries lying between two
    /// finite observations are filled.
    pub fn interpolate_series(years: &[i32], values: &[Option<f64>]) -> Vec<Option<f64>> {
        let anchors: Vec<(i32, f64)> = years
            .iter()
            .zip(values)
            .filter_map(|(&year, value)| value.filter(|v| v.is_finite()).map(|v| (year, v)))
            .collect();

        let mut out = values.to_vec();
        for (slot, &year) in out.iter_mut().zip(years) {
            if slot.is_some() {
                continue;
            }
            let after = anchors.partition_point(|&(y, _)| y < year);
            if after == 0 || after == anchors.len() {
                continue;
            }
            let (y0, v0) = anchors[after - 1];
            let (y1, v1) = anchors[after];
            if y1 == y0 {
                continue;
            }
            let t = f64::from(year - y0) / f64::from(y1 - y0);
            *slot = Some(v0 + (v1 - v0) * t);
        }
        out
    }
}
