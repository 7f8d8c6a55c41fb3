//! Pivot of summary records into a country-by-(metric, indicator) table.

use crate::data::schema::COUNTRY_NAME;
use crate::error::Result;
use crate::stats::calculator::SummaryRecord;
use polars::prelude::*;
use statrs::statistics::Statistics;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, warn};

/// Metrics carried into the pivoted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMetric {
    GrowthRate,
    CurrentValue,
    AverageValue,
}

impl SummaryMetric {
    pub const ALL: [SummaryMetric; 3] = [
        SummaryMetric::GrowthRate,
        SummaryMetric::CurrentValue,
        SummaryMetric::AverageValue,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SummaryMetric::GrowthRate => "GROWTH_RATE",
            SummaryMetric::CurrentValue => "CURRENT_VALUE",
            SummaryMetric::AverageValue => "AVERAGE_VALUE",
        }
    }

    pub fn value(self, record: &SummaryRecord) -> Option<f64> {
        match self {
            SummaryMetric::GrowthRate => record.growth_rate,
            SummaryMetric::CurrentValue => record.current_value,
            SummaryMetric::AverageValue => record.average_value,
        }
    }

    /// Pivot column name, `METRIC|indicator`.
    pub fn column_name(self, indicator: &str) -> String {
        format!("{}|{}", self.label(), indicator)
    }
}

/// Builds the wide analytical table.
pub struct PivotAssembler;

impl PivotAssembler {
    /// One row per country (first-appearance order), one column per metric and
    /// indicator (metrics in [`SummaryMetric::ALL`] order, indicators sorted).
    ///
    /// Missing cells take the mean of the column's present values. A column with
    /// no value at all stays null.
    pub fn assemble(records: &[SummaryRecord]) -> Result<DataFrame> {
        let mut countries: Vec<&str> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut indicators: BTreeSet<&str> = BTreeSet::new();
        let mut cells: HashMap<(&str, &str), &SummaryRecord> = HashMap::new();

        for record in records {
            let country = record.country.as_str();
            let indicator = record.indicator.as_str();
            if seen.insert(country) {
                countries.push(country);
            }
            indicators.insert(indicator);
            cells.insert((country, indicator), record);
        }

        let mut columns: Vec<Column> = vec![Column::new(
            COUNTRY_NAME.into(),
            countries.iter().map(|c| c.to_string()).collect::<Vec<String>>(),
        )];

        for metric in SummaryMetric::ALL {
            for indicator in &indicators {
                let raw: Vec<Option<f64>> = countries
                    .iter()
                    .map(|country| {
                        cells
                            .get(&(*country, *indicator))
                            .and_then(|record| metric.value(record))
                            .filter(|v| v.is_finite())
                    })
                    .collect();
                let name = metric.column_name(indicator);
                let filled = Self::fill_with_mean(&name, raw);
                columns.push(Column::new(name.into(), filled));
            }
        }

        debug!(
            rows = countries.len(),
            columns = columns.len(),
            "assembled pivot table"
        );
        Ok(DataFrame::new(columns)?)
    }

    /// Replace `None` cells with the mean of the present ones.
    pub fn fill_with_mean(name: &str, values: Vec<Option<f64>>) -> Vec<Option<f64>> {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        if present.is_empty() {
            warn!(column = name, "no values to fill from");
            return values;
        }
        if present.len() == values.len() {
            return values;
        }

        let mean = present.iter().mean();
        values.into_iter().map(|v| v.or(Some(mean))).collect()
    }
}
