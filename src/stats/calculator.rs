//! Statistics Calculator Module
//! Per-series summaries: latest observation, average and compound growth rate.

use crate::data::LongRows;
use crate::error::{PipelineError, Result};
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use tracing::{debug, warn};

/// Summary of one (country, indicator) series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
    pub country: String,
    pub indicator: String,
    pub current_year: Option<i32>,
    pub current_value: Option<f64>,
    pub average_value: Option<f64>,
    pub growth_rate: Option<f64>,
}

/// Handles summary calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Summarize one year-ordered series.
    ///
    /// A series with no finite value yields a record with every metric null.
    /// A series whose only finite value sits at position 0 cannot have a growth
    /// rate and fails with [`PipelineError::ZeroElapsedPeriods`].
    pub fn summarize_series(
        country: &str,
        indicator: &str,
        years: &[i32],
        values: &[Option<f64>],
    ) -> Result<SummaryRecord> {
        // (position in the full series, year, value)
        let observed: Vec<(usize, i32, f64)> = years
            .iter()
            .zip(values)
            .enumerate()
            .filter_map(|(pos, (&year, value))| {
                value.filter(|v| v.is_finite()).map(|v| (pos, year, v))
            })
            .collect();

        let Some(&(_, current_year, current_value)) = observed.last() else {
            debug!(country, indicator, "series has no observations");
            return Ok(SummaryRecord {
                country: country.to_string(),
                indicator: indicator.to_string(),
                current_year: None,
                current_value: None,
                average_value: None,
                growth_rate: None,
            });
        };

        let average_value = observed.iter().map(|&(_, _, v)| v).mean();
        let points: Vec<(usize, f64)> = observed.iter().map(|&(pos, _, v)| (pos, v)).collect();
        let growth_rate = Self::growth_rate(country, indicator, &points)?;

        Ok(SummaryRecord {
            country: country.to_string(),
            indicator: indicator.to_string(),
            current_year: Some(current_year),
            current_value: Some(current_value),
            average_value: Some(average_value),
            growth_rate,
        })
    }

    /// Compound growth between the first and last finite observations.
    ///
    /// `points` are (position, value) pairs ordered by position. The number of
    /// periods is the position of the last observation, not the distance from
    /// the first one.
    pub fn growth_rate(country: &str, indicator: &str, points: &[(usize, f64)]) -> Result<Option<f64>> {
        let (Some(&(_, first)), Some(&(periods, last))) = (points.first(), points.last()) else {
            return Ok(None);
        };

        if periods == 0 {
            return Err(PipelineError::ZeroElapsedPeriods {
                country: country.to_string(),
                indicator: indicator.to_string(),
            });
        }
        if points.len() < 2 {
            return Ok(None);
        }
        if first == 0.0 {
            warn!(country, indicator, "growth rate undefined: first value is zero");
            return Ok(None);
        }

        let rate = (last / first).powf(1.0 / periods as f64) - 1.0;
        if !rate.is_finite() {
            warn!(country, indicator, first, last, "growth rate undefined");
            return Ok(None);
        }
        Ok(Some(rate))
    }

    /// Summarize every (country, indicator) series of a long-form table, in
    /// parallel. Records come back in the series' first-appearance order.
    pub fn summarize(df: &DataFrame) -> Result<Vec<SummaryRecord>> {
        let rows = LongRows::from_frame(df)?;
        let groups = rows.groups();

        // Use rayon for parallel computation
        let records: Vec<SummaryRecord> = groups
            .par_iter()
            .map(|group| {
                let (years, values) = rows.series(group);
                Self::summarize_series(&group.country, &group.indicator, &years, &values)
            })
            .collect::<Result<_>>()?;

        debug!(series = records.len(), "summarized series");
        Ok(records)
    }
}
