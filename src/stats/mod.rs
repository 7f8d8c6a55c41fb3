//! Statistics module - series summaries and pivot

mod calculator;
mod pivot;

pub use calculator::{StatsCalculator, SummaryRecord};
pub use pivot::{PivotAssembler, SummaryMetric};
