//! Pipeline error types.

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expected column '{column}' missing from {table} table")]
    MissingColumn { table: String, column: String },
    #[error("Column label '{0}' is not a calendar year")]
    BadYearLabel(String),
    #[error("No year columns found in {0} table")]
    NoYearColumns(String),
    #[error("Growth rate for {country} / {indicator} has zero elapsed periods")]
    ZeroElapsedPeriods { country: String, indicator: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    pub fn missing_column(table: &str, column: &str) -> Self {
        PipelineError::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
