//! Column header normalization and required-column checks.

use crate::error::{PipelineError, Result};
use polars::prelude::*;

pub const COUNTRY: &str = "COUNTRY";
pub const COUNTRY_NAME: &str = "COUNTRY_NAME";
pub const INDICATOR_NAME: &str = "INDICATOR_NAME";
pub const YEAR: &str = "YEAR";
pub const VALUE: &str = "VALUE";

/// Normalize one header: cut at the first `/`, turn each run of spaces into a
/// single `_`, uppercase.
pub fn normalize_header(name: &str) -> String {
    let head = name.split('/').next().unwrap_or(name);

    let mut out = String::with_capacity(head.len());
    let mut in_space_run = false;
    for ch in head.chars() {
        if ch == ' ' {
            if !in_space_run {
                out.push('_');
            }
            in_space_run = true;
        } else {
            in_space_run = false;
            out.extend(ch.to_uppercase());
        }
    }
    out
}

/// Rename every column with [`normalize_header`]. Rows are untouched.
///
/// Two headers collapsing to the same name is reported as a polars
/// duplicate-column error.
pub fn normalize_columns(df: &DataFrame) -> Result<DataFrame> {
    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .map(|column| {
            let name = normalize_header(column.name().as_str());
            let mut renamed = column.clone();
            renamed.rename(name.into());
            renamed
        })
        .collect();

    Ok(DataFrame::new(columns)?)
}

/// Fail with [`PipelineError::MissingColumn`] unless every listed column exists.
pub fn require_columns(df: &DataFrame, table: &str, columns: &[&str]) -> Result<()> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    match columns.iter().find(|c| !present.iter().any(|p| p == *c)) {
        Some(missing) => Err(PipelineError::missing_column(table, missing)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(df: &DataFrame) -> Vec<String> {
        df.get_column_names().iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn headers_from_both_datasets() {
        assert_eq!(normalize_header("Country/Region"), "COUNTRY");
        assert_eq!(normalize_header("Province/State"), "PROVINCE");
        assert_eq!(normalize_header("Country Name"), "COUNTRY_NAME");
        assert_eq!(normalize_header("WHO Region"), "WHO_REGION");
        assert_eq!(normalize_header("Indicator  Code"), "INDICATOR_CODE");
        assert_eq!(normalize_header("1990"), "1990");
    }

    #[test]
    fn normalization_is_idempotent_and_keeps_rows() {
        let df = df!(
            "Country Name" => ["Chile", "Peru"],
            "Country/Region" => ["a", "b"],
            "2019" => [1.0, 2.0]
        )
        .unwrap();

        let once = normalize_columns(&df).unwrap();
        let twice = normalize_columns(&once).unwrap();

        assert_eq!(names(&once), vec!["COUNTRY_NAME", "COUNTRY", "2019"]);
        assert_eq!(names(&once), names(&twice));
        assert!(once.equals(&twice));
        assert_eq!(once.height(), 2);
        assert_eq!(
            once.column("COUNTRY_NAME").unwrap().str().unwrap().get(1),
            Some("Peru")
        );
    }

    #[test]
    fn require_columns_reports_first_missing() {
        let df = df!("COUNTRY" => ["US"]).unwrap();
        assert!(require_columns(&df, "cases", &[COUNTRY]).is_ok());

        let err = require_columns(&df, "cases", &[COUNTRY, "DATE"]).unwrap_err();
        match err {
            PipelineError::MissingColumn { table, column } => {
                assert_eq!(table, "cases");
                assert_eq!(column, "DATE");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
