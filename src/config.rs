//! Run configuration.
//! Loaded from an optional JSON file; every field has a default.

use crate::error::{PipelineError, Result};
use crate::indicators::{DEFAULT_COUNTRY_ALIASES, INDICATOR_WHITELIST};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Root under which each run gets a dated directory.
    pub data_root: PathBuf,
    pub run_date: NaiveDate,
    pub cases_file: String,
    pub indicators_file: String,
    /// Number of most recent year columns kept from the indicator table.
    pub window_years: usize,
    pub aliases: BTreeMap<String, String>,
    pub drop_columns: Vec<String>,
    pub indicators: Vec<String>,
    pub output: PathBuf,
    pub summary_json: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("data"),
            run_date: Local::now().date_naive(),
            cases_file: "covid_19_clean_complete.csv".to_string(),
            indicators_file: "WDIData.csv".to_string(),
            window_years: 10,
            aliases: DEFAULT_COUNTRY_ALIASES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            drop_columns: vec!["INDICATOR_CODE".to_string(), "COUNTRY_CODE".to_string()],
            indicators: INDICATOR_WHITELIST.iter().map(|s| s.to_string()).collect(),
            output: PathBuf::from("output/pivot.csv"),
            summary_json: None,
        }
    }
}

impl RunConfig {
    /// Read a JSON config file. Missing fields fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Directory holding this run's downloaded files: `<data_root>/<YYYY-MM-DD>`.
    pub fn run_directory(&self) -> PathBuf {
        self.data_root
            .join(self.run_date.format("%Y-%m-%d").to_string())
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_years < 2 {
            return Err(PipelineError::InvalidConfig(format!(
                "window_years must be at least 2, got {}",
                self.window_years
            )));
        }
        if i32::try_from(self.window_years).is_err() {
            return Err(PipelineError::InvalidConfig(format!(
                "window_years {} is too large",
                self.window_years
            )));
        }
        if self.indicators.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "indicator whitelist is empty".to_string(),
            ));
        }
        Ok(())
    }
}
