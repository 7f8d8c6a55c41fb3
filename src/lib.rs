//! Indicator Digest - case-count & development-indicator summaries
//!
//! Normalizes the two source tables, reshapes the indicator table to long form,
//! fills interior gaps, summarizes each (country, indicator) series and pivots
//! the summaries into one wide table per country.

pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod pipeline;
pub mod stats;

pub use config::RunConfig;
pub use error::{PipelineError, Result};
pub use pipeline::{run, run_frames, PipelineOutput};
