//! Data module - loading, schema normalization, cleaning and reshaping

mod cleaner;
mod export;
mod filter;
mod loader;
mod long_form;
mod processor;
pub mod schema;

pub use cleaner::{apply_aliases, clean_indicator_frame, prepare_case_frame, year_columns, CleanOptions};
pub use export::{write_csv, write_summary_json};
pub use filter::{country_set, filter_countries, filter_indicators};
pub use loader::{extract_archives, read_csv, DatasetSource, LocalDirectory, RawDatasets};
pub use long_form::{parse_year_label, LongRows, SeriesGroup};
pub use processor::DataProcessor;
pub use schema::{normalize_columns, normalize_header};
