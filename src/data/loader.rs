//! CSV Data Loader Module
//! Reads the two source datasets from a run directory using Polars.

use crate::error::Result;
use polars::prelude::*;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// The two tables the pipeline consumes.
#[derive(Debug, Clone)]
pub struct RawDatasets {
    /// Epidemiological case counts, one row per (country, date).
    pub cases: DataFrame,
    /// Development indicators, one row per (country, indicator), one column per year.
    pub indicators: DataFrame,
}

/// Anything that can hand over the raw datasets for a run.
pub trait DatasetSource {
    fn load(&self) -> Result<RawDatasets>;
}

/// Load a CSV with every column read as a string.
///
/// Types are settled later by the stages that need numbers, so a sparse year
/// column never gets mis-inferred from its first rows.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .finish()?
        .collect()?;

    debug!(path = %path.display(), rows = df.height(), columns = df.width(), "read csv");
    Ok(df)
}

/// Extract every `*.zip` archive in `dir` next to itself. Entries are flattened
/// to their file name; files that already exist are left alone.
///
/// Each member is written to a temporary file in `dir` and only renamed into
/// place once fully copied, so a failed extraction leaves nothing behind.
///
/// Returns the paths written.
pub fn extract_archives(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("zip") {
            continue;
        }

        let mut archive = ::zip::ZipArchive::new(File::open(&path)?)?;
        for i in 0..archive.len() {
            let mut member = archive.by_index(i)?;
            if member.is_dir() {
                continue;
            }
            let Some(file_name) = member
                .enclosed_name()
                .and_then(|p| p.file_name())
                .map(|n| n.to_owned())
            else {
                continue;
            };

            let target = dir.join(file_name);
            if target.exists() {
                continue;
            }
            let mut tmp = NamedTempFile::new_in(dir)?;
            io::copy(&mut member, &mut tmp)?;
            tmp.persist(&target).map_err(|e| e.error)?;
            info!(archive = %path.display(), file = %target.display(), "extracted");
            written.push(target);
        }
    }

    Ok(written)
}

/// Datasets already present in a local run directory (possibly still zipped).
#[derive(Debug, Clone)]
pub struct LocalDirectory {
    pub dir: PathBuf,
    pub cases_file: String,
    pub indicators_file: String,
}

impl LocalDirectory {
    pub fn new(dir: impl Into<PathBuf>, cases_file: &str, indicators_file: &str) -> Self {
        Self {
            dir: dir.into(),
            cases_file: cases_file.to_string(),
            indicators_file: indicators_file.to_string(),
        }
    }
}

impl DatasetSource for LocalDirectory {
    fn load(&self) -> Result<RawDatasets> {
        extract_archives(&self.dir)?;

        let cases = read_csv(&self.dir.join(&self.cases_file))?;
        let indicators = read_csv(&self.dir.join(&self.indicators_file))?;
        info!(
            dir = %self.dir.display(),
            case_rows = cases.height(),
            indicator_rows = indicators.height(),
            "loaded datasets"
        );

        Ok(RawDatasets { cases, indicators })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn deflated_zip(path: &Path, name: &str, content: &str) {
        let mut zip = ::zip::ZipWriter::new(File::create(path).unwrap());
        let options = ::zip::write::FileOptions::default()
            .compression_method(::zip::CompressionMethod::Deflated);
        zip.start_file(name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    fn wdi_rows() -> String {
        let mut csv = String::from("Country Name,Indicator Name,2020\n");
        for i in 0..5000u64 {
            csv.push_str(&format!("C{i},I{},{}\n", i % 42, (i * 7919) % 10007));
        }
        csv
    }

    #[test]
    fn csv_columns_arrive_as_strings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wdi.csv");
        fs::write(&path, "Country Name,2019,2020\nChile,17.9,\nPeru,32,n/a\n").unwrap();

        let df = read_csv(&path).unwrap();

        assert_eq!(df.shape(), (2, 3));
        for column in df.get_columns() {
            assert_eq!(column.dtype(), &DataType::String, "{}", column.name());
        }
        assert_eq!(df.column("2020").unwrap().str().unwrap().get(1), Some("n/a"));
    }

    #[test]
    fn extracts_member_once() {
        let dir = tempdir().unwrap();
        deflated_zip(&dir.path().join("wdi.csv.zip"), "wdi.csv", &wdi_rows());

        let written = extract_archives(dir.path()).unwrap();
        assert_eq!(written, vec![dir.path().join("wdi.csv")]);
        assert_eq!(fs::read_to_string(dir.path().join("wdi.csv")).unwrap(), wdi_rows());

        assert!(extract_archives(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn corrupt_archive_leaves_no_partial_file() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("wdi.csv.zip");
        deflated_zip(&archive, "wdi.csv", &wdi_rows());

        let mut bytes = fs::read(&archive).unwrap();
        let mid = bytes.len() / 2;
        for b in &mut bytes[mid..mid + 64] {
            *b ^= 0xA5;
        }
        fs::write(&archive, bytes).unwrap();

        assert!(extract_archives(dir.path()).is_err());
        assert!(!dir.path().join("wdi.csv").exists());
        let leftovers: Vec<PathBuf> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p != &archive)
            .collect();
        assert!(leftovers.is_empty(), "left behind: {leftovers:?}");

        // a second attempt fails the same way instead of reusing a stale file
        assert!(extract_archives(dir.path()).is_err());
    }
}
