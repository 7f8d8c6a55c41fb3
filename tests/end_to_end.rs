use indicator_digest::data::{
    clean_indicator_frame, normalize_columns, CleanOptions, DataProcessor, RawDatasets,
};
use indicator_digest::{run_frames, PipelineError, RunConfig};
use polars::prelude::*;

const POPULATION: &str = "Population, total";
const GDP: &str = "GDP (current US$)";
const TOLERANCE: f64 = 1e-9;

fn config() -> RunConfig {
    RunConfig {
        window_years: 5,
        indicators: vec![POPULATION.to_string(), GDP.to_string()],
        ..RunConfig::default()
    }
}

fn cases() -> DataFrame {
    df!(
        "Province/State" => [None::<&str>, None, None, Some("Ontario")],
        "Country/Region" => ["US", "Chile", "Peru", "Canada"],
        "Date" => ["2020-07-27", "2020-07-27", "2020-07-27", "2020-07-27"],
        "Confirmed" => [4290259i64, 347923, 389717, 39066]
    )
    .unwrap()
}

/// 3 countries x 2 indicators x 5 years, with one missing middle-year cell
/// (Chile population, 2018), plus rows the filters must remove.
fn indicators() -> DataFrame {
    df!(
        "Country Name" => ["United States", "United States", "Chile", "Chile", "Peru", "Peru", "Aruba", "Peru"],
        "Country Code" => ["USA", "USA", "CHL", "CHL", "PER", "PER", "ABW", "PER"],
        "Indicator Name" => [POPULATION, GDP, POPULATION, GDP, POPULATION, GDP, POPULATION, "Forest area (sq. km)"],
        "Indicator Code" => ["SP.POP.TOTL", "NY.GDP.MKTP.CD", "SP.POP.TOTL", "NY.GDP.MKTP.CD", "SP.POP.TOTL", "NY.GDP.MKTP.CD", "SP.POP.TOTL", "AG.LND.FRST.K2"],
        "2015" => [Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(1.0)],
        "2016" => [Some(100.0), Some(5.0), Some(10.0), Some(2.0), Some(7.0), Some(1.0), Some(1.0), Some(1.0)],
        "2017" => [Some(110.0), Some(6.0), Some(20.0), Some(2.0), Some(7.0), Some(2.0), Some(1.0), Some(1.0)],
        "2018" => [Some(120.0), Some(7.0), None, Some(2.0), Some(7.0), Some(3.0), Some(1.0), Some(1.0)],
        "2019" => [Some(130.0), Some(8.0), Some(40.0), Some(2.0), Some(7.0), Some(4.0), Some(1.0), Some(1.0)],
        "2020" => [Some(140.0), Some(9.0), Some(60.0), Some(2.0), Some(7.0), Some(5.0), Some(1.0), Some(1.0)]
    )
    .unwrap()
}

fn cell(df: &DataFrame, column: &str, country: &str) -> f64 {
    let countries = df.column("COUNTRY_NAME").unwrap().str().unwrap();
    let row = countries
        .into_iter()
        .position(|c| c == Some(country))
        .unwrap();
    df.column(column).unwrap().f64().unwrap().get(row).unwrap()
}

#[test]
fn pivot_has_no_nulls_and_uses_interpolated_midpoint() {
    let raw = RawDatasets {
        cases: cases(),
        indicators: indicators(),
    };

    let output = run_frames(&config(), &raw).unwrap();
    let pivot = &output.pivot;

    assert_eq!(pivot.height(), 3);
    assert_eq!(pivot.width(), 1 + 3 * 2);
    for column in pivot.get_columns() {
        assert_eq!(column.null_count(), 0, "nulls in {}", column.name());
    }
    assert_eq!(output.summaries.len(), 6);

    // Chile population: 10, 20, (30), 40, 60
    let average = cell(pivot, &format!("AVERAGE_VALUE|{POPULATION}"), "Chile");
    assert!((average - 32.0).abs() < TOLERANCE);
    let growth = cell(pivot, &format!("GROWTH_RATE|{POPULATION}"), "Chile");
    assert!((growth - (6.0f64.powf(0.25) - 1.0)).abs() < TOLERANCE);
    assert_eq!(cell(pivot, &format!("CURRENT_VALUE|{GDP}"), "US"), 9.0);
}

#[test]
fn interpolated_cell_is_linear_midpoint() {
    let config = config();
    let options = CleanOptions {
        window_years: config.window_years,
        drop_columns: &config.drop_columns,
        aliases: &config.aliases,
    };
    let cleaned = clean_indicator_frame(&normalize_columns(&indicators()).unwrap(), &options).unwrap();
    let long = DataProcessor::melt_to_long(&cleaned).unwrap();
    let filled = DataProcessor::interpolate(&long).unwrap();

    assert_eq!(long.height(), cleaned.height() * 5);

    let chile_2018 = filled
        .lazy()
        .filter(
            col("COUNTRY_NAME")
                .eq(lit("Chile"))
                .and(col("INDICATOR_NAME").eq(lit(POPULATION)))
                .and(col("YEAR").eq(lit(2018))),
        )
        .collect()
        .unwrap();
    assert_eq!(chile_2018.height(), 1);
    assert_eq!(
        chile_2018.column("VALUE").unwrap().f64().unwrap().get(0),
        Some(30.0)
    );
}

#[test]
fn single_observation_at_series_start_aborts_run() {
    let indicators = df!(
        "Country Name" => ["Chile"],
        "Country Code" => ["CHL"],
        "Indicator Name" => [POPULATION],
        "Indicator Code" => ["SP.POP.TOTL"],
        "2019" => [Some(5.0)],
        "2020" => [None::<f64>]
    )
    .unwrap();
    let raw = RawDatasets {
        cases: cases(),
        indicators,
    };

    let err = run_frames(&config(), &raw).unwrap_err();
    assert!(matches!(err, PipelineError::ZeroElapsedPeriods { .. }));
}

#[test]
fn missing_metadata_column_aborts_run() {
    let raw = RawDatasets {
        cases: cases(),
        indicators: indicators().drop("Indicator Code").unwrap(),
    };

    let err = run_frames(&config(), &raw).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::MissingColumn { ref column, .. } if column == "INDICATOR_CODE"
    ));
}
