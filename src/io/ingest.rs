//! CSV ingest and schema validation.
//!
//! This module turns the two source tables into clean domain values:
//!
//! - the inflation CSV (one row per year, columns `year` + `inflation_rate`)
//! - the wages CSV (one row per sector, first column `sector`, remaining
//!   column headers are years, the on-disk transpose of the year-indexed
//!   working table)
//!
//! Design goals:
//! - **Strict schema** for required fields (clear errors + exit code 2)
//! - **Fail fast**: a malformed year or value aborts the run with the file,
//!   line, and field named; bad data never flows into the index computation
//! - **Deterministic behavior** (no hidden coercion, no best-effort parsing)
//! - **Separation of concerns**: no index/deflation logic here

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{InflationObservation, NominalSeries, SectorSeries};
use crate::error::AppError;

/// Load the inflation-rate series.
///
/// Column order is free; headers are matched case-insensitively. Years must
/// parse as integers, rates as finite numbers. Uniqueness of years is the
/// index builder's concern, not ingest's.
pub fn load_inflation(path: &Path) -> Result<Vec<InflationObservation>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open inflation CSV '{}': {e}", path.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read inflation CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let year_idx = *header_map
        .get("year")
        .ok_or_else(|| AppError::new(2, "Inflation CSV is missing required column: `year`"))?;
    let rate_idx = *header_map.get("inflation_rate").ok_or_else(|| {
        AppError::new(2, "Inflation CSV is missing required column: `inflation_rate`")
    })?;

    let mut observations = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;

        let record = result.map_err(|e| {
            AppError::new(2, format!("Inflation CSV parse error at line {line}: {e}"))
        })?;

        let year = parse_year(get_field(&record, year_idx), "year", line)?;
        let rate = parse_value(get_field(&record, rate_idx), "inflation_rate", line)?;
        observations.push(InflationObservation { year, rate });
    }

    if observations.is_empty() {
        return Err(AppError::new(
            3,
            format!("Inflation CSV '{}' contains no data rows.", path.display()),
        ));
    }

    Ok(observations)
}

/// Load the nominal wage table, transposing the wide layout into per-sector
/// year maps.
///
/// An empty cell means the sector has no figure for that year (the year is
/// simply absent and will be dropped by the inner join); a non-empty cell
/// must parse as a finite number.
pub fn load_wages(path: &Path) -> Result<NominalSeries, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open wages CSV '{}': {e}", path.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read wages CSV headers: {e}")))?
        .clone();

    let first = headers
        .get(0)
        .map(normalize_header_name)
        .unwrap_or_default();
    if first != "sector" {
        return Err(AppError::new(
            2,
            "Wages CSV must have `sector` as its first column (remaining headers are years).",
        ));
    }

    // Remaining headers are years. Reject duplicates here so the same year
    // cannot silently shadow another column.
    let mut year_columns: Vec<(usize, i32)> = Vec::new();
    for (idx, name) in headers.iter().enumerate().skip(1) {
        let name = name.trim().trim_start_matches('\u{feff}');
        let year = name.parse::<i32>().map_err(|_| {
            AppError::new(
                2,
                format!("Wages CSV header '{name}' is not a year (expected an integer)."),
            )
        })?;
        if year_columns.iter().any(|&(_, y)| y == year) {
            return Err(AppError::new(
                2,
                format!("Wages CSV has duplicate year column: {year}"),
            ));
        }
        year_columns.push((idx, year));
    }
    if year_columns.is_empty() {
        return Err(AppError::new(2, "Wages CSV has no year columns."));
    }

    let mut sectors: Vec<SectorSeries> = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;

        let record =
            result.map_err(|e| AppError::new(2, format!("Wages CSV parse error at line {line}: {e}")))?;

        let name = record
            .get(0)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::new(2, format!("Missing sector name at line {line}.")))?
            .to_string();
        if sectors.iter().any(|s| s.name == name) {
            return Err(AppError::new(
                2,
                format!("Duplicate sector '{name}' at line {line}."),
            ));
        }

        let mut values = std::collections::BTreeMap::new();
        for &(col, year) in &year_columns {
            let Some(cell) = record.get(col).map(str::trim).filter(|s| !s.is_empty()) else {
                continue;
            };
            let value = parse_value(Some(cell), &year.to_string(), line)?;
            values.insert(year, value);
        }

        sectors.push(SectorSeries { name, values });
    }

    if sectors.is_empty() {
        return Err(AppError::new(
            3,
            format!("Wages CSV '{}' contains no sector rows.", path.display()),
        ));
    }

    Ok(NominalSeries { sectors })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿year"). If we don't strip it, schema validation
    // will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn get_field(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_year(field: Option<&str>, column: &str, line: usize) -> Result<i32, AppError> {
    let s = field
        .ok_or_else(|| AppError::new(2, format!("Missing `{column}` value at line {line}.")))?;
    s.parse::<i32>().map_err(|_| {
        AppError::new(
            2,
            format!("Invalid `{column}` value '{s}' at line {line} (expected an integer year)."),
        )
    })
}

fn parse_value(field: Option<&str>, column: &str, line: usize) -> Result<f64, AppError> {
    let s = field
        .ok_or_else(|| AppError::new(2, format!("Missing `{column}` value at line {line}.")))?;
    let v = s.parse::<f64>().map_err(|_| {
        AppError::new(
            2,
            format!("Invalid `{column}` value '{s}' at line {line} (expected a number)."),
        )
    })?;
    if !v.is_finite() {
        return Err(AppError::new(
            2,
            format!("Non-finite `{column}` value '{s}' at line {line}."),
        ));
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("real-wages-test-{name}"));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn inflation_csv_round_trips() {
        let path = write_temp(
            "inflation-ok.csv",
            "year,inflation_rate\n2015,12.9\n2016,5.4\n2017,2.5\n",
        );
        let observations = load_inflation(&path).unwrap();
        assert_eq!(observations.len(), 3);
        assert_eq!(observations[0].year, 2015);
        assert!((observations[1].rate - 5.4).abs() < 1e-12);
    }

    #[test]
    fn inflation_csv_with_bom_header_is_accepted() {
        let path = write_temp(
            "inflation-bom.csv",
            "\u{feff}year,inflation_rate\n2016,5.4\n",
        );
        let observations = load_inflation(&path).unwrap();
        assert_eq!(observations[0].year, 2016);
    }

    #[test]
    fn inflation_csv_rejects_non_numeric_rate() {
        let path = write_temp(
            "inflation-bad-rate.csv",
            "year,inflation_rate\n2016,n/a\n",
        );
        let err = load_inflation(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn inflation_csv_rejects_missing_column() {
        let path = write_temp("inflation-no-rate.csv", "year,cpi\n2016,1.0\n");
        let err = load_inflation(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("inflation_rate"));
    }

    #[test]
    fn wages_csv_transposes_into_sector_series() {
        let path = write_temp(
            "wages-ok.csv",
            "sector,2015,2016,2017\nConstruction,29960,32332,33678\nEducation,26928,28094,30258\n",
        );
        let series = load_wages(&path).unwrap();
        assert_eq!(series.sectors.len(), 2);
        assert_eq!(series.sectors[0].name, "Construction");
        assert_eq!(series.sectors[0].get(2016), Some(32332.0));
        assert_eq!(series.years(), vec![2015, 2016, 2017]);
    }

    #[test]
    fn wages_csv_allows_gaps_but_not_garbage() {
        let path = write_temp(
            "wages-gap.csv",
            "sector,2015,2016\nEducation,,28094\n",
        );
        let series = load_wages(&path).unwrap();
        assert_eq!(series.sectors[0].get(2015), None);
        assert_eq!(series.sectors[0].get(2016), Some(28094.0));

        let path = write_temp(
            "wages-garbage.csv",
            "sector,2015,2016\nEducation,oops,28094\n",
        );
        let err = load_wages(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn wages_csv_rejects_non_year_header() {
        let path = write_temp("wages-bad-header.csv", "sector,avg\nEducation,1\n");
        let err = load_wages(&path).unwrap_err();
        assert!(err.to_string().contains("not a year"));
    }

    #[test]
    fn wages_csv_rejects_duplicate_sector() {
        let path = write_temp(
            "wages-dup-sector.csv",
            "sector,2016\nEducation,28094\nEducation,28094\n",
        );
        let err = load_wages(&path).unwrap_err();
        assert!(err.to_string().contains("Duplicate sector"));
    }
}
