//! Read/write adjusted-table JSON files.
//!
//! Table JSON is the "portable" representation of one run's output:
//! - the joined years
//! - nominal and real values per sector, aligned with the year list
//! - run metadata (base year, cutoff)
//!
//! The schema is defined by `domain::TableFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{NominalSeries, PriceIndex, RealSeries, TableFile, TableSector};
use crate::error::AppError;

/// Assemble a [`TableFile`] from the pipeline's outputs.
///
/// `years` is the joined year list; sectors keep their source order. A
/// sector-year gap becomes `None` rather than a fabricated zero.
pub fn build_table_file(
    nominal: &NominalSeries,
    real: &RealSeries,
    index: &PriceIndex,
    years: &[i32],
    min_year: i32,
) -> TableFile {
    let sectors = nominal
        .sectors
        .iter()
        .map(|sector| {
            let adjusted = real.sector(&sector.name);
            TableSector {
                name: sector.name.clone(),
                nominal: years.iter().map(|&y| sector.get(y)).collect(),
                real: years
                    .iter()
                    .map(|&y| adjusted.and_then(|s| s.get(y)))
                    .collect(),
            }
        })
        .collect();

    TableFile {
        tool: "rw".to_string(),
        base_year: index.base_year(),
        min_year,
        years: years.to_vec(),
        sectors,
    }
}

/// Write a table JSON file.
pub fn write_table_json(path: &Path, table: &TableFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create table JSON '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, table)
        .map_err(|e| AppError::new(2, format!("Failed to write table JSON: {e}")))?;

    Ok(())
}

/// Read a table JSON file.
pub fn read_table_json(path: &Path) -> Result<TableFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open table JSON '{}': {e}", path.display()))
    })?;
    let table: TableFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid table JSON: {e}")))?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpi::{build_price_index, deflate, joined_years};
    use crate::domain::{InflationObservation, SectorSeries};

    fn fixture() -> TableFile {
        let observations = vec![
            InflationObservation { year: 2015, rate: 10.0 },
            InflationObservation { year: 2016, rate: 0.0 },
            InflationObservation { year: 2017, rate: 5.0 },
        ];
        let index = build_price_index(&observations, 2016).unwrap();
        let nominal = NominalSeries {
            sectors: vec![SectorSeries {
                name: "Education".to_string(),
                values: [(2016, 1000.0), (2017, 1000.0), (2020, 1400.0)]
                    .into_iter()
                    .collect(),
            }],
        };
        let real = deflate(&nominal, &index).unwrap();
        let years = joined_years(&nominal, &index);
        build_table_file(&nominal, &real, &index, &years, 2000)
    }

    #[test]
    fn table_aligns_values_with_joined_years() {
        let table = fixture();
        assert_eq!(table.years, vec![2016, 2017]);
        let sector = table.sector("Education").unwrap();
        assert_eq!(sector.nominal, vec![Some(1000.0), Some(1000.0)]);
        assert_eq!(sector.real[0], Some(1000.0));
        assert!((sector.real[1].unwrap() - 952.380952).abs() < 1e-4);
    }

    #[test]
    fn table_json_round_trips() {
        let table = fixture();
        let path = std::env::temp_dir().join("real-wages-test-table.json");
        write_table_json(&path, &table).unwrap();
        let loaded = read_table_json(&path).unwrap();
        assert_eq!(loaded, table);
    }
}
