//! Export the adjusted table to CSV.
//!
//! The export mirrors the adjusted-table layout downstream spreadsheets
//! expect: one row per joined year, and per sector a nominal column plus a
//! real column.

use std::path::Path;

use crate::domain::TableFile;
use crate::error::AppError;

/// Write the adjusted table to a CSV file.
///
/// Gap cells (a sector missing a joined year) are left empty.
pub fn write_adjusted_csv(path: &Path, table: &TableFile) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    let mut header = vec!["year".to_string()];
    for sector in &table.sectors {
        header.push(sector.name.clone());
        header.push(format!("{} (real)", sector.name));
    }
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for (i, year) in table.years.iter().enumerate() {
        let mut row = vec![year.to_string()];
        for sector in &table.sectors {
            row.push(fmt_cell(sector.nominal.get(i).copied().flatten()));
            row.push(fmt_cell(sector.real.get(i).copied().flatten()));
        }
        writer
            .write_record(&row)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;

    Ok(())
}

fn fmt_cell(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TableSector;

    #[test]
    fn export_writes_nominal_and_real_columns() {
        let table = TableFile {
            tool: "rw".to_string(),
            base_year: 2016,
            min_year: 2000,
            years: vec![2016, 2017],
            sectors: vec![TableSector {
                name: "Education".to_string(),
                nominal: vec![Some(1000.0), Some(1000.0)],
                real: vec![Some(1000.0), None],
            }],
        };

        let path = std::env::temp_dir().join("real-wages-test-export.csv");
        write_adjusted_csv(&path, &table).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("year,Education,Education (real)"));
        assert_eq!(lines.next(), Some("2016,1000.00,1000.00"));
        assert_eq!(lines.next(), Some("2017,1000.00,"));
    }
}
