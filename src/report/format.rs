//! Run summary, adjusted-table, and price-index formatting.

use std::collections::HashMap;

use crate::domain::{DisplayMode, InflationObservation, PriceIndex, RunConfig, TableFile};

/// Format the run summary (inputs, anchoring, joined coverage).
pub fn format_run_summary(
    table: &TableFile,
    index: &PriceIndex,
    config: &RunConfig,
    inputs: &str,
) -> String {
    let mut out = String::new();

    out.push_str("=== rw - Real Wage Series ===\n");
    out.push_str(&format!("Inputs: {inputs}\n"));
    out.push_str(&format!("Base year: {} (index = 1.0)\n", table.base_year));
    out.push_str(&format!("Cutoff: drop years before {}\n", table.min_year));
    out.push_str(&format!("Display: {}\n", config.mode.display_name()));
    out.push_str(&format!(
        "Index coverage: {} years [{} .. {}]\n",
        index.len(),
        index.first_year().map_or("-".to_string(), |y| y.to_string()),
        index.last_year().map_or("-".to_string(), |y| y.to_string()),
    ));
    out.push_str(&format!(
        "Joined: {} years [{} .. {}] | sectors: {}\n",
        table.years.len(),
        table.first_year().map_or("-".to_string(), |y| y.to_string()),
        table.last_year().map_or("-".to_string(), |y| y.to_string()),
        table
            .sectors
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    ));
    out.push('\n');

    out
}

/// Format the adjusted table, one block per sector.
pub fn format_table(table: &TableFile, mode: DisplayMode) -> String {
    let mut out = String::new();

    for sector in &table.sectors {
        out.push_str(&format!("{}\n", sector.name));
        out.push_str(&format!("{:>6} {:>12} {:>12}\n", "year", "nominal", "real"));
        out.push_str(&format!("{:->6} {:->12} {:->12}\n", "", "", ""));

        for (i, year) in table.years.iter().enumerate() {
            let nominal = sector.nominal.get(i).copied().flatten();
            let real = sector.real.get(i).copied().flatten();
            out.push_str(&format!(
                "{:>6} {:>12} {:>12}\n",
                year,
                fmt_value(nominal.filter(|_| mode.shows_nominal())),
                fmt_value(real.filter(|_| mode.shows_real())),
            ));
        }
        out.push('\n');
    }

    out
}

/// Format the price index alongside the raw rates, base year marked.
pub fn format_price_index(observations: &[InflationObservation], index: &PriceIndex) -> String {
    let rates: HashMap<i32, f64> = observations.iter().map(|o| (o.year, o.rate)).collect();

    let mut out = String::new();
    out.push_str(&format!("{:>6} {:>10} {:>10}\n", "year", "rate %", "index"));
    out.push_str(&format!("{:->6} {:->10} {:->10}\n", "", "", ""));

    for (year, value) in index.iter() {
        let marker = if year == index.base_year() { "*" } else { " " };
        let rate = rates
            .get(&year)
            .map(|r| format!("{r:.1}"))
            .unwrap_or_default();
        out.push_str(&format!("{year:>5}{marker} {rate:>10} {value:>10.4}\n"));
    }

    out
}

fn fmt_value(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpi::build_price_index;
    use crate::domain::TableSector;

    #[test]
    fn price_index_output_marks_the_base_year() {
        let observations = vec![
            InflationObservation { year: 2015, rate: 10.0 },
            InflationObservation { year: 2016, rate: 0.0 },
        ];
        let index = build_price_index(&observations, 2016).unwrap();
        let out = format_price_index(&observations, &index);
        assert!(out.contains(" 2016*"));
        assert!(out.contains("1.0000"));
    }

    #[test]
    fn table_output_respects_display_mode() {
        let table = TableFile {
            tool: "rw".to_string(),
            base_year: 2016,
            min_year: 2000,
            years: vec![2016],
            sectors: vec![TableSector {
                name: "Education".to_string(),
                nominal: vec![Some(28094.0)],
                real: vec![Some(28094.0)],
            }],
        };

        let both = format_table(&table, DisplayMode::Both);
        assert_eq!(both.matches("28094.00").count(), 2);

        let nominal_only = format_table(&table, DisplayMode::Nominal);
        assert_eq!(nominal_only.matches("28094.00").count(), 1);
    }
}
