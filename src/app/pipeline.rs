//! Shared pipeline logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load inputs -> build index -> clip -> deflate -> assemble table
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).
//! Every run rebuilds its outputs wholesale from the immutable inputs; there
//! is no cached derived state to invalidate.

use std::path::PathBuf;

use crate::cpi::{build_price_index, deflate, joined_years};
use crate::data::sample;
use crate::domain::{
    InflationObservation, NominalSeries, PriceIndex, RealSeries, RunConfig, TableFile,
};
use crate::error::AppError;
use crate::io::ingest;
use crate::io::table::build_table_file;

/// All computed outputs of a single adjustment run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub observations: Vec<InflationObservation>,
    pub nominal: NominalSeries,
    /// The price index after the cutoff is applied.
    pub index: PriceIndex,
    pub real: RealSeries,
    pub table: TableFile,
    /// Human-readable description of where the inputs came from.
    pub inputs: String,
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_adjust(config: &RunConfig) -> Result<RunOutput, AppError> {
    let (nominal, observations, inputs) = load_inputs(config)?;

    let index = build_price_index(&observations, config.base_year)?;
    let index = index.clipped_from(config.min_year);

    let real = deflate(&nominal, &index)?;
    let years = joined_years(&nominal, &index);
    let table = build_table_file(&nominal, &real, &index, &years, config.min_year);

    Ok(RunOutput {
        observations,
        nominal,
        index,
        real,
        table,
        inputs,
    })
}

/// Load the wage table and the inflation series.
///
/// Each input resolves independently: an explicit path wins, then the
/// corresponding environment variable (`WAGES_CSV` / `INFLATION_CSV`, with
/// `.env` support), then the built-in sample data.
pub fn load_inputs(
    config: &RunConfig,
) -> Result<(NominalSeries, Vec<InflationObservation>, String), AppError> {
    dotenvy::dotenv().ok();

    let wages_path = resolve_path(&config.wages_path, "WAGES_CSV");
    let inflation_path = resolve_path(&config.inflation_path, "INFLATION_CSV");

    let nominal = match &wages_path {
        Some(path) => ingest::load_wages(path)?,
        None => sample::sample_wages(),
    };
    let observations = match &inflation_path {
        Some(path) => ingest::load_inflation(path)?,
        None => sample::sample_inflation(),
    };

    let inputs = format!(
        "wages: {} | inflation: {}",
        describe(&wages_path),
        describe(&inflation_path)
    );

    Ok((nominal, observations, inputs))
}

fn resolve_path(explicit: &Option<PathBuf>, env_var: &str) -> Option<PathBuf> {
    explicit
        .clone()
        .or_else(|| std::env::var(env_var).ok().map(PathBuf::from))
}

fn describe(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "built-in sample".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DisplayMode;

    fn sample_config() -> RunConfig {
        RunConfig {
            wages_path: None,
            inflation_path: None,
            base_year: 2016,
            min_year: 2000,
            sectors: Vec::new(),
            mode: DisplayMode::Both,
            plot: false,
            plot_width: 100,
            plot_height: 25,
            export: None,
            export_table: None,
        }
    }

    #[test]
    fn sample_run_produces_a_joined_table() {
        let run = run_adjust(&sample_config()).unwrap();

        assert_eq!(run.index.get(run.index.base_year()), Some(1.0));
        assert_eq!(run.table.first_year(), Some(2000));
        assert_eq!(run.table.sectors.len(), 3);

        // The base year's real value reproduces the nominal value.
        let i = run
            .table
            .years
            .iter()
            .position(|&y| y == 2016)
            .unwrap();
        for sector in &run.table.sectors {
            assert_eq!(sector.nominal[i], sector.real[i]);
        }
    }

    #[test]
    fn base_year_outside_the_input_fails() {
        let mut config = sample_config();
        config.base_year = 1900;
        let err = run_adjust(&config).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("1900"));
    }

    #[test]
    fn cutoff_beyond_the_data_fails_with_empty_join() {
        let mut config = sample_config();
        config.min_year = 2100;
        let err = run_adjust(&config).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
