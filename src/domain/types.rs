//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while building the index and deflating
//! - exported to JSON/CSV
//! - reloaded later for plotting without recomputation

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One record of observed year-over-year inflation.
///
/// `rate` is a percentage (`5.2` means 5.2%); negative values mean deflation.
/// Years must be unique within the sequence feeding one index computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InflationObservation {
    pub year: i32,
    pub rate: f64,
}

/// A cumulative price index anchored at a base year.
///
/// Invariants (guaranteed by [`crate::cpi::index::build_price_index`]):
///
/// - `get(base_year) == Some(1.0)` exactly
/// - every value is strictly positive
/// - years with no corresponding inflation observation are absent (gaps),
///   never interpolated
///
/// The index is built once per base-year choice and is immutable afterward;
/// [`PriceIndex::clipped_from`] produces a new value rather than mutating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceIndex {
    base_year: i32,
    values: BTreeMap<i32, f64>,
}

impl PriceIndex {
    pub(crate) fn from_parts(base_year: i32, values: BTreeMap<i32, f64>) -> Self {
        Self { base_year, values }
    }

    pub fn base_year(&self) -> i32 {
        self.base_year
    }

    pub fn get(&self, year: i32) -> Option<f64> {
        self.values.get(&year).copied()
    }

    /// Years covered by the index, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.values.keys().copied()
    }

    /// `(year, index)` pairs, ascending by year.
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.values.iter().map(|(&y, &v)| (y, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.values.keys().next().copied()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.values.keys().next_back().copied()
    }

    /// Restrict the index to years at or after `min_year`.
    ///
    /// The cutoff is a configuration value independent of the base year; the
    /// base year itself may be clipped away if it lies before the cutoff.
    pub fn clipped_from(&self, min_year: i32) -> PriceIndex {
        PriceIndex {
            base_year: self.base_year,
            values: self
                .values
                .iter()
                .filter(|&(&year, _)| year >= min_year)
                .map(|(&year, &value)| (year, value))
                .collect(),
        }
    }
}

/// A single sector's yearly wage series (same currency unit throughout).
#[derive(Debug, Clone, PartialEq)]
pub struct SectorSeries {
    pub name: String,
    pub values: BTreeMap<i32, f64>,
}

impl SectorSeries {
    pub fn get(&self, year: i32) -> Option<f64> {
        self.values.get(&year).copied()
    }
}

/// Nominal wages per sector, in source-file order.
///
/// Order matters for presentation: the first sector is the default selection
/// in the TUI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NominalSeries {
    pub sectors: Vec<SectorSeries>,
}

impl NominalSeries {
    pub fn sector(&self, name: &str) -> Option<&SectorSeries> {
        self.sectors.iter().find(|s| s.name == name)
    }

    pub fn sector_names(&self) -> impl Iterator<Item = &str> {
        self.sectors.iter().map(|s| s.name.as_str())
    }

    /// Union of years across all sectors, ascending.
    pub fn years(&self) -> Vec<i32> {
        let set: std::collections::BTreeSet<i32> = self
            .sectors
            .iter()
            .flat_map(|s| s.values.keys().copied())
            .collect();
        set.into_iter().collect()
    }
}

/// Inflation-adjusted wages per sector.
///
/// Derived wholesale from a `NominalSeries` and a `PriceIndex`; never mutated
/// in place; regenerate instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RealSeries {
    pub sectors: Vec<SectorSeries>,
}

impl RealSeries {
    pub fn sector(&self, name: &str) -> Option<&SectorSeries> {
        self.sectors.iter().find(|s| s.name == name)
    }
}

/// Which wage series to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Nominal wages only.
    Nominal,
    /// Inflation-adjusted wages only.
    Real,
    /// Both series overlaid.
    Both,
}

impl DisplayMode {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            DisplayMode::Nominal => "nominal",
            DisplayMode::Real => "real",
            DisplayMode::Both => "nominal vs real",
        }
    }

    pub fn next(self) -> Self {
        match self {
            DisplayMode::Nominal => DisplayMode::Real,
            DisplayMode::Real => DisplayMode::Both,
            DisplayMode::Both => DisplayMode::Nominal,
        }
    }

    pub fn shows_nominal(self) -> bool {
        matches!(self, DisplayMode::Nominal | DisplayMode::Both)
    }

    pub fn shows_real(self) -> bool {
        matches!(self, DisplayMode::Real | DisplayMode::Both)
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults and `.env` overrides).
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Wages CSV (rows = sectors, columns = years). `None` means: use the
    /// `WAGES_CSV` environment variable, or the built-in sample data.
    pub wages_path: Option<PathBuf>,
    /// Inflation CSV (`year`, `inflation_rate` columns). `None` means: use
    /// the `INFLATION_CSV` environment variable, or the built-in sample data.
    pub inflation_path: Option<PathBuf>,

    /// Year whose price index is pinned to exactly 1.0.
    pub base_year: i32,
    /// Years before this cutoff are dropped from the final table.
    pub min_year: i32,

    /// Sector names to display. Empty means: all sectors in the input.
    pub sectors: Vec<String>,
    pub mode: DisplayMode,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export: Option<PathBuf>,
    pub export_table: Option<PathBuf>,
}

/// A saved adjusted-table file (JSON).
///
/// This is the "portable" representation of one run's output: the joined
/// years plus nominal and real values per sector, aligned by position with
/// `years`. Gaps (a sector missing a joined year) are `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFile {
    pub tool: String,
    pub base_year: i32,
    pub min_year: i32,
    /// Joined years (present in both the wage data and the price index),
    /// ascending.
    pub years: Vec<i32>,
    pub sectors: Vec<TableSector>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSector {
    pub name: String,
    pub nominal: Vec<Option<f64>>,
    pub real: Vec<Option<f64>>,
}

impl TableFile {
    pub fn sector(&self, name: &str) -> Option<&TableSector> {
        self.sectors.iter().find(|s| s.name == name)
    }

    pub fn first_year(&self) -> Option<i32> {
        self.years.first().copied()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.years.last().copied()
    }
}
