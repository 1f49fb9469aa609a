//! Command-line parsing for the real-wage series viewer.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the index/deflation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::DisplayMode;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "rw", version, about = "Real wage series viewer (CPI-deflated)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the adjusted table, print it, and optionally plot/export.
    Adjust(AdjustArgs),
    /// Print the cumulative price index anchored at the base year.
    Index(AdjustArgs),
    /// Plot a previously exported table JSON.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying pipeline as `rw adjust`, but renders one
    /// chart panel per selected sector in a terminal UI using Ratatui.
    Tui(AdjustArgs),
}

/// Common options for computing the adjusted table.
#[derive(Debug, Parser, Clone)]
pub struct AdjustArgs {
    /// Wages CSV: one row per sector, first column `sector`, remaining
    /// headers are years. Defaults to $WAGES_CSV, then the built-in sample.
    #[arg(long)]
    pub wages: Option<PathBuf>,

    /// Inflation CSV with `year` and `inflation_rate` columns. Defaults to
    /// $INFLATION_CSV, then the built-in sample.
    #[arg(long)]
    pub inflation: Option<PathBuf>,

    /// Base year for CPI anchoring (index = 1.0 at this year).
    #[arg(short = 'b', long, default_value_t = 2016)]
    pub base_year: i32,

    /// Drop years before this cutoff from the final table.
    #[arg(long, default_value_t = 2000)]
    pub min_year: i32,

    /// Sector to display (repeatable). Defaults to all sectors in the input.
    #[arg(short = 's', long = "sector")]
    pub sectors: Vec<String>,

    /// Which wage series to display.
    #[arg(short = 'm', long, value_enum, default_value_t = DisplayMode::Both)]
    pub mode: DisplayMode,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the adjusted table to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the adjusted table (years + nominal/real series) to JSON.
    #[arg(long = "export-table")]
    pub export_table: Option<PathBuf>,
}

/// Options for plotting a saved table.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Table JSON file produced by `rw adjust --export-table`.
    #[arg(long, value_name = "JSON")]
    pub table: PathBuf,

    /// Which wage series to display.
    #[arg(short = 'm', long, value_enum, default_value_t = DisplayMode::Both)]
    pub mode: DisplayMode,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
