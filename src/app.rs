//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads wage + inflation inputs
//! - builds the price index and deflates the wage table
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{AdjustArgs, Command, PlotArgs};
use crate::domain::RunConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `rw` binary.
pub fn run() -> Result<(), AppError> {
    // We want `rw` and `rw -s Education` to behave like `rw tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Adjust(args) => handle_adjust(args),
        Command::Index(args) => handle_index(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

fn handle_adjust(args: AdjustArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let run = pipeline::run_adjust(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.table, &run.index, &config, &run.inputs)
    );
    println!(
        "{}",
        crate::report::format_table(&display_table(&run.table, &config), config.mode)
    );

    if config.plot {
        let plot = crate::plot::render_ascii_panels(
            &display_table(&run.table, &config),
            config.mode,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    // Optional exports always carry the full table, not the display subset.
    if let Some(path) = &config.export {
        crate::io::export::write_adjusted_csv(path, &run.table)?;
    }
    if let Some(path) = &config.export_table {
        crate::io::table::write_table_json(path, &run.table)?;
    }

    Ok(())
}

fn handle_index(args: AdjustArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args);

    // The index view only needs the inflation side; no wage join required.
    let (_, observations, _) = pipeline::load_inputs(&config)?;
    let index = crate::cpi::build_price_index(&observations, config.base_year)?
        .clipped_from(config.min_year);

    println!(
        "{}",
        crate::report::format_price_index(&observations, &index)
    );
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let table = crate::io::table::read_table_json(&args.table)?;

    let plot = crate::plot::render_ascii_panels(&table, args.mode, args.width, args.height);
    println!("{plot}");
    Ok(())
}

pub fn run_config_from_args(args: &AdjustArgs) -> RunConfig {
    RunConfig {
        wages_path: args.wages.clone(),
        inflation_path: args.inflation.clone(),
        base_year: args.base_year,
        min_year: args.min_year,
        sectors: args.sectors.clone(),
        mode: args.mode,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export: args.export.clone(),
        export_table: args.export_table.clone(),
    }
}

/// Restrict a table to the sectors selected on the command line.
///
/// An unknown requested sector stays in the output as an empty column set, so
/// the report and plot can show "no data" for it rather than dropping the
/// request silently.
fn display_table(
    table: &crate::domain::TableFile,
    config: &RunConfig,
) -> crate::domain::TableFile {
    if config.sectors.is_empty() {
        return table.clone();
    }

    let sectors = config
        .sectors
        .iter()
        .map(|name| {
            table.sector(name).cloned().unwrap_or_else(|| {
                crate::domain::TableSector {
                    name: name.clone(),
                    nominal: vec![None; table.years.len()],
                    real: vec![None; table.years.len()],
                }
            })
        })
        .collect();

    crate::domain::TableFile {
        sectors,
        ..table.clone()
    }
}

/// Rewrite argv so `rw` defaults to `rw tui`.
///
/// Rules:
/// - `rw`                      -> `rw tui`
/// - `rw -s Education ...`     -> `rw tui -s Education ...`
/// - `rw --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "adjust" | "index" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
