//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the registry and the FRED client
//! - runs the fetch-and-resolve pipeline
//! - dispatches to the TUI, the terminal report, or the CSV export

use clap::Parser;

use crate::cli::{Command, DashArgs, ExportArgs};
use crate::data::registry;
use crate::domain::{RangeMode, RangeSelection, SeriesDescriptor};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `edash` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `edash` (and `edash --master`) to behave like `edash tui`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while keeping the dashboard one keystroke away.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Fetch(args) => handle_fetch(args),
        Command::Export(args) => handle_export(args),
        Command::List => handle_list(),
    }
}

fn handle_fetch(args: DashArgs) -> Result<(), AppError> {
    let (selection, mode) = range_settings(&args)?;
    let descriptors = selected_registry(&args)?;

    let client = crate::data::FredClient::from_env()?;
    let data = pipeline::fetch_all(&client, &descriptors);
    let views = pipeline::resolve_views(&data, selection, mode);

    println!("{}", crate::report::format_dashboard(&views, selection, mode));

    for view in &views {
        if let Some(reason) = view.panel.failure() {
            eprintln!(
                "warning: could not fetch data for {} ({reason})",
                view.panel.descriptor.name
            );
        }
    }

    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let descriptors = selected_registry(&args.dash)?;

    let client = crate::data::FredClient::from_env()?;
    let data = pipeline::fetch_all(&client, &descriptors);

    let written = crate::io::export::write_series_csvs(&args.out, &data)?;
    println!("Wrote {} CSV file(s) to {}", written.len(), args.out.display());

    for panel in &data.panels {
        if let Some(reason) = panel.failure() {
            eprintln!(
                "warning: could not fetch data for {} ({reason})",
                panel.descriptor.name
            );
        }
    }

    Ok(())
}

fn handle_tui(args: DashArgs) -> Result<(), AppError> {
    let (selection, mode) = range_settings(&args)?;
    let descriptors = selected_registry(&args)?;
    crate::tui::run(descriptors, selection, mode)
}

fn handle_list() -> Result<(), AppError> {
    for d in registry::default_registry() {
        println!("{:<32} {}", d.name, d.series_id);
    }
    Ok(())
}

/// Resolve the registry subset requested on the command line.
fn selected_registry(args: &DashArgs) -> Result<Vec<SeriesDescriptor>, AppError> {
    let descriptors = registry::filter_by_name(registry::default_registry(), &args.series);
    if descriptors.is_empty() {
        return Err(AppError::usage(
            "No indicators match the requested --series names (see `edash list`).",
        ));
    }
    Ok(descriptors)
}

/// Turn CLI flags into a range selection and mode.
///
/// Explicit `--start/--end` bounds override the `--range` preset; giving only
/// one of the two is a usage error.
pub fn range_settings(args: &DashArgs) -> Result<(RangeSelection, RangeMode), AppError> {
    let selection = match (args.start, args.end) {
        (Some(start), Some(end)) => {
            if end < start {
                return Err(AppError::usage("--end must not precede --start."));
            }
            RangeSelection::Explicit { start, end }
        }
        (None, None) => args.range.selection(),
        _ => return Err(AppError::usage("--start and --end must be given together.")),
    };

    let mode = if args.master {
        RangeMode::Master
    } else {
        RangeMode::PerSeries
    };

    Ok((selection, mode))
}

/// Rewrite argv so `edash` defaults to `edash tui`.
///
/// Rules:
/// - `edash`                      -> `edash tui`
/// - `edash --master ...`         -> `edash tui --master ...`
/// - `edash --help/--version/-h`  -> unchanged (show top-level help/version)
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

    let is_subcommand = matches!(arg1.as_str(), "tui" | "fetch" | "export" | "list");
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
