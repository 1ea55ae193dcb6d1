//! Command-line parsing for the economic indicators dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the fetch/range logic.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::RangeSelection;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "edash", version, about = "Economic Indicators Dashboard (FRED-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard TUI.
    ///
    /// This uses the same fetch pipeline as `edash fetch`, but renders one
    /// line chart per indicator in a terminal UI using Ratatui.
    Tui(DashArgs),
    /// Fetch all indicators and print a per-series summary table.
    Fetch(DashArgs),
    /// Fetch all indicators and export observations to CSV files.
    Export(ExportArgs),
    /// Print the indicator registry.
    List,
}

/// Common options for fetching and range resolution.
#[derive(Debug, Parser, Clone)]
pub struct DashArgs {
    /// Visible date window preset.
    #[arg(long, value_enum, default_value_t = RangePreset::All)]
    pub range: RangePreset,

    /// Explicit window start (YYYY-MM-DD); requires --end, overrides --range.
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Explicit window end (YYYY-MM-DD); requires --start.
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Couple all indicators to one shared date window (master-range mode).
    #[arg(long)]
    pub master: bool,

    /// Limit to the named indicators (repeatable, case-insensitive).
    #[arg(long = "series")]
    pub series: Vec<String>,
}

/// Options for CSV export.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub dash: DashArgs,

    /// Output directory for the per-series CSV files.
    #[arg(long, default_value = "export")]
    pub out: PathBuf,
}

/// Date window presets matching the original dashboard's range buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RangePreset {
    #[value(name = "1w")]
    Week,
    #[value(name = "1m")]
    Month,
    #[value(name = "3m")]
    Quarter,
    #[value(name = "1y")]
    Year,
    #[value(name = "all")]
    All,
}

impl RangePreset {
    pub fn selection(self) -> RangeSelection {
        match self {
            Self::Week => RangeSelection::WEEK,
            Self::Month => RangeSelection::MONTH,
            Self::Quarter => RangeSelection::QUARTER,
            Self::Year => RangeSelection::YEAR,
            Self::All => RangeSelection::AllTime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_map_to_the_documented_day_counts() {
        assert_eq!(RangePreset::Week.selection(), RangeSelection::FixedDays(7));
        assert_eq!(RangePreset::Month.selection(), RangeSelection::FixedDays(30));
        assert_eq!(RangePreset::Quarter.selection(), RangeSelection::FixedDays(90));
        assert_eq!(RangePreset::Year.selection(), RangeSelection::FixedDays(365));
        assert_eq!(RangePreset::All.selection(), RangeSelection::AllTime);
    }

    #[test]
    fn cli_parses_fetch_with_range_and_master() {
        let cli = Cli::try_parse_from(["edash", "fetch", "--range", "3m", "--master"]).unwrap();
        match cli.command {
            Command::Fetch(args) => {
                assert_eq!(args.range, RangePreset::Quarter);
                assert!(args.master);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parses_explicit_bounds() {
        let cli = Cli::try_parse_from([
            "edash", "fetch", "--start", "2020-01-01", "--end", "2020-06-30",
        ])
        .unwrap();
        match cli.command {
            Command::Fetch(args) => {
                assert_eq!(args.start.unwrap().to_string(), "2020-01-01");
                assert_eq!(args.end.unwrap().to_string(), "2020-06-30");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
