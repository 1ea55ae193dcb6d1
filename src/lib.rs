//! `econ-dash` library crate.
//!
//! The binary (`edash`) is a thin wrapper around this library so that:
//!
//! - core logic (fetch, range resolution) is testable without spawning processes
//! - modules stay reusable if another front-end grows alongside the TUI
//!
//! Data flow: registry -> fetcher (one HTTP call per series, sequential) ->
//! range resolver -> presentation (TUI charts or terminal report).

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod range;
pub mod report;
pub mod tui;
