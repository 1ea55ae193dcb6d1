//! Output helpers.
//!
//! - per-series CSV export (`export`)

pub mod export;

pub use export::*;
