//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the registry entry type (`SeriesDescriptor`)
//! - normalized time-series data (`Observation`, `Series`)
//! - range-selection inputs and resolved outputs (`RangeSelection`,
//!   `RangeMode`, `DateWindow`, `YBounds`)

pub mod types;

pub use types::*;
