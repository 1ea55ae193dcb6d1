//! Data acquisition.
//!
//! - series registry (`registry`)
//! - FRED observations fetcher (`fred`)

pub mod fred;
pub mod registry;

pub use fred::FredClient;
pub use registry::default_registry;
