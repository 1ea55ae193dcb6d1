//! Shared domain types.
//!
//! These types are intentionally lightweight and serializable so they can be:
//!
//! - used in-memory during fetching and range resolution
//! - exported to CSV
//! - rendered by the TUI without further conversion

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// One registry entry: a display name and the provider's series identifier.
///
/// Descriptors are defined once at process start and never mutated. Duplicate
/// display names are permitted; the registry preserves insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesDescriptor {
    pub name: String,
    pub series_id: String,
}

impl SeriesDescriptor {
    pub fn new(name: impl Into<String>, series_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            series_id: series_id.into(),
        }
    }
}

/// One (date, value) sample in a series.
///
/// `value` is `None` when the provider returned its missing-data sentinel or
/// an unparseable token. Absent rows are preserved, never dropped, so range
/// resolution can treat them as gaps rather than zeros.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self { date, value }
    }
}

/// An ordered sequence of observations in the order returned by the provider.
///
/// The sequence is not re-sorted; the provider returns dates in ascending
/// order and the fetcher preserves that order verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub observations: Vec<Observation>,
}

impl Series {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Earliest date present in the series, if any.
    pub fn min_date(&self) -> Option<NaiveDate> {
        self.observations.iter().map(|o| o.date).min()
    }

    /// Latest date present in the series, if any.
    pub fn max_date(&self) -> Option<NaiveDate> {
        self.observations.iter().map(|o| o.date).max()
    }

    /// The most recent observation that carries a numeric value.
    pub fn latest_value(&self) -> Option<(NaiveDate, f64)> {
        self.observations
            .iter()
            .rev()
            .find_map(|o| o.value.map(|v| (o.date, v)))
    }

    /// Observations whose date falls inside `window` (inclusive).
    pub fn visible<'a>(&'a self, window: &DateWindow) -> impl Iterator<Item = &'a Observation> {
        let (start, end) = (window.start, window.end);
        self.observations
            .iter()
            .filter(move |o| o.date >= start && o.date <= end)
    }
}

/// User-chosen policy for the visible date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeSelection {
    /// Window of the last `n` days, anchored at the latest date present.
    FixedDays(i64),
    /// Full history of the series (or of all series in master mode).
    AllTime,
    /// Caller-supplied bounds, used as given.
    Explicit { start: NaiveDate, end: NaiveDate },
}

impl Default for RangeSelection {
    fn default() -> Self {
        Self::AllTime
    }
}

impl RangeSelection {
    pub const WEEK: Self = Self::FixedDays(7);
    pub const MONTH: Self = Self::FixedDays(30);
    pub const QUARTER: Self = Self::FixedDays(90);
    pub const YEAR: Self = Self::FixedDays(365);

    pub fn label(&self) -> String {
        match self {
            Self::FixedDays(7) => "1W".to_string(),
            Self::FixedDays(30) => "1M".to_string(),
            Self::FixedDays(90) => "3M".to_string(),
            Self::FixedDays(365) => "1Y".to_string(),
            Self::FixedDays(n) => format!("{n}d"),
            Self::AllTime => "all".to_string(),
            Self::Explicit { start, end } => format!("{start}..{end}"),
        }
    }
}

/// Whether each series resolves its own window or all series share one.
///
/// These are mutually exclusive strategies: master mode requires every fetch
/// to complete before the shared window is knowable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeMode {
    PerSeries,
    Master,
}

/// A concrete, inclusive date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window covering the last `days` days ending at `end`.
    pub fn last_days(end: NaiveDate, days: i64) -> Self {
        Self {
            start: end - Duration::days(days),
            end,
        }
    }
}

/// Y-axis bounds bracketing the visible values of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YBounds {
    pub min: f64,
    pub max: f64,
}

/// A resolved window plus optional Y bounds for one series.
///
/// `y_bounds` is `None` when the visible subset holds no numeric value; the
/// presentation layer auto-scales in that case instead of collapsing to a
/// degenerate range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRange {
    pub window: DateWindow,
    pub y_bounds: Option<YBounds>,
}
