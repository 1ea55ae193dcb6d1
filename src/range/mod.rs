//! Range resolution: turning a `RangeSelection` into a concrete date window
//! and Y-axis bounds.
//!
//! Two mutually exclusive strategies:
//!
//! - per-series: each series anchors its own window on its own latest date
//! - master: one shared window anchored on the latest date across all series,
//!   computable only after every fetch has completed
//!
//! Y bounds are always per series and always over the *visible* subset, so a
//! narrow window re-scales the axis to the data actually on screen.

use chrono::NaiveDate;

use crate::domain::{DateWindow, RangeSelection, ResolvedRange, Series, YBounds};

/// Y-axis headroom below the visible minimum and above the visible maximum.
const Y_PAD_LOW: f64 = 0.9;
const Y_PAD_HIGH: f64 = 1.1;

/// Resolve a window and Y bounds for one series.
///
/// Returns `None` for an empty series under `FixedDays`/`AllTime`, since no
/// anchor date exists. `Explicit` bounds always resolve (the caller supplied
/// the window), possibly with `y_bounds = None`.
pub fn resolve(series: &Series, selection: RangeSelection) -> Option<ResolvedRange> {
    let window = match selection {
        RangeSelection::Explicit { start, end } => DateWindow::new(start, end),
        RangeSelection::AllTime => DateWindow::new(series.min_date()?, series.max_date()?),
        RangeSelection::FixedDays(n) => DateWindow::last_days(series.max_date()?, n),
    };
    Some(ResolvedRange {
        y_bounds: y_bounds_in(series, &window),
        window,
    })
}

/// Resolve the shared master window across a collection of series.
///
/// Empty series contribute nothing; returns `None` when no series holds any
/// observation (`Explicit` excepted, as above).
pub fn resolve_master(series: &[&Series], selection: RangeSelection) -> Option<DateWindow> {
    match selection {
        RangeSelection::Explicit { start, end } => Some(DateWindow::new(start, end)),
        RangeSelection::AllTime => {
            let start = series.iter().filter_map(|s| s.min_date()).min()?;
            let end = series.iter().filter_map(|s| s.max_date()).max()?;
            Some(DateWindow::new(start, end))
        }
        RangeSelection::FixedDays(n) => {
            let end = global_max_date(series)?;
            Some(DateWindow::last_days(end, n))
        }
    }
}

/// Y bounds over the present values of `series` inside `window`.
///
/// `None` when nothing numeric is visible, so the presentation layer
/// auto-scales instead of collapsing to a degenerate range.
pub fn y_bounds_in(series: &Series, window: &DateWindow) -> Option<YBounds> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut seen = false;

    for obs in series.visible(window) {
        if let Some(v) = obs.value {
            min = min.min(v);
            max = max.max(v);
            seen = true;
        }
    }

    if !seen {
        return None;
    }
    Some(YBounds {
        min: Y_PAD_LOW * min,
        max: Y_PAD_HIGH * max,
    })
}

fn global_max_date(series: &[&Series]) -> Option<NaiveDate> {
    series.iter().filter_map(|s| s.max_date()).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;
    use chrono::{Duration, NaiveDate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(rows: &[(NaiveDate, Option<f64>)]) -> Series {
        Series::new(rows.iter().map(|&(d, v)| Observation::new(d, v)).collect())
    }

    #[test]
    fn all_time_window_is_exact_min_max() {
        let s = series(&[
            (date(2020, 1, 1), Some(3.5)),
            (date(2020, 1, 2), None),
        ]);
        let resolved = resolve(&s, RangeSelection::AllTime).unwrap();
        assert_eq!(resolved.window.start, date(2020, 1, 1));
        assert_eq!(resolved.window.end, date(2020, 1, 2));

        // Bounds come from 3.5 alone; the absent row is a gap, not a zero.
        let b = resolved.y_bounds.unwrap();
        assert!((b.min - 0.9 * 3.5).abs() < 1e-12);
        assert!((b.max - 1.1 * 3.5).abs() < 1e-12);
    }

    #[test]
    fn fixed_window_anchors_on_max_date_regardless_of_data() {
        // Sparse series: nothing exists 30 days before the last date.
        let s = series(&[
            (date(2019, 6, 1), Some(1.0)),
            (date(2020, 6, 1), Some(2.0)),
        ]);
        let resolved = resolve(&s, RangeSelection::FixedDays(30)).unwrap();
        assert_eq!(resolved.window.end, date(2020, 6, 1));
        assert_eq!(resolved.window.start, date(2020, 6, 1) - Duration::days(30));
    }

    #[test]
    fn y_bounds_cover_only_the_visible_subset() {
        let s = series(&[
            (date(2020, 1, 1), Some(100.0)),
            (date(2020, 6, 1), Some(10.0)),
            (date(2020, 6, 10), Some(20.0)),
        ]);
        let resolved = resolve(&s, RangeSelection::FixedDays(30)).unwrap();
        let b = resolved.y_bounds.unwrap();
        // The 100.0 point in January is outside the window and must not
        // inflate the bounds.
        assert!((b.min - 0.9 * 10.0).abs() < 1e-12);
        assert!((b.max - 1.1 * 20.0).abs() < 1e-12);
        assert!(b.min <= 0.9 * 10.0 + 1e-9);
        assert!(b.max >= 1.1 * 20.0 - 1e-9);
    }

    #[test]
    fn explicit_bounds_are_used_as_given() {
        let s = series(&[(date(2020, 1, 15), Some(5.0))]);
        let selection = RangeSelection::Explicit {
            start: date(2020, 1, 1),
            end: date(2020, 2, 1),
        };
        let resolved = resolve(&s, selection).unwrap();
        assert_eq!(resolved.window.start, date(2020, 1, 1));
        assert_eq!(resolved.window.end, date(2020, 2, 1));
        assert!(resolved.y_bounds.is_some());
    }

    #[test]
    fn empty_series_resolves_to_none() {
        let s = Series::empty();
        assert!(resolve(&s, RangeSelection::AllTime).is_none());
        assert!(resolve(&s, RangeSelection::FixedDays(7)).is_none());
    }

    #[test]
    fn absent_only_series_has_window_but_no_bounds() {
        let s = series(&[(date(2020, 1, 1), None), (date(2020, 1, 2), None)]);
        let resolved = resolve(&s, RangeSelection::AllTime).unwrap();
        assert_eq!(resolved.window.start, date(2020, 1, 1));
        assert!(resolved.y_bounds.is_none());
    }

    #[test]
    fn window_with_no_visible_numeric_values_has_no_bounds() {
        let s = series(&[
            (date(2020, 1, 1), Some(3.0)),
            (date(2020, 6, 1), None),
        ]);
        // Window covers only the absent tail.
        let resolved = resolve(&s, RangeSelection::FixedDays(7)).unwrap();
        assert!(resolved.y_bounds.is_none());
    }

    #[test]
    fn master_window_spans_latest_across_all_series() {
        let a = series(&[(date(2020, 1, 1), Some(1.0)), (date(2020, 3, 1), Some(2.0))]);
        let b = series(&[(date(2019, 12, 1), Some(4.0)), (date(2020, 5, 1), Some(5.0))]);
        let empty = Series::empty();

        let window = resolve_master(&[&a, &b, &empty], RangeSelection::AllTime).unwrap();
        assert_eq!(window.start, date(2019, 12, 1));
        assert_eq!(window.end, date(2020, 5, 1));

        let fixed = resolve_master(&[&a, &b, &empty], RangeSelection::FixedDays(90)).unwrap();
        assert_eq!(fixed.end, date(2020, 5, 1));
        assert_eq!(fixed.start, date(2020, 5, 1) - Duration::days(90));
    }

    #[test]
    fn master_window_of_all_empty_series_is_none() {
        let empty = Series::empty();
        assert!(resolve_master(&[&empty, &empty], RangeSelection::AllTime).is_none());
        assert!(resolve_master(&[], RangeSelection::FixedDays(7)).is_none());
    }

    #[test]
    fn per_series_bounds_under_a_master_window_differ_per_series() {
        let a = series(&[(date(2020, 1, 1), Some(1.0))]);
        let b = series(&[(date(2020, 1, 2), Some(100.0))]);
        let window = resolve_master(&[&a, &b], RangeSelection::AllTime).unwrap();

        let ba = y_bounds_in(&a, &window).unwrap();
        let bb = y_bounds_in(&b, &window).unwrap();
        assert!((ba.max - 1.1).abs() < 1e-12);
        assert!((bb.max - 110.0).abs() < 1e-12);
    }
}
