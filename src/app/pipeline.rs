//! Shared fetch-and-resolve pipeline used by both the CLI and the TUI.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! registry -> per-series fetch (sequential) -> range resolution -> views
//!
//! The CLI and the TUI then focus on presentation (printing vs widgets).

use crate::data::FredClient;
use crate::domain::{RangeMode, RangeSelection, ResolvedRange, Series, SeriesDescriptor};
use crate::range;

/// Outcome of one series fetch.
///
/// `Failed` carries the transport-fault message; a provider response without
/// observations is `Fetched` with an empty series. Both render as "could not
/// fetch" downstream, per-series, without affecting the rest of the batch.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Fetched(Series),
    Failed(String),
}

/// One registry entry plus its fetch outcome.
#[derive(Debug, Clone)]
pub struct Panel {
    pub descriptor: SeriesDescriptor,
    pub outcome: FetchOutcome,
}

impl Panel {
    /// The fetched series, when the fetch succeeded and returned data.
    pub fn series(&self) -> Option<&Series> {
        match &self.outcome {
            FetchOutcome::Fetched(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// Why this panel has no chart, if it doesn't.
    pub fn failure(&self) -> Option<String> {
        match &self.outcome {
            FetchOutcome::Failed(msg) => Some(msg.clone()),
            FetchOutcome::Fetched(s) if s.is_empty() => {
                Some("provider returned no observations".to_string())
            }
            FetchOutcome::Fetched(_) => None,
        }
    }
}

/// All fetched panels of one dashboard refresh, in registry order.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub panels: Vec<Panel>,
}

/// One panel joined with its resolved window and Y bounds.
#[derive(Debug, Clone, Copy)]
pub struct PanelView<'a> {
    pub panel: &'a Panel,
    pub range: Option<ResolvedRange>,
}

/// Fetch every registry entry in order, one blocking call at a time.
///
/// A transport fault on one series is recorded in its panel and the loop
/// continues; the batch never aborts because of a single indicator.
pub fn fetch_all(client: &FredClient, registry: &[SeriesDescriptor]) -> DashboardData {
    let mut panels = Vec::with_capacity(registry.len());
    for descriptor in registry {
        let outcome = match client.fetch_series(&descriptor.series_id) {
            Ok(series) => FetchOutcome::Fetched(series),
            Err(err) => FetchOutcome::Failed(err.to_string()),
        };
        panels.push(Panel {
            descriptor: descriptor.clone(),
            outcome,
        });
    }
    DashboardData { panels }
}

/// Join every panel with its resolved range under the chosen mode.
///
/// Master mode is a strict barrier: the shared window derives from the union
/// of all fetched series, so it can only be computed here, after `fetch_all`
/// has returned. Y bounds stay per series in both modes.
pub fn resolve_views(
    data: &DashboardData,
    selection: RangeSelection,
    mode: RangeMode,
) -> Vec<PanelView<'_>> {
    match mode {
        RangeMode::PerSeries => data
            .panels
            .iter()
            .map(|panel| PanelView {
                panel,
                range: panel.series().and_then(|s| range::resolve(s, selection)),
            })
            .collect(),
        RangeMode::Master => {
            let all: Vec<&Series> = data.panels.iter().filter_map(Panel::series).collect();
            let window = range::resolve_master(&all, selection);
            data.panels
                .iter()
                .map(|panel| PanelView {
                    panel,
                    range: match (panel.series(), window) {
                        (Some(series), Some(window)) => Some(ResolvedRange {
                            window,
                            y_bounds: range::y_bounds_in(series, &window),
                        }),
                        _ => None,
                    },
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fetched(name: &str, rows: &[(NaiveDate, Option<f64>)]) -> Panel {
        Panel {
            descriptor: SeriesDescriptor::new(name, name.to_uppercase()),
            outcome: FetchOutcome::Fetched(Series::new(
                rows.iter().map(|&(d, v)| Observation::new(d, v)).collect(),
            )),
        }
    }

    fn sample_data() -> DashboardData {
        DashboardData {
            panels: vec![
                fetched("alpha", &[(date(2020, 1, 1), Some(1.0)), (date(2020, 3, 1), Some(2.0))]),
                Panel {
                    descriptor: SeriesDescriptor::new("broken", "BROKEN"),
                    outcome: FetchOutcome::Failed("connection refused".to_string()),
                },
                fetched("gamma", &[(date(2020, 2, 1), Some(50.0)), (date(2020, 4, 1), Some(60.0))]),
                fetched("hollow", &[]),
            ],
        }
    }

    #[test]
    fn one_failure_does_not_block_other_panels() {
        let data = sample_data();
        let views = resolve_views(&data, RangeSelection::AllTime, RangeMode::PerSeries);
        assert_eq!(views.len(), 4);

        assert!(views[0].range.is_some());
        assert!(views[1].range.is_none());
        assert!(views[1].panel.failure().is_some());
        assert!(views[2].range.is_some());

        // Empty provider response reads as "could not fetch" too.
        assert!(views[3].range.is_none());
        assert_eq!(
            views[3].panel.failure().as_deref(),
            Some("provider returned no observations")
        );
    }

    #[test]
    fn per_series_windows_are_independent() {
        let data = sample_data();
        let views = resolve_views(&data, RangeSelection::AllTime, RangeMode::PerSeries);
        let a = views[0].range.unwrap().window;
        let g = views[2].range.unwrap().window;
        assert_eq!(a.end, date(2020, 3, 1));
        assert_eq!(g.end, date(2020, 4, 1));
    }

    #[test]
    fn master_mode_shares_one_window_with_per_series_bounds() {
        let data = sample_data();
        let views = resolve_views(&data, RangeSelection::AllTime, RangeMode::Master);

        let a = views[0].range.unwrap();
        let g = views[2].range.unwrap();
        // Shared window spans the union of all fetched series.
        assert_eq!(a.window.start, date(2020, 1, 1));
        assert_eq!(a.window.end, date(2020, 4, 1));
        assert_eq!(a.window, g.window);

        // Bounds stay per series.
        assert!((a.y_bounds.unwrap().max - 2.2).abs() < 1e-12);
        assert!((g.y_bounds.unwrap().max - 66.0).abs() < 1e-12);

        // Failed and empty panels carry no range even in master mode.
        assert!(views[1].range.is_none());
        assert!(views[3].range.is_none());
    }
}
