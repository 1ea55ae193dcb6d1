//! Formatted terminal output for `edash fetch`.

use crate::app::pipeline::PanelView;
use crate::domain::{RangeMode, RangeSelection};

/// Format the per-indicator summary table.
///
/// Failed panels show "could not fetch" in place of their figures; the caller
/// prints the detailed reasons separately on stderr.
pub fn format_dashboard(
    views: &[PanelView<'_>],
    selection: RangeSelection,
    mode: RangeMode,
) -> String {
    let mut out = String::new();

    out.push_str("=== edash - Economic Indicators (FRED) ===\n");
    out.push_str(&format!(
        "Range: {} | Mode: {}\n\n",
        selection.label(),
        match mode {
            RangeMode::PerSeries => "per-series",
            RangeMode::Master => "master",
        }
    ));

    out.push_str(&format!(
        "{:<32} {:<18} {:>6}  {:<12} {:>10}  {:<24} {:<20}\n",
        "Indicator", "Series", "Obs", "Last date", "Last", "Window", "Y bounds"
    ));

    for view in views {
        let d = &view.panel.descriptor;

        let Some(series) = view.panel.series() else {
            out.push_str(&format!(
                "{:<32} {:<18} {}\n",
                d.name, d.series_id, "could not fetch"
            ));
            continue;
        };

        let (last_date, last_value) = match series.latest_value() {
            Some((date, value)) => (date.to_string(), format!("{value:.2}")),
            None => ("-".to_string(), "-".to_string()),
        };

        let (window, bounds) = match view.range {
            Some(range) => (
                format!("{}..{}", range.window.start, range.window.end),
                match range.y_bounds {
                    Some(b) => format!("[{:.2}, {:.2}]", b.min, b.max),
                    None => "auto".to_string(),
                },
            ),
            None => ("-".to_string(), "-".to_string()),
        };

        out.push_str(&format!(
            "{:<32} {:<18} {:>6}  {:<12} {:>10}  {:<24} {:<20}\n",
            d.name,
            d.series_id,
            series.len(),
            last_date,
            last_value,
            window,
            bounds
        ));
    }

    out.push_str("\nData sourced from Federal Reserve Economic Data (FRED)\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::{DashboardData, FetchOutcome, Panel, resolve_views};
    use crate::domain::{Observation, Series, SeriesDescriptor};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn summary_reports_values_and_failures() {
        let data = DashboardData {
            panels: vec![
                Panel {
                    descriptor: SeriesDescriptor::new("Unemployment Rate", "UNRATE"),
                    outcome: FetchOutcome::Fetched(Series::new(vec![
                        Observation::new(date(2020, 1, 1), Some(3.5)),
                        Observation::new(date(2020, 2, 1), None),
                    ])),
                },
                Panel {
                    descriptor: SeriesDescriptor::new("ISM Manufacturing PMI", "NAPM"),
                    outcome: FetchOutcome::Fetched(Series::empty()),
                },
            ],
        };
        let views = resolve_views(&data, RangeSelection::AllTime, RangeMode::PerSeries);
        let text = format_dashboard(&views, RangeSelection::AllTime, RangeMode::PerSeries);

        assert!(text.contains("Unemployment Rate"));
        assert!(text.contains("2020-01-01..2020-02-01"));
        // Latest numeric value, skipping the absent tail row.
        assert!(text.contains("3.50"));
        assert!(text.contains("could not fetch"));
        assert!(text.contains("Range: all | Mode: per-series"));
    }
}
