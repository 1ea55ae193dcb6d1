//! Export fetched observations to CSV.
//!
//! One file per series, named after the series identifier. The export is
//! meant to be easy to consume in spreadsheets or downstream scripts; absent
//! values are written as empty fields so they stay distinguishable from zero.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app::pipeline::DashboardData;
use crate::domain::Series;
use crate::error::AppError;

/// Write one CSV per fetched series under `dir`; returns the written paths.
///
/// Failed and empty panels are skipped (the caller reports them separately).
pub fn write_series_csvs(dir: &Path, data: &DashboardData) -> Result<Vec<PathBuf>, AppError> {
    create_dir_all(dir).map_err(|e| {
        AppError::runtime(format!("Failed to create export dir '{}': {e}", dir.display()))
    })?;

    let mut written = Vec::new();
    for panel in &data.panels {
        let Some(series) = panel.series() else {
            continue;
        };
        let path = dir.join(format!("{}.csv", panel.descriptor.series_id));
        write_series_csv(&path, &panel.descriptor.name, series)?;
        written.push(path);
    }
    Ok(written)
}

fn write_series_csv(path: &Path, name: &str, series: &Series) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::runtime(format!("Failed to create CSV '{}': {e}", path.display())))?;

    writeln!(file, "# {name}")
        .map_err(|e| AppError::runtime(format!("Failed to write CSV header: {e}")))?;
    writeln!(file, "date,value")
        .map_err(|e| AppError::runtime(format!("Failed to write CSV header: {e}")))?;

    for obs in &series.observations {
        let value = obs.value.map(|v| format!("{v:.10}")).unwrap_or_default();
        writeln!(file, "{},{}", obs.date, value)
            .map_err(|e| AppError::runtime(format!("Failed to write CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::{FetchOutcome, Panel};
    use crate::domain::{Observation, SeriesDescriptor};
    use chrono::NaiveDate;

    #[test]
    fn export_skips_failures_and_keeps_absent_fields_empty() {
        let dir = std::env::temp_dir().join("edash-export-test");
        let data = DashboardData {
            panels: vec![
                Panel {
                    descriptor: SeriesDescriptor::new("Unemployment Rate", "UNRATE"),
                    outcome: FetchOutcome::Fetched(Series::new(vec![
                        Observation::new(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), Some(3.5)),
                        Observation::new(NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(), None),
                    ])),
                },
                Panel {
                    descriptor: SeriesDescriptor::new("Broken", "BROKEN"),
                    outcome: FetchOutcome::Failed("unreachable".to_string()),
                },
            ],
        };

        let written = write_series_csvs(&dir, &data).unwrap();
        assert_eq!(written.len(), 1);
        assert!(written[0].ends_with("UNRATE.csv"));

        let text = std::fs::read_to_string(&written[0]).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# Unemployment Rate");
        assert_eq!(lines[1], "date,value");
        assert!(lines[2].starts_with("2020-01-01,3.5"));
        assert_eq!(lines[3], "2020-01-02,");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
