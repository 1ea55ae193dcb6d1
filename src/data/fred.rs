//! FRED observations API client.
//!
//! One blocking HTTP GET per series, no caching, no retry. The fetch policy
//! degrades gracefully: a response without an `observations` field (bad key,
//! unknown id, rate limiting) yields an empty `Series` so one bad indicator
//! never aborts the batch. Transport faults surface as `AppError` and are
//! caught per series by the pipeline.

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{Observation, Series};
use crate::error::AppError;

const BASE_URL: &str = "https://api.stlouisfed.org/fred/series/observations";

pub struct FredClient {
    client: Client,
    api_key: String,
}

impl FredClient {
    /// Read `FRED_API_KEY` from the environment (or a `.env` file) once.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("FRED_API_KEY")
            .map_err(|_| AppError::config("Missing FRED_API_KEY in environment (.env)."))?;
        Ok(Self {
            client: Client::new(),
            api_key,
        })
    }

    /// Fetch the full observation history for one series.
    ///
    /// Exactly one outbound request per invocation. A non-2xx status or a body
    /// without `observations` returns an empty series; only transport faults
    /// and undecodable bodies become errors.
    pub fn fetch_series(&self, series_id: &str) -> Result<Series, AppError> {
        let resp = self
            .client
            .get(BASE_URL)
            .query(&[
                ("series_id", series_id),
                ("api_key", &self.api_key),
                ("file_type", "json"),
            ])
            .send()
            .map_err(|e| AppError::runtime(format!("FRED request for {series_id} failed: {e}")))?;

        // FRED answers 400 with an error_message body for unknown ids and bad
        // keys. Per-series degrade: empty series, not a fault.
        if !resp.status().is_success() {
            return Ok(Series::empty());
        }

        let body = resp
            .text()
            .map_err(|e| AppError::runtime(format!("Failed to read FRED response for {series_id}: {e}")))?;

        parse_observations(&body)
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    #[serde(default)]
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

/// Decode a FRED observations body into a normalized series.
///
/// Order is preserved exactly as returned. Rows whose value is the provider's
/// missing-data sentinel (`"."`) or otherwise unparseable are kept with
/// `value = None`, never dropped and never coerced to zero.
pub fn parse_observations(body: &str) -> Result<Series, AppError> {
    let resp: ObservationsResponse = serde_json::from_str(body)
        .map_err(|e| AppError::runtime(format!("Failed to parse FRED response: {e}")))?;

    let mut observations = Vec::with_capacity(resp.observations.len());
    for raw in resp.observations {
        let date = chrono::NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d")
            .map_err(|e| AppError::runtime(format!("Invalid FRED date '{}': {e}", raw.date)))?;
        observations.push(Observation::new(date, parse_value(&raw.value)));
    }

    Ok(Series::new(observations))
}

fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
