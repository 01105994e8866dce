// src/analytics.rs
//! Analytics fetcher: visitors per event name over a lookback window.
//!
//! Talks to a Plausible-compatible API, either the v1 breakdown endpoint
//! (`GET`, query string) or the v2 query endpoint (`POST`, JSON body).
//! Returns the rows unfiltered and in response order; placeholder handling
//! and joining happen in `rank`.

use chrono::{Duration, NaiveDate};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::config::{ApiFlavor, Config};
use crate::core::net;
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyticsEntry {
    /// As reported upstream; empty when the row carried no name.
    pub name: String,
    pub visitors: u64,
}

impl AnalyticsEntry {
    pub fn new(name: impl Into<String>, visitors: u64) -> Self {
        Self { name: name.into(), visitors }
    }
}

/// Anything that can report visitors per event name for the window ending `today`.
pub trait AnalyticsSource {
    fn fetch(&self, today: NaiveDate) -> Result<Vec<AnalyticsEntry>>;
}

/// Canned results; used for offline runs and tests.
#[derive(Clone, Debug, Default)]
pub struct FixedSource(pub Vec<AnalyticsEntry>);

impl AnalyticsSource for FixedSource {
    fn fetch(&self, _today: NaiveDate) -> Result<Vec<AnalyticsEntry>> {
        Ok(self.0.clone())
    }
}

/// Inclusive date range `[today - days, today]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl QueryWindow {
    pub fn ending(today: NaiveDate, days: u32) -> Self {
        let start = today
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    fn start_iso(&self) -> String { self.start.format("%Y-%m-%d").to_string() }
    fn end_iso(&self) -> String { self.end.format("%Y-%m-%d").to_string() }
}

pub struct Plausible {
    client: Client,
    endpoint: String,
    api_key: String,
    site_id: String,
    api: ApiFlavor,
    property: String,
    window_days: u32,
}

impl Plausible {
    pub fn new(cfg: &Config) -> Result<Self> {
        Ok(Self::with_client(cfg, net::client(cfg.timeout)?))
    }

    pub fn with_client(cfg: &Config, client: Client) -> Self {
        Self {
            client,
            endpoint: cfg.endpoint(),
            api_key: cfg.api_key.clone(),
            site_id: cfg.site_id.clone(),
            api: cfg.api,
            property: cfg.property.clone(),
            window_days: cfg.window_days,
        }
    }

    /// Query string for `GET /api/v1/stats/breakdown`.
    pub fn breakdown_params(&self, window: &QueryWindow) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("site_id", self.site_id.clone()),
            ("metrics", s!("visitors")),
            ("property", self.property.clone()),
            ("period", s!("custom")),
            ("date", format!("{},{}", window.start_iso(), window.end_iso())),
        ];
        if self.property.starts_with("event:props:") {
            params.push(("filters", format!("{}!=null", self.property)));
        }
        params
    }

    /// JSON body for `POST /api/v2/query`.
    pub fn query_body(&self, window: &QueryWindow) -> Value {
        json!({
            "site_id": self.site_id,
            "metrics": ["visitors"],
            "date_range": [window.start_iso(), window.end_iso()],
            "dimensions": [self.property],
        })
    }
}

impl AnalyticsSource for Plausible {
    fn fetch(&self, today: NaiveDate) -> Result<Vec<AnalyticsEntry>> {
        let window = QueryWindow::ending(today, self.window_days);
        let entries = match self.api {
            ApiFlavor::Breakdown => {
                let body = net::get_json(
                    &self.client,
                    &self.endpoint,
                    &self.api_key,
                    &self.breakdown_params(&window),
                )?;
                parse_breakdown(body, &self.property)?
            }
            ApiFlavor::Query => {
                let body = net::post_json(
                    &self.client,
                    &self.endpoint,
                    &self.api_key,
                    &self.query_body(&window),
                )?;
                parse_query(body)?
            }
        };
        logf!("Analytics: {} entries for {}..{}", entries.len(), window.start, window.end);
        Ok(entries)
    }
}

#[derive(Deserialize)]
struct BreakdownResponse {
    results: Vec<Map<String, Value>>,
}

#[derive(Deserialize)]
struct QueryResponse {
    results: Vec<QueryRow>,
}

#[derive(Deserialize)]
struct QueryRow {
    #[serde(default)]
    dimensions: Vec<Value>,
    #[serde(default)]
    metrics: Vec<Value>,
}

/// v1 breakdown rows are keyed by the property's last segment
/// (`event:props:name` → `name`, `event:props:event` → `event`).
pub fn parse_breakdown(body: Value, property: &str) -> Result<Vec<AnalyticsEntry>> {
    let resp: BreakdownResponse = serde_json::from_value(body)
        .map_err(|e| Error::Upstream(format!("unexpected breakdown response: {e}")))?;

    let short = property.rsplit(':').next().unwrap_or(property);
    let keys = [short, "name", "event"];

    Ok(resp
        .results
        .iter()
        .map(|row| {
            let name = keys.iter().find_map(|k| row.get(*k)).map(text_of).unwrap_or_default();
            let visitors = row.get("visitors").map(count_of).unwrap_or(0);
            AnalyticsEntry { name, visitors }
        })
        .collect())
}

/// v2 query rows: `{"dimensions": [name], "metrics": [visitors]}`.
pub fn parse_query(body: Value) -> Result<Vec<AnalyticsEntry>> {
    let resp: QueryResponse = serde_json::from_value(body)
        .map_err(|e| Error::Upstream(format!("unexpected query response: {e}")))?;

    Ok(resp
        .results
        .iter()
        .map(|row| AnalyticsEntry {
            name: row.dimensions.first().map(text_of).unwrap_or_default(),
            visitors: row.metrics.first().map(count_of).unwrap_or(0),
        })
        .collect())
}

fn text_of(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => s!(),
        other => other.to_string(),
    }
}

fn count_of(v: &Value) -> u64 {
    v.as_u64()
        .or_else(|| v.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
        .unwrap_or(0)
}
