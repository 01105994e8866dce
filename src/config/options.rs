// src/config/options.rs
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::consts::*;
use crate::error::{Error, Result};

/// Which analytics endpoint shape to talk to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ApiFlavor {
    /// `GET /api/v1/stats/breakdown`
    #[default]
    Breakdown,
    /// `POST /api/v2/query`
    Query,
}

impl FromStr for ApiFlavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakdown" | "v1" => Ok(ApiFlavor::Breakdown),
            "query" | "v2" => Ok(ApiFlavor::Query),
            other => Err(format!("Unknown API flavor: {other} (expected breakdown|query)")),
        }
    }
}

/// How the replaceable section is located inside the target document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatchMode {
    Markers { start: String, end: String },
    Heading { title: String, anchor: String },
}

impl Default for PatchMode {
    fn default() -> Self {
        PatchMode::Markers { start: s!(START_MARK), end: s!(END_MARK) }
    }
}

impl PatchMode {
    pub fn heading() -> Self {
        PatchMode::Heading { title: s!(TITLE_NEEDLE), anchor: s!(ANCHOR_NEEDLE) }
    }
}

impl FromStr for PatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markers" | "marker" => Ok(PatchMode::default()),
            "heading" => Ok(PatchMode::heading()),
            other => Err(format!("Unknown patch mode: {other} (expected markers|heading)")),
        }
    }
}

/// Everything one run needs. Built once at startup, then passed down.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub site_id: String,
    pub base_url: String,
    pub api: ApiFlavor,
    pub window_days: u32,
    pub property: String,
    pub catalog_path: PathBuf,
    pub document_path: PathBuf,
    pub patch_mode: PatchMode,
    pub top_n: usize,
    pub timeout: Duration,
    pub dry_run: bool,
}

impl Config {
    pub fn new(api_key: impl Into<String>, site_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            site_id: site_id.into(),
            base_url: s!(DEFAULT_BASE_URL),
            api: ApiFlavor::default(),
            window_days: DEFAULT_WINDOW_DAYS,
            property: s!(DEFAULT_PROPERTY),
            catalog_path: PathBuf::from(DEFAULT_CATALOG),
            document_path: PathBuf::from(DEFAULT_DOCUMENT),
            patch_mode: PatchMode::default(),
            top_n: DEFAULT_TOP_N,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            dry_run: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() || self.site_id.trim().is_empty() {
            return Err(Error::Config(format!("{ENV_API_KEY} / {ENV_SITE_ID} not set")));
        }
        if self.window_days == 0 {
            return Err(Error::Config(s!("lookback window must be at least one day")));
        }
        if self.top_n == 0 {
            return Err(Error::Config(s!("top N must be at least 1")));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config(s!("request timeout must be greater than zero")));
        }
        if self.property.trim().is_empty() {
            return Err(Error::Config(s!("breakdown property is empty")));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::Config(format!("base URL must be http(s): {}", self.base_url)));
        }
        Ok(())
    }

    /// Endpoint URL for the configured flavor, without a trailing slash doubling.
    pub fn endpoint(&self) -> String {
        let path = match self.api {
            ApiFlavor::Breakdown => BREAKDOWN_PATH,
            ApiFlavor::Query => QUERY_PATH,
        };
        join!(self.base_url.trim_end_matches('/'), path)
    }

    /// Human-readable file name of the target document, for status lines.
    pub fn document_name(&self) -> String {
        self.document_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.document_path.display().to_string())
    }
}
