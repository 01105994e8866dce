// src/config/consts.rs

// Net config
pub const DEFAULT_BASE_URL: &str = "https://plausible.io";
pub const BREAKDOWN_PATH: &str = "/api/v1/stats/breakdown";
pub const QUERY_PATH: &str = "/api/v2/query";
pub const USER_AGENT: &str = concat!("top_raves/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const PREVIEW_CHARS: usize = 300;

// Env
pub const ENV_API_KEY: &str = "PLAUSIBLE_API_KEY";
pub const ENV_SITE_ID: &str = "PLAUSIBLE_SITE_ID";
pub const ENV_BASE_URL: &str = "PLAUSIBLE_BASE_URL";
pub const ENV_LOG_FILE: &str = "TOP_RAVES_LOG_FILE";

// Query
pub const DEFAULT_WINDOW_DAYS: u32 = 7;
pub const DEFAULT_PROPERTY: &str = "event:props:name";
pub const PLACEHOLDER_NAME: &str = "(none)";
pub const DEFAULT_TOP_N: usize = 10;

// Files
pub const DEFAULT_CATALOG: &str = "events.xlsx";
pub const DEFAULT_DOCUMENT: &str = "statistik.html";

// Catalog headers, first match wins
pub const DATE_COLUMNS: &[&str] = &["Datum", "Date", "date"];
pub const NAME_COLUMNS: &[&str] = &["Event", "Name", "event"];
pub const LOCATION_COLUMNS: &[&str] =
    &["Location", "Locations", "Venue", "Ort/Location", "Club", "Location(s)"];
pub const NO_LOCATION: &str = "-";

// Page
pub const START_MARK: &str = "<!-- AUTO:TOP10-RAVES:START -->";
pub const END_MARK: &str = "<!-- AUTO:TOP10-RAVES:END -->";
/// Matched as `Top <N> Raves` for any N
pub const TITLE_NEEDLE: &str = "Raves";
pub const ANCHOR_NEEDLE: &str = "Top 10 Cities";
pub const WEEKDAYS_DE: [&str; 7] = ["Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa.", "So."];
