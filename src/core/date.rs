// src/core/date.rs
// Day-first date parsing for catalog cells, plus the DD.MM / weekday labels.

use chrono::{Datelike, Duration, NaiveDate};

use crate::config::consts::WEEKDAYS_DE;

/// Parse a catalog date cell. Day-first unless the first component has four digits.
///
/// Accepts `20.10.2026`, `20/10/26`, `20-10-2026`, `2026-10-20`,
/// any of those followed by a time (`20.10.2026 22:00`, `2026-10-20T22:00:00`),
/// and spreadsheet serial numbers (`46315`, `46315.9`).
pub fn parse_day_first(raw: &str) -> Option<NaiveDate> {
    let cell = raw.trim();
    if cell.is_empty() {
        return None;
    }

    if let Some(d) = parse_serial(cell) {
        return Some(d);
    }

    // Drop a time-of-day suffix
    let date_part = cell
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or(cell);

    let parts: Vec<&str> = date_part
        .split(|c: char| c == '.' || c == '/' || c == '-')
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 || parts.iter().any(|p| !p.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }

    let (y, m, d) = if parts[0].len() == 4 {
        (parts[0], parts[1], parts[2])
    } else {
        (parts[2], parts[1], parts[0])
    };

    let mut year: i32 = y.parse().ok()?;
    match y.len() {
        2 => year += 2000,
        4 => {}
        _ => return None,
    }
    NaiveDate::from_ymd_opt(year, m.parse().ok()?, d.parse().ok()?)
}

/// Spreadsheet day serials, epoch 1899-12-30. Only plausible modern range.
fn parse_serial(cell: &str) -> Option<NaiveDate> {
    let whole = cell.split('.').next()?;
    if whole.len() != 5 || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Some(frac) = cell.split('.').nth(1) {
        if !frac.bytes().all(|b| b.is_ascii_digit()) || cell.matches('.').count() > 1 {
            return None;
        }
    }
    let days: i64 = whole.parse().ok()?;
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_signed(Duration::days(days))
}

/// `Mo.` .. `So.`
pub fn weekday_short(date: NaiveDate) -> &'static str {
    WEEKDAYS_DE[date.weekday().num_days_from_monday() as usize]
}

/// `DD.MM`
pub fn day_month(date: NaiveDate) -> String {
    date.format("%d.%m").to_string()
}
