// src/catalog.rs
//! Event catalog: the spreadsheet of scheduled events. Read from the workbook
//! itself (first sheet) or from a CSV/TSV export.
//!
//! Loading keeps only upcoming events (`date >= today`) and groups them by the
//! normalized join key. Header names are matched against a list of known
//! spellings; a missing date or name column is fatal.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDate;

use crate::config::consts::{DATE_COLUMNS, LOCATION_COLUMNS, NAME_COLUMNS};
use crate::core::date::parse_day_first;
use crate::core::sanitize::{normalize_key, strip_bom};
use crate::csv::{parse_rows, sniff_delimiter};
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRecord {
    pub date: NaiveDate,
    pub name: String,
    pub location: Option<String>,
    pub key: String,
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    by_key: HashMap<String, Vec<EventRecord>>,
    len: usize,
}

impl Catalog {
    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// All records sharing `key`, date ascending (catalog order on equal dates).
    pub fn matches(&self, key: &str) -> &[EventRecord] {
        self.by_key.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Earliest record for `key` dated `today` or later.
    pub fn next_upcoming(&self, key: &str, today: NaiveDate) -> Option<&EventRecord> {
        self.matches(key).iter().find(|r| r.date >= today)
    }

    pub fn from_records(records: impl IntoIterator<Item = EventRecord>) -> Self {
        let mut by_key: HashMap<String, Vec<EventRecord>> = HashMap::new();
        let mut len = 0;
        for r in records {
            by_key.entry(r.key.clone()).or_default().push(r);
            len += 1;
        }
        for group in by_key.values_mut() {
            group.sort_by_key(|r| r.date); // stable
        }
        Self { by_key, len }
    }
}

const WORKBOOK_EXTS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

pub fn load(path: &Path, today: NaiveDate) -> Result<Catalog> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let rows = if WORKBOOK_EXTS.iter().any(|x| ext.eq_ignore_ascii_case(x)) {
        read_workbook(path)?
    } else {
        let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let text = strip_bom(&raw);
        parse_rows(text, sniff_delimiter(path, text))
    };

    let catalog = from_rows(&rows, today).map_err(|msg| Error::schema(path, msg))?;
    logf!("Catalog {}: {} rows, {} upcoming", path.display(), rows.len().saturating_sub(1), catalog.len());
    Ok(catalog)
}

/// First sheet of a workbook as text rows. Blank rows are skipped.
fn read_workbook(path: &Path) -> Result<Vec<Vec<String>>> {
    // calamine wraps I/O failures per format; surface a missing file as I/O first
    fs::metadata(path).map_err(|e| Error::io(path, e))?;
    let mut book = open_workbook_auto(path)
        .map_err(|e| Error::schema(path, format!("unreadable workbook: {e}")))?;

    let range = match book.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(e)) => return Err(Error::schema(path, format!("unreadable first sheet: {e}"))),
        None => return Err(Error::schema(path, "workbook has no sheets")),
    };

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|c| !c.trim().is_empty()))
        .collect())
}

/// Cell as the text `from_rows` expects. Date cells become day serials,
/// which `parse_day_first` understands.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => s!(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::Error(e) => {
            logd!("Catalog: cell error {e:?}");
            s!()
        }
    }
}

/// Build a catalog from parsed rows (first row = header).
/// Errors with a message when the date or name column cannot be found.
pub fn from_rows(rows: &[Vec<String>], today: NaiveDate) -> Result<Catalog, String> {
    let Some((header, body)) = rows.split_first() else {
        return Err(missing_columns_msg());
    };

    let col_date = pick(header, DATE_COLUMNS);
    let col_name = pick(header, NAME_COLUMNS);
    let col_loc = pick(header, LOCATION_COLUMNS);

    let (Some(col_date), Some(col_name)) = (col_date, col_name) else {
        return Err(missing_columns_msg());
    };

    let mut dropped = 0usize;
    let mut records = Vec::with_capacity(body.len());
    for row in body {
        let cell = |i: usize| row.get(i).map(|s| s.trim()).unwrap_or("");

        let name = cell(col_name);
        let Some(date) = parse_day_first(cell(col_date)) else {
            dropped += 1;
            continue;
        };
        if name.is_empty() {
            dropped += 1;
            continue;
        }
        if date < today {
            continue;
        }

        let location = col_loc
            .map(cell)
            .filter(|l| !l.is_empty())
            .map(str::to_string);

        records.push(EventRecord {
            date,
            name: s!(name),
            location,
            key: normalize_key(name),
        });
    }

    if dropped > 0 {
        logd!("Catalog: dropped {dropped} rows without a usable date or name");
    }
    Ok(Catalog::from_records(records))
}

fn pick(header: &[String], candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|c| header.iter().position(|h| strip_bom(h.trim()) == *c))
}

fn missing_columns_msg() -> String {
    format!(
        "columns {:?}/{:?} not found (header must name one of each)",
        DATE_COLUMNS, NAME_COLUMNS
    )
}
