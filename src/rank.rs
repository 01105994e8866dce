// src/rank.rs
use std::collections::HashSet;

use chrono::NaiveDate;

use crate::analytics::AnalyticsEntry;
use crate::catalog::Catalog;
use crate::config::consts::{NO_LOCATION, PLACEHOLDER_NAME};
use crate::core::date::weekday_short;
use crate::core::sanitize::normalize_key;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedRow {
    pub position: usize,
    pub date: NaiveDate,
    pub weekday: &'static str,
    pub name: String,
    pub location: String,
    pub visitors: u64,
}

/// Join analytics entries to upcoming catalog events and keep the `top_n` most visited.
///
/// Entries without an upcoming match are dropped *before* sorting, and the
/// first entry (in upstream order) wins when several names share a key.
pub fn rank(
    catalog: &Catalog,
    entries: &[AnalyticsEntry],
    today: NaiveDate,
    top_n: usize,
) -> Vec<RankedRow> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut upcoming: Vec<RankedRow> = Vec::new();
    let mut unmatched = 0usize;

    for e in entries {
        let name = e.name.trim();
        if name.is_empty() || name == PLACEHOLDER_NAME {
            continue;
        }

        let key = normalize_key(name);
        let Some(event) = catalog.next_upcoming(&key, today) else {
            unmatched += 1;
            continue;
        };

        if !seen.insert(key) {
            continue;
        }

        upcoming.push(RankedRow {
            position: 0,
            date: event.date,
            weekday: weekday_short(event.date),
            name: s!(name),
            location: event.location.clone().unwrap_or_else(|| s!(NO_LOCATION)),
            visitors: e.visitors,
        });
    }

    // stable: equal counts keep upstream order
    upcoming.sort_by(|a, b| b.visitors.cmp(&a.visitors));
    upcoming.truncate(top_n);
    for (i, row) in upcoming.iter_mut().enumerate() {
        row.position = i + 1;
    }

    logd!("Rank: {} entries, {} without upcoming match, {} ranked", entries.len(), unmatched, upcoming.len());
    upcoming
}
