// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Join key for event names: trimmed, lower-cased. Idempotent.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase().trim().to_string()
}

/// Drop a leading UTF-8 byte-order mark (spreadsheet exports love these).
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix('\u{feff}').unwrap_or(s)
}
