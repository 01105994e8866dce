// src/patch.rs
//! Splices a rendered fragment into the statistics page.
//!
//! Two document conventions exist and a page uses exactly one:
//! - **Markers**: the fragment lives between a start and an end comment.
//! - **Heading**: the fragment is the `Top N Raves` heading plus the info
//!   popup and table that follow it, and sits right before the `Top 10 Cities`
//!   heading. The old heading is found for any N, so changing the row count
//!   between runs still replaces it.
//!
//! Both are pure `&str -> String` transforms; reading and writing the file is
//! `file`'s job.

use std::path::Path;

use crate::config::PatchMode;
use crate::core::html::{element_follows, find_heading_ci, find_heading_where, skip_ws};
use crate::error::{Error, Result};

pub fn apply(doc: &str, fragment: &str, mode: &PatchMode, path: &Path) -> Result<String> {
    match mode {
        PatchMode::Markers { start, end } => between_markers(doc, start, end, fragment)
            .map_err(|msg| Error::document(path, msg)),
        PatchMode::Heading { title, anchor } => before_anchor(doc, title, anchor, fragment)
            .map_err(|msg| Error::document(path, msg)),
    }
}

/// Replace everything strictly between `start` and `end` with `\n{fragment}\n`.
pub fn between_markers(doc: &str, start: &str, end: &str, fragment: &str) -> Result<String, String> {
    let (Some(s), Some(e)) = (doc.find(start), doc.find(end)) else {
        return Err(format!("marker not found: {start} / {end}"));
    };
    let body_start = s + start.len();
    if e < body_start {
        return Err(format!("markers out of order: {end} precedes {start}"));
    }

    Ok(join!(&doc[..body_start], "\n", fragment, "\n", &doc[e..]))
}

/// Remove the old `Top N {title}` heading (and its popup/table), then insert
/// `{fragment}\n` right before the anchor heading.
pub fn before_anchor(doc: &str, title: &str, anchor: &str, fragment: &str) -> Result<String, String> {
    let mut out = s!(doc);

    if let Some((hs, he)) = find_heading_where(&out, 0, |text| is_top_n_heading(text, title)) {
        let mut end = he;
        if let Some((_, de)) = element_follows(&out, "div", end)
            .filter(|(ds, de)| out[*ds..*de].contains("info-popup"))
        {
            end = de;
        }
        if let Some((_, te)) = element_follows(&out, "table", end) {
            end = te;
        }
        end = skip_ws(&out, end);
        out.replace_range(hs..end, "");
    }

    let Some((anchor_at, _)) = find_heading_ci(&out, anchor, 0) else {
        return Err(format!("anchor heading containing {anchor:?} not found"));
    };
    out.insert_str(anchor_at, &join!(fragment, "\n"));
    Ok(out)
}

/// `Top 10 Raves`, `Top 5 Raves`, ... for any N.
fn is_top_n_heading(text: &str, title: &str) -> bool {
    text.match_indices("Top ").any(|(i, m)| {
        let rest = &text[i + m.len()..];
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        digits > 0 && rest[digits..].trim_start().starts_with(title)
    })
}
