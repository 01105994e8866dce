// src/core/html.rs
// Tolerant, case-insensitive tag scanning. No DOM; nesting of the same tag is not tracked.

/// ASCII-only lowercase. Keeps byte offsets identical to the input.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Block bounds of the next `<tag ...>...</tag>` at or after `from`. The opener must be
/// followed by `>`, `/` or whitespace, so `<h2` never matches `<h20` and `<table` never matches `<tablex`.
pub fn next_element_ci(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let open = join!("<", &to_lower(tag));
    let close = join!("</", &to_lower(tag), ">");

    let mut pos = from;
    loop {
        let start = lc.get(pos..)?.find(&open)? + pos;
        let after = start + open.len();
        let boundary = lc[after..].chars().next();
        if matches!(boundary, Some(c) if c == '>' || c == '/' || c.is_ascii_whitespace()) {
            let open_end = s[start..].find('>')? + start + 1;
            let end_rel = lc[open_end..].find(&close)?;
            return Some((start, open_end + end_rel + close.len()));
        }
        pos = after;
    }
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

/// Visible text of an element block, entities and whitespace normalized.
pub fn visible_text(block: &str) -> String {
    strip_tags(super::sanitize::normalize_entities(&inner_after_open_tag(block)))
}

/// First `<h1>`..`<h6>` at or after `from` whose visible text contains `needle`.
pub fn find_heading_ci(s: &str, needle: &str, from: usize) -> Option<(usize, usize)> {
    find_heading_where(s, from, |text| text.contains(needle))
}

/// First `<h1>`..`<h6>` at or after `from` whose visible text satisfies `pred`.
pub fn find_heading_where<F: Fn(&str) -> bool>(s: &str, from: usize, pred: F) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;

    for level in 1..=6 {
        let tag = format!("h{level}");
        let mut pos = from;
        while let Some((hs, he)) = next_element_ci(s, &tag, pos) {
            if pred(&visible_text(&s[hs..he])) {
                if best.is_none_or(|(bs, _)| hs < bs) {
                    best = Some((hs, he));
                }
                break;
            }
            pos = he;
        }
    }
    best
}

/// If the next non-whitespace content after `from` is a `<tag ...>` element,
/// return its block bounds.
pub fn element_follows(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let at = skip_ws(s, from);
    match next_element_ci(s, tag, at) {
        Some((start, end)) if start == at => Some((start, end)),
        _ => None,
    }
}

/// Offset of the first non-whitespace byte at or after `from`.
pub fn skip_ws(s: &str, from: usize) -> usize {
    match s.get(from..) {
        Some(rest) => from + (rest.len() - rest.trim_start().len()),
        None => s.len(),
    }
}

/// Escape text for use inside element content or a quoted attribute.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
