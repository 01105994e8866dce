// src/csv.rs
use std::mem::take;
use std::path::Path;

/// Minimal CSV/TSV parser (quotes + CRLF tolerant). Blank lines are skipped.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !is_blank(&row) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush any trailing field/row even if quotes were unterminated.
    row.push(field);
    if !is_blank(&row) {
        rows.push(row);
    }

    rows
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

/// Pick the field separator: `.tsv` means tab, otherwise the most frequent of
/// `,` `;` `\t` outside quotes on the header line (ties go to `,`).
pub fn sniff_delimiter(path: &Path, text: &str) -> char {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if ext.eq_ignore_ascii_case("tsv") {
        return '\t';
    }

    let header = text.lines().next().unwrap_or("");
    let mut counts = [(',', 0usize), (';', 0), ('\t', 0)];
    let mut in_quotes = false;
    for ch in header.chars() {
        if ch == '"' { in_quotes = !in_quotes; continue; }
        if in_quotes { continue; }
        for (sep, n) in counts.iter_mut() {
            if ch == *sep { *n += 1; }
        }
    }

    let mut best = counts[0];
    for c in &counts[1..] {
        if c.1 > best.1 { best = *c; }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_embedded_separators_and_crlf() {
        let text = "Datum,Event\r\n20.10.2026,\"Rave, Part \"\"2\"\"\"\r\n\r\n21.10.2026,Plain\n";
        let rows = parse_rows(text, ',');
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["20.10.2026", "Rave, Part \"2\""]);
        assert_eq!(rows[2], vec!["21.10.2026", "Plain"]);
    }

    #[test]
    fn separator_only_lines_are_blank() {
        let rows = parse_rows("a;b\n;\n c ;d", ';');
        assert_eq!(rows, vec![vec!["a", "b"], vec![" c ", "d"]]);
    }

    #[test]
    fn sniffs_by_extension_then_header() {
        assert_eq!(sniff_delimiter(Path::new("e.tsv"), "a,b,c"), '\t');
        assert_eq!(sniff_delimiter(Path::new("e.csv"), "Datum;Event;Location\n1;2;3"), ';');
        assert_eq!(sniff_delimiter(Path::new("e.csv"), "Datum,Event"), ',');
        assert_eq!(sniff_delimiter(Path::new("e.txt"), "Datum\tEvent"), '\t');
        // separators inside quotes do not count
        assert_eq!(sniff_delimiter(Path::new("e.csv"), "\"a;b;c\",x"), ',');
        assert_eq!(sniff_delimiter(Path::new("e.csv"), ""), ',');
    }
}
