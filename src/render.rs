// src/render.rs
use crate::core::date::day_month;
use crate::core::html::escape_text;
use crate::rank::RankedRow;

/// `<tr><td>1.</td><td class='date-cell'>20.10<br><span>Di.</span></td><td>Name</td><td>Location</td></tr>`
pub fn table_row(row: &RankedRow) -> String {
    format!(
        "<tr><td>{}.</td><td class='date-cell'>{}<br><span>{}</span></td><td>{}</td><td>{}</td></tr>",
        row.position,
        day_month(row.date),
        row.weekday,
        escape_text(&row.name),
        escape_text(&row.location),
    )
}

/// Heading, info popup and table. No leading/trailing newline.
pub fn render_fragment(rows: &[RankedRow], top_n: usize) -> String {
    let mut body = s!();
    for row in rows {
        body.push_str("    ");
        body.push_str(&table_row(row));
        body.push('\n');
    }

    format!(
        r#"<h2 style="text-align:center; font-weight:bold;">
  Top {top_n} Raves
  <span class="info-container" onclick="toggleInfoPopup(event)" style="cursor:pointer; margin-left:8px;">
    <span class="info-icon">i</span>
  </span>
</h2>
<div id="info-popup" class="info-popup" style="display:none; margin-bottom:15px; font-size:13px; color:#333; background:#f9f9f9; padding:10px; border:1px solid #ccc; border-radius:6px;">
  Die Top {top_n} Raves werden durch unsere Besucher und ihre Klicks auf ravebro.de bestimmt. Die Liste wird zweimal täglich aktualisiert (7 &amp; 19 Uhr).
</div>
<table>
  <thead><tr><th>Platz</th><th>Datum</th><th>Event</th><th>Location</th></tr></thead>
  <tbody>
{body}  </tbody>
</table>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::date::weekday_short;
    use chrono::NaiveDate;

    fn row(position: usize, name: &str, location: &str) -> RankedRow {
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        RankedRow {
            position,
            date,
            weekday: weekday_short(date),
            name: s!(name),
            location: s!(location),
            visitors: 1,
        }
    }

    #[test]
    fn row_markup() {
        assert_eq!(
            table_row(&row(1, "Techno Night", "Club X")),
            "<tr><td>1.</td><td class='date-cell'>20.10<br><span>Di.</span></td><td>Techno Night</td><td>Club X</td></tr>"
        );
    }

    #[test]
    fn names_are_escaped() {
        let html = table_row(&row(2, "Drum & Bass <3", "-"));
        assert!(html.contains("<td>Drum &amp; Bass &lt;3</td><td>-</td>"));
    }

    #[test]
    fn empty_ranking_still_has_heading_and_empty_body() {
        let html = render_fragment(&[], 10);
        assert!(html.starts_with("<h2"));
        assert!(html.contains("Top 10 Raves"));
        assert!(html.contains("id=\"info-popup\""));
        assert!(html.contains("<tbody>\n  </tbody>"));
        assert!(!html.contains("<tr><td>"));
        assert!(html.ends_with("</table>"));
    }

    #[test]
    fn rows_are_indented_in_order() {
        let html = render_fragment(&[row(1, "A", "x"), row(2, "B", "y")], 10);
        let a = html.find("<td>A</td>").unwrap();
        let b = html.find("<td>B</td>").unwrap();
        assert!(a < b);
        assert!(html.contains("  <tbody>\n    <tr><td>1.</td>"));
        assert!(html.contains("</tr>\n  </tbody>"));
    }

    #[test]
    fn title_follows_top_n() {
        assert!(render_fragment(&[], 5).contains("Top 5 Raves"));
    }
}
