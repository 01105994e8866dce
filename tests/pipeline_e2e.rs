// tests/pipeline_e2e.rs
//
// Full runs against a fixed analytics source and throwaway files.
//
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};
use pretty_assertions::assert_eq;

use top_raves::analytics::{AnalyticsEntry, FixedSource};
use top_raves::config::{Config, PatchMode};
use top_raves::file::PatchOutcome;
use top_raves::progress::{NullProgress, Progress, Stage};
use top_raves::runner::run_with;
use top_raves::Error;

const START: &str = "<!-- AUTO:TOP10-RAVES:START -->";
const END: &str = "<!-- AUTO:TOP10-RAVES:END -->";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn dmy(offset: i64) -> String {
    (today() + Duration::days(offset)).format("%d.%m.%Y").to_string()
}

struct Site {
    _dir: tempfile::TempDir,
    catalog: PathBuf,
    document: PathBuf,
}

fn site(catalog_csv: &str, page: &str) -> Site {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("events.csv");
    let document = dir.path().join("statistik.html");
    fs::write(&catalog, catalog_csv).unwrap();
    fs::write(&document, page).unwrap();
    Site { _dir: dir, catalog, document }
}

fn config(site: &Site) -> Config {
    let mut cfg = Config::new("key", "ravebro.de");
    cfg.catalog_path = site.catalog.clone();
    cfg.document_path = site.document.clone();
    cfg
}

fn marker_page() -> String {
    format!("<html><body>\n<h1>Statistik</h1>\n{START}\n{END}\n<footer></footer>\n</body></html>\n")
}

fn read(p: &Path) -> String {
    fs::read_to_string(p).unwrap()
}

#[test]
fn techno_night_example_end_to_end() {
    let csv = format!("Datum,Event,Location\n{},Techno Night,Club X\n", dmy(1));
    let site = site(&csv, &marker_page());
    let source = FixedSource(vec![
        AnalyticsEntry::new("techno night", 42),
        AnalyticsEntry::new("(none)", 99),
    ]);

    let summary = run_with(&config(&site), &source, today(), Some(&mut NullProgress)).unwrap();
    assert_eq!(summary.outcome, PatchOutcome::Written);
    assert_eq!(summary.ranked.len(), 1);

    let page = read(&site.document);
    assert!(page.contains(
        "<tr><td>1.</td><td class='date-cell'>20.10<br><span>Di.</span></td><td>techno night</td><td>Club X</td></tr>"
    ));
    assert!(!page.contains("(none)"));
    assert!(page.starts_with("<html><body>\n<h1>Statistik</h1>\n"));
    assert!(page.ends_with(&format!("</table>\n{END}\n<footer></footer>\n</body></html>\n")));
}

#[test]
fn second_run_is_byte_identical_and_skips_write() {
    let csv = format!(
        "Datum;Event;Location\n{};Warehouse;Halle 5\n{};Bass Dive;\n",
        dmy(0),
        dmy(3)
    );
    let site = site(&csv, &marker_page());
    let source = FixedSource(vec![
        AnalyticsEntry::new("Bass Dive", 10),
        AnalyticsEntry::new("Warehouse", 30),
    ]);
    let cfg = config(&site);

    let first = run_with(&cfg, &source, today(), None).unwrap();
    assert_eq!(first.outcome, PatchOutcome::Written);
    let after_first = read(&site.document);

    let second = run_with(&cfg, &source, today(), None).unwrap();
    assert_eq!(second.outcome, PatchOutcome::Unchanged);
    assert_eq!(read(&site.document), after_first);

    // Warehouse (today, 30) ranks above Bass Dive (10); blank location renders "-"
    let names: Vec<&str> = first.ranked.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Warehouse", "Bass Dive"]);
    assert!(after_first.contains("<td>Bass Dive</td><td>-</td>"));
}

#[test]
fn no_catalog_match_renders_empty_body_with_heading() {
    let csv = format!("Datum,Event\n{},Something Else\n", dmy(2));
    let site = site(&csv, &marker_page());
    let source = FixedSource(vec![AnalyticsEntry::new("Unknown Party", 500)]);

    let summary = run_with(&config(&site), &source, today(), None).unwrap();
    assert!(summary.ranked.is_empty());

    let page = read(&site.document);
    assert!(page.contains("Top 10 Raves"));
    assert!(page.contains("<tbody>\n  </tbody>"));
}

#[test]
fn dry_run_reports_without_writing() {
    let csv = format!("Datum,Event\n{},A\n", dmy(1));
    let site = site(&csv, &marker_page());
    let mut cfg = config(&site);
    cfg.dry_run = true;

    let summary = run_with(&cfg, &FixedSource(vec![AnalyticsEntry::new("a", 1)]), today(), None).unwrap();
    assert_eq!(summary.outcome, PatchOutcome::DryRun { changed: true });
    assert_eq!(read(&site.document), marker_page());
}

#[test]
fn heading_mode_page_round_trips() {
    let page = "<body>\n<h2>Top 10 Cities</h2>\n<table><tr><td>Berlin</td></tr></table>\n</body>\n";
    let csv = format!("Date,Name,Venue\n{},Open Air,Park\n", dmy(5));
    let site = site(&csv, page);
    let mut cfg = config(&site);
    cfg.patch_mode = PatchMode::heading();
    let source = FixedSource(vec![AnalyticsEntry::new("Open Air", 3)]);

    assert_eq!(run_with(&cfg, &source, today(), None).unwrap().outcome, PatchOutcome::Written);
    let first = read(&site.document);
    assert!(first.find("Top 10 Raves").unwrap() < first.find("Top 10 Cities").unwrap());
    assert!(first.contains("<td>Berlin</td>"));

    assert_eq!(run_with(&cfg, &source, today(), None).unwrap().outcome, PatchOutcome::Unchanged);
    assert_eq!(read(&site.document), first);
}

#[test]
fn heading_mode_changing_top_n_replaces_the_old_section() {
    let page = "<body>\n<h2>Top 10 Cities</h2>\n</body>\n";
    let csv = format!("Datum,Event\n{},A\n{},B\n", dmy(1), dmy(2));
    let site = site(&csv, page);
    let source = FixedSource(vec![AnalyticsEntry::new("A", 9), AnalyticsEntry::new("B", 4)]);
    let mut cfg = config(&site);
    cfg.patch_mode = PatchMode::heading();

    run_with(&cfg, &source, today(), None).unwrap();
    cfg.top_n = 1;
    run_with(&cfg, &source, today(), None).unwrap();

    let out = read(&site.document);
    assert_eq!(out.matches("<table>").count(), 1);
    assert_eq!(out.matches("id=\"info-popup\"").count(), 1);
    assert!(!out.contains("Top 10 Raves"));
    assert_eq!(out.matches("Top 1 Raves").count(), 2); // heading + popup text
    assert!(out.contains("<td>A</td>"));
    assert!(!out.contains("<td>B</td>"));
}

#[test]
fn workbook_catalog_end_to_end() {
    let site = site("", &marker_page());
    let xlsx = site.catalog.with_extension("xlsx");
    let mut book = rust_xlsxwriter::Workbook::new();
    let sheet = book.add_worksheet();
    sheet.write_string(0, 0, "Datum").unwrap();
    sheet.write_string(0, 1, "Event").unwrap();
    sheet.write_string(0, 2, "Location").unwrap();
    // 46315 = 2026-10-20 as a spreadsheet day serial
    sheet.write_number(1, 0, 46315.0).unwrap();
    sheet.write_string(1, 1, "Techno Night").unwrap();
    sheet.write_string(1, 2, "Club X").unwrap();
    book.save(&xlsx).unwrap();

    let mut cfg = config(&site);
    cfg.catalog_path = xlsx;
    let source = FixedSource(vec![AnalyticsEntry::new("techno night", 42)]);

    let summary = run_with(&cfg, &source, today(), None).unwrap();
    assert_eq!(summary.catalog_events, 1);
    assert!(read(&site.document).contains(
        "<tr><td>1.</td><td class='date-cell'>20.10<br><span>Di.</span></td><td>techno night</td><td>Club X</td></tr>"
    ));
}

#[test]
fn missing_markers_abort_without_touching_the_page() {
    let csv = format!("Datum,Event\n{},A\n", dmy(1));
    let site = site(&csv, "<html>no markers here</html>");

    let err = run_with(&config(&site), &FixedSource::default(), today(), None).unwrap_err();
    assert!(matches!(err, Error::Document { .. }));
    assert_eq!(err.exit_code(), 5);
    assert_eq!(read(&site.document), "<html>no markers here</html>");
}

#[test]
fn catalog_without_required_columns_aborts() {
    let site = site("When,What\n01.01.2027,X\n", &marker_page());
    let err = run_with(&config(&site), &FixedSource::default(), today(), None).unwrap_err();
    assert!(matches!(err, Error::Schema { .. }));
    assert_eq!(read(&site.document), marker_page());
}

#[derive(Default)]
struct Recorder {
    total: usize,
    stages: Vec<Stage>,
    outcome: Option<PatchOutcome>,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn stage_done(&mut self, stage: Stage, _detail: &str) { self.stages.push(stage); }
    fn finish(&mut self, outcome: PatchOutcome) { self.outcome = Some(outcome); }
}

#[test]
fn progress_sees_every_stage_in_order() {
    let csv = format!("Datum,Event\n{},A\n", dmy(1));
    let site = site(&csv, &marker_page());
    let mut rec = Recorder::default();

    run_with(&config(&site), &FixedSource::default(), today(), Some(&mut rec)).unwrap();
    assert_eq!(rec.total, 5);
    assert_eq!(rec.stages, Stage::ALL.to_vec());
    assert_eq!(rec.outcome, Some(PatchOutcome::Written));
}
