// src/runner.rs
use chrono::{Local, NaiveDate};

use crate::{
    analytics::{AnalyticsSource, Plausible},
    catalog,
    config::Config,
    error::Result,
    file::{self, PatchOutcome},
    patch,
    progress::{Progress, Stage},
    rank::{self, RankedRow},
    render,
};

/// Summary of what one run produced.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub catalog_events: usize,
    pub analytics_entries: usize,
    pub ranked: Vec<RankedRow>,
    pub fragment: String,
    pub outcome: PatchOutcome,
}

/// Top-level runner: live analytics, local calendar date.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(config: &Config, progress: Option<&mut dyn Progress>) -> Result<RunSummary> {
    config.validate()?;
    let source = Plausible::new(config)?;
    run_with(config, &source, Local::now().date_naive(), progress)
}

/// catalog -> analytics -> rank -> render -> patch, with an explicit source and date.
pub fn run_with(
    config: &Config,
    source: &dyn AnalyticsSource,
    today: NaiveDate,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(Stage::ALL.len());
    }

    let catalog = catalog::load(&config.catalog_path, today)?;
    if catalog.is_empty() {
        logf!("Catalog has no upcoming events; the table will be empty");
    }
    report(&mut progress, Stage::Catalog, format!("{} upcoming events", catalog.len()));

    let entries = source.fetch(today)?;
    report(&mut progress, Stage::Analytics, format!("{} entries", entries.len()));

    let ranked = rank::rank(&catalog, &entries, today, config.top_n);
    report(&mut progress, Stage::Rank, format!("{} ranked", ranked.len()));

    let fragment = render::render_fragment(&ranked, config.top_n);
    report(&mut progress, Stage::Render, format!("{} bytes", fragment.len()));

    let path = &config.document_path;
    let current = file::read_document(path)?;
    let patched = patch::apply(&current, &fragment, &config.patch_mode, path)?;
    let outcome = file::write_if_changed(path, &current, &patched, config.dry_run)?;
    logf!("Patch {}: {:?}", path.display(), outcome);
    report(&mut progress, Stage::Patch, format!("{outcome:?}"));

    if let Some(p) = progress.as_deref_mut() {
        p.finish(outcome);
    }

    Ok(RunSummary {
        catalog_events: catalog.len(),
        analytics_entries: entries.len(),
        ranked,
        fragment,
        outcome,
    })
}

fn report(progress: &mut Option<&mut dyn Progress>, stage: Stage, detail: String) {
    logf!("Stage {}: {}", stage.label(), detail);
    if let Some(p) = progress.as_deref_mut() {
        p.stage_done(stage, &detail);
    }
}
