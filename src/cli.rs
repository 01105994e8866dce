// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::consts::*;
use crate::config::{ApiFlavor, Config, PatchMode};
use crate::error::{Error, Result};
use crate::file::PatchOutcome;
use crate::progress::{Progress, Stage};
use crate::runner::{self, RunSummary};

/// Rank upcoming events by analytics clicks and patch the Top 10 table into the statistics page.
#[derive(Parser, Debug, Clone)]
#[command(name = "top_raves", version, about)]
pub struct Args {
    /// Analytics API key (bearer token)
    #[arg(long, env = ENV_API_KEY, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Analytics site id, e.g. ravebro.de
    #[arg(long, env = ENV_SITE_ID)]
    pub site_id: Option<String>,

    /// Analytics base URL (self-hosted instances)
    #[arg(long, env = ENV_BASE_URL, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// breakdown (GET v1) | query (POST v2)
    #[arg(long, default_value = "breakdown")]
    pub api: ApiFlavor,

    /// Lookback window in days
    #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS)]
    pub days: u32,

    /// Breakdown property carrying the event name
    #[arg(long, default_value = DEFAULT_PROPERTY)]
    pub property: String,

    /// Event catalog (xlsx/xls/ods workbook, or a CSV/TSV export)
    #[arg(long, default_value = DEFAULT_CATALOG)]
    pub catalog: PathBuf,

    /// Page to patch
    #[arg(long, default_value = DEFAULT_DOCUMENT)]
    pub document: PathBuf,

    /// markers (comment delimiters) | heading (title/anchor headings)
    #[arg(long, default_value = "markers")]
    pub mode: PatchMode,

    /// Number of ranked rows
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Compute everything but do not write the page
    #[arg(long)]
    pub dry_run: bool,

    /// Debug logging and per-stage status lines
    #[arg(short, long)]
    pub verbose: bool,

    /// Append log lines to this file instead of stderr
    #[arg(long, env = ENV_LOG_FILE)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn into_config(self) -> Result<Config> {
        let (Some(api_key), Some(site_id)) = (self.api_key, self.site_id) else {
            return Err(Error::Config(format!("{ENV_API_KEY} / {ENV_SITE_ID} not set")));
        };

        let config = Config {
            base_url: self.base_url,
            api: self.api,
            window_days: self.days,
            property: self.property,
            catalog_path: self.catalog,
            document_path: self.document,
            patch_mode: self.mode,
            top_n: self.top,
            timeout: Duration::from_secs(self.timeout),
            dry_run: self.dry_run,
            ..Config::new(api_key, site_id)
        };
        config.validate()?;
        Ok(config)
    }
}

/// Prints stage lines to stdout when verbose.
pub struct ConsoleProgress {
    verbose: bool,
}

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) {
        if self.verbose {
            println!("{msg}");
        }
    }

    fn stage_done(&mut self, stage: Stage, detail: &str) {
        if self.verbose {
            println!("[{}] {}", stage.label(), detail);
        }
    }
}

pub fn status_line(outcome: PatchOutcome, document: &str) -> String {
    match outcome {
        PatchOutcome::Written => format!("{document} updated."),
        PatchOutcome::Unchanged => format!("No change in {document}."),
        PatchOutcome::DryRun { changed: true } => format!("Dry run: {document} would be updated."),
        PatchOutcome::DryRun { changed: false } => format!("Dry run: no change in {document}."),
    }
}

pub fn run(args: Args) -> Result<RunSummary> {
    crate::log::init(args.log_file.clone(), args.verbose);
    let verbose = args.verbose;
    let config = args.into_config()?;

    let mut console = ConsoleProgress { verbose };
    console.log(&format!(
        "{} -> {} ({} days, {})",
        config.catalog_path.display(),
        config.document_path.display(),
        config.window_days,
        config.property
    ));

    let summary = runner::run(&config, Some(&mut console)).inspect_err(|e| loge!("{e}"))?;
    println!("{}", status_line(summary.outcome, &config.document_name()));
    Ok(summary)
}
