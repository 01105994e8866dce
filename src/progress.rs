// src/progress.rs
use crate::file::PatchOutcome;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Catalog,
    Analytics,
    Rank,
    Render,
    Patch,
}

impl Stage {
    pub const ALL: [Stage; 5] = [Stage::Catalog, Stage::Analytics, Stage::Rank, Stage::Render, Stage::Patch];

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Catalog => "catalog",
            Stage::Analytics => "analytics",
            Stage::Rank => "rank",
            Stage::Render => "render",
            Stage::Patch => "patch",
        }
    }
}

/// Lightweight progress reporting for a pipeline run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of stages.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when a stage completes, with a short count summary.
    fn stage_done(&mut self, _stage: Stage, _detail: &str) {}

    /// Called once with the final outcome.
    fn finish(&mut self, _outcome: PatchOutcome) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
