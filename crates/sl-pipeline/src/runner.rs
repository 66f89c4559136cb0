//! Pipeline orchestrator: sequences one run through the state machine.
//!
//! Stage order is `Extracting -> Classifying -> Loading -> Committing`.
//! The watermark is read once at the start and committed exactly once,
//! after the loader has succeeded for the whole batch; any failure
//! aborts the run and leaves the previous watermark intact, so a rerun
//! safely reprocesses the same window.

use crate::error::PipelineResult;
use crate::input::{self, InputBatch};
use sl_core::{normalize_batch, partition, Config, RunReport, RunStage};
use sl_store::{
    beginning_of_time, AuditSink, LandingStore, Store, TargetStore, WatermarkStore,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Drives the extract -> classify -> load -> commit contract against a
/// [`Store`] backend. Front-ends (CLI, scheduler) only ever call
/// [`PipelineRunner::run`].
pub struct PipelineRunner {
    store: Arc<dyn Store>,
    config: Config,
    root: PathBuf,
}

impl PipelineRunner {
    /// Create a runner for one pipeline identity
    pub fn new(store: Arc<dyn Store>, config: Config, root: impl Into<PathBuf>) -> Self {
        Self {
            store,
            config,
            root: root.into(),
        }
    }

    /// Execute one run.
    ///
    /// Never panics and never returns an error: failures are captured in
    /// the report (`status = Aborted`) so the caller always gets the full
    /// picture of how far the run got.
    pub async fn run(&self) -> RunReport {
        let mut report = RunReport::new(&self.config.name);
        log::info!(
            "Starting run {} for pipeline {} ({} store)",
            report.run_id,
            self.config.name,
            self.store.store_type()
        );

        if let Err(e) = self.execute(&mut report).await {
            report.abort(&e.to_string());
        }
        report
    }

    async fn execute(&self, report: &mut RunReport) -> PipelineResult<()> {
        report.enter(RunStage::Extracting);

        let input_path = self.config.input_path_absolute(&self.root);
        let batch = input::discover_input(&input_path)?;
        if batch.is_empty() {
            log::warn!(
                "No input for pipeline {}; run ends with no state change",
                self.config.name
            );
            report.complete_no_input();
            return Ok(());
        }

        let watermark_before = self.store.read_watermark(&self.config.name).await?;
        report.watermark_before = watermark_before;
        let watermark = watermark_before.unwrap_or_else(beginning_of_time);

        let normalized = normalize_batch(&batch.documents);
        report.counts.ingested = self.store.append_batch(&normalized).await?;

        let extracted = self.store.extract_since(watermark).await?;
        report.counts.extracted = extracted.len();

        // Commit candidate: the highest ingestion timestamp this run saw
        let high_water = extracted.iter().map(|r| r.ingested_at).max();

        report.enter(RunStage::Classifying);
        let (valid, invalid) = partition(extracted);
        report.counts.valid = valid.len();
        report.counts.invalid = invalid.len();

        // Rejects are routed unconditionally; they are an outcome, not an error
        self.store.record_rejects(&invalid).await?;

        report.enter(RunStage::Loading);
        report.counts.merged = self.store.merge_batch(&valid).await?;

        report.enter(RunStage::Committing);
        match high_water {
            Some(high_water) => {
                self.store
                    .commit_watermark(&self.config.name, high_water)
                    .await?;
                report.watermark_after = Some(high_water);
            }
            None => {
                log::info!(
                    "Zero rows extracted for pipeline {}; watermark unchanged",
                    self.config.name
                );
                report.watermark_after = watermark_before;
            }
        }

        self.archive(&batch)?;

        report.complete();
        log::info!(
            "Run {} completed: {} extracted, {} merged, {} rejected",
            report.run_id,
            report.counts.extracted,
            report.counts.merged,
            report.counts.invalid
        );
        Ok(())
    }

    /// Archive consumed input only after the commit, so an aborted run
    /// can be re-executed unchanged.
    fn archive(&self, batch: &InputBatch) -> PipelineResult<()> {
        let processed_dir = self.config.processed_path_absolute(&self.root);
        input::archive_batch(batch, &processed_dir)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
