//! Run state machine and report for a single pipeline run
//!
//! A run moves `Idle -> Extracting -> Classifying -> Loading -> Committing
//! -> Idle`, with `Aborted` reachable from any stage. The report is what a
//! front-end (CLI, scheduler) gets back; the durable checkpoint is the
//! watermark, not this struct.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stage of the pipeline state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStage {
    /// No run in progress, or run finished cleanly
    Idle,
    /// Ingesting input and selecting landing rows past the watermark
    Extracting,
    /// Applying data-quality rules
    Classifying,
    /// Merging valid records into the target store
    Loading,
    /// Advancing the watermark
    Committing,
    /// Terminal failure state; watermark untouched
    Aborted,
}

/// Final status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Run is currently in progress
    Running,
    /// Run completed successfully
    Completed,
    /// Input was absent or empty; nothing to do
    NoInput,
    /// Run failed with an unrecoverable error
    Aborted,
}

/// Per-stage record counts for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounts {
    /// Raw documents ingested into the landing store this run
    pub ingested: usize,
    /// Landing rows selected past the watermark
    pub extracted: usize,
    /// Records that passed every rule
    pub valid: usize,
    /// Records routed to the audit sink
    pub invalid: usize,
    /// Rows merged into the target store
    pub merged: usize,
}

/// Outcome of a single pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique identifier for this run
    pub run_id: String,

    /// Pipeline identity the run executed under
    pub pipeline: String,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished (success or abort)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,

    /// Stage the run ended in
    pub stage: RunStage,

    /// Final status
    pub status: RunStatus,

    /// Record counts per stage
    pub counts: RunCounts,

    /// Watermark read at run start, if one existed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark_before: Option<DateTime<Utc>>,

    /// Watermark after the run; equals `watermark_before` unless the run
    /// extracted rows and committed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark_after: Option<DateTime<Utc>>,

    /// Error message for aborted runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunReport {
    /// Create a report for a run that is about to start
    pub fn new(pipeline: &str) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string()[..8].to_string(),
            pipeline: pipeline.to_string(),
            started_at: Utc::now(),
            finished_at: None,
            stage: RunStage::Idle,
            status: RunStatus::Running,
            counts: RunCounts::default(),
            watermark_before: None,
            watermark_after: None,
            error: None,
        }
    }

    /// Enter a stage
    pub fn enter(&mut self, stage: RunStage) {
        log::debug!("Run {} entering stage {}", self.run_id, stage);
        self.stage = stage;
    }

    /// Mark the run as completed; the machine returns to `Idle`
    pub fn complete(&mut self) {
        self.stage = RunStage::Idle;
        self.status = RunStatus::Completed;
        self.finished_at = Some(Utc::now());
    }

    /// Mark the run as a non-fatal no-op (absent or empty input)
    pub fn complete_no_input(&mut self) {
        self.stage = RunStage::Idle;
        self.status = RunStatus::NoInput;
        self.finished_at = Some(Utc::now());
    }

    /// Mark the run as aborted, recording where and why it failed
    pub fn abort(&mut self, error: &str) {
        log::error!(
            "Run {} aborted in stage {}: {}",
            self.run_id,
            self.stage,
            error
        );
        self.stage = RunStage::Aborted;
        self.status = RunStatus::Aborted;
        self.error = Some(error.to_string());
        self.finished_at = Some(Utc::now());
    }

    /// Whether the run ended without error (completed or clean no-op)
    pub fn is_success(&self) -> bool {
        matches!(self.status, RunStatus::Completed | RunStatus::NoInput)
    }
}

impl std::fmt::Display for RunStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStage::Idle => write!(f, "idle"),
            RunStage::Extracting => write!(f, "extracting"),
            RunStage::Classifying => write!(f, "classifying"),
            RunStage::Loading => write!(f, "loading"),
            RunStage::Committing => write!(f, "committing"),
            RunStage::Aborted => write!(f, "aborted"),
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Running => write!(f, "running"),
            RunStatus::Completed => write!(f, "completed"),
            RunStatus::NoInput => write!(f, "no input"),
            RunStatus::Aborted => write!(f, "aborted"),
        }
    }
}

#[cfg(test)]
#[path = "run_state_test.rs"]
mod tests;
