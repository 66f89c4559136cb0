//! Store trait definitions
//!
//! The pipeline contract is split by ownership: the landing store is
//! append-only, the target store is owned by the upsert loader, the
//! watermark belongs to the orchestrator, and the audit sink is
//! write-only. A backend implements all four plus [`Store`].

use crate::error::StoreResult;
use crate::target::TargetRow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sl_core::{ClassifiedRecord, NormalizedRecord};

/// Append-only landing store with watermark-bounded extraction.
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait LandingStore: Send + Sync {
    /// Append a normalized batch; returns rows written
    async fn append_batch(&self, records: &[NormalizedRecord]) -> StoreResult<usize>;

    /// Rows with ingestion timestamp strictly greater than the watermark,
    /// in ingestion-timestamp order. Zero rows is a valid outcome.
    async fn extract_since(&self, watermark: DateTime<Utc>)
        -> StoreResult<Vec<NormalizedRecord>>;

    /// Highest ingestion timestamp in the landing store, if any
    async fn max_ingested_at(&self) -> StoreResult<Option<DateTime<Utc>>>;

    /// Total landing rows (status reporting)
    async fn landing_count(&self) -> StoreResult<usize>;
}

/// Target store merged by natural key with insert-or-overwrite semantics.
#[async_trait]
pub trait TargetStore: Send + Sync {
    /// Merge the valid partition of a run into the target, as one
    /// all-or-nothing unit; returns rows merged
    async fn merge_batch(&self, records: &[ClassifiedRecord]) -> StoreResult<usize>;

    /// Fetch one merged row by natural key
    async fn target_row(&self, transaction_id: &str) -> StoreResult<Option<TargetRow>>;

    /// Total target rows (status reporting)
    async fn target_count(&self) -> StoreResult<usize>;
}

/// Keyed single-row watermark storage with atomic overwrite.
#[async_trait]
pub trait WatermarkStore: Send + Sync {
    /// Stored high-water mark for a pipeline identity, if one exists
    async fn read_watermark(&self, pipeline: &str) -> StoreResult<Option<DateTime<Utc>>>;

    /// Persist a new high-water mark; must only be called after the
    /// corresponding load durably succeeded
    async fn commit_watermark(&self, pipeline: &str, ts: DateTime<Utc>) -> StoreResult<()>;
}

/// Write-only destination for rejected records and their reasons.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Append rejected records; returns rows written
    async fn record_rejects(&self, records: &[ClassifiedRecord]) -> StoreResult<usize>;

    /// Total rejected rows (status reporting)
    async fn reject_count(&self) -> StoreResult<usize>;
}

/// Full store contract a pipeline backend provides.
pub trait Store: LandingStore + TargetStore + WatermarkStore + AuditSink {
    /// Backend identifier for logging
    fn store_type(&self) -> &'static str;
}
