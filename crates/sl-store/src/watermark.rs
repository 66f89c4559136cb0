//! Watermark tracker: keyed single-row high-water marks in
//! `silver.etl_metadata`.
//!
//! Absent row means first run; callers substitute [`beginning_of_time`]
//! and the run performs a full load. The commit is a single upsert
//! statement, so readers see either the old or the new value, never a
//! partial one.

use crate::connection::DuckDbStore;
use crate::error::{StoreError, StoreResult};
use crate::row_helpers::{fmt_ts, parse_ts};
use crate::traits::WatermarkStore;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

/// Sentinel watermark for pipelines that have never committed: 1900-01-01.
pub fn beginning_of_time() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1900, 1, 1)
        .expect("valid sentinel date")
        .and_hms_opt(0, 0, 0)
        .expect("valid sentinel time")
        .and_utc()
}

#[async_trait]
impl WatermarkStore for DuckDbStore {
    async fn read_watermark(&self, pipeline: &str) -> StoreResult<Option<DateTime<Utc>>> {
        let result = {
            let conn = self.lock()?;
            conn.query_row(
                "SELECT CAST(last_insert_date AS VARCHAR)
                 FROM silver.etl_metadata
                 WHERE pipeline_name = ?",
                duckdb::params![pipeline],
                |row| row.get::<_, String>(0),
            )
        };

        match result {
            Ok(s) => Ok(Some(parse_ts(&s)?)),
            Err(duckdb::Error::QueryReturnedNoRows) => {
                log::info!(
                    "No watermark for pipeline {pipeline}; assuming first run"
                );
                Ok(None)
            }
            Err(e) => Err(StoreError::QueryError(format!("read watermark: {e}"))),
        }
    }

    async fn commit_watermark(&self, pipeline: &str, ts: DateTime<Utc>) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO silver.etl_metadata (pipeline_name, last_insert_date)
             VALUES (?, CAST(? AS TIMESTAMP))
             ON CONFLICT (pipeline_name)
             DO UPDATE SET last_insert_date = EXCLUDED.last_insert_date",
            duckdb::params![pipeline, fmt_ts(ts)],
        )
        .map_err(|e| StoreError::ExecutionError(format!("commit watermark: {e}")))?;

        log::info!("Committed watermark for pipeline {pipeline}: {ts}");
        Ok(())
    }
}

#[cfg(test)]
#[path = "watermark_test.rs"]
mod tests;
