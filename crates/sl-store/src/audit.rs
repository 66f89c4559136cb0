//! Audit sink: append-only rejects in `silver.sales_rejects`.
//!
//! The pipeline only ever writes here; reads belong to operators and
//! downstream tooling.

use crate::connection::DuckDbStore;
use crate::error::StoreResult;
use crate::row_helpers::{fmt_naive_opt, fmt_ts};
use crate::traits::AuditSink;
use async_trait::async_trait;
use chrono::Utc;
use sl_core::ClassifiedRecord;

const INSERT_SQL: &str = "
    INSERT INTO silver.sales_rejects (
        transaction_id, customer_id, product_id, product_name, category,
        price, quantity, discount, sale_date, region, insert_date,
        dq_errors, rejected_at
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, CAST(? AS TIMESTAMP), ?,
            CAST(? AS TIMESTAMP), ?, CAST(? AS TIMESTAMP))";

#[async_trait]
impl AuditSink for DuckDbStore {
    async fn record_rejects(&self, records: &[ClassifiedRecord]) -> StoreResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let rejected_at = Utc::now();

        self.with_transaction(|conn| {
            let mut stmt = conn.prepare(INSERT_SQL)?;
            for classified in records {
                let record = &classified.record;
                stmt.execute(duckdb::params![
                    record.transaction_id,
                    record.customer_id,
                    record.product_id,
                    record.product_name,
                    record.category,
                    record.price,
                    record.quantity,
                    record.discount,
                    fmt_naive_opt(record.sale_date),
                    record.region,
                    fmt_ts(record.ingested_at),
                    classified.dq_errors(),
                    fmt_ts(rejected_at),
                ])?;
            }
            log::warn!(
                "Routed {} rejected records to silver.sales_rejects",
                records.len()
            );
            Ok(records.len())
        })
    }

    async fn reject_count(&self) -> StoreResult<usize> {
        self.count_rows("silver.sales_rejects")
    }
}

#[cfg(test)]
#[path = "audit_test.rs"]
mod tests;
