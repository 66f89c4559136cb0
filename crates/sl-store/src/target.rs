//! Upsert loader: merge-consistent target store over `silver.sales`.
//!
//! The merge is keyed by `transaction_id`: new keys insert, existing keys
//! overwrite every mutable field. `insert_date` survives overwrites;
//! `update_date` moves on every write. The derived `total_amount` is
//! computed here, at merge time, so it always reflects the merged inputs.

use crate::connection::DuckDbStore;
use crate::error::{StoreError, StoreResult};
use crate::row_helpers::{fmt_naive_opt, fmt_ts, parse_naive_opt, parse_ts};
use crate::traits::TargetStore;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sl_core::{ClassifiedRecord, NormalizedRecord};

const UPSERT_SQL: &str = "
    INSERT INTO silver.sales (
        transaction_id, customer_id, product_id, product_name, category,
        price, quantity, discount, sale_date, region, total_amount,
        insert_date, update_date
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, CAST(? AS TIMESTAMP), ?, ?,
            CAST(? AS TIMESTAMP), CAST(? AS TIMESTAMP))
    ON CONFLICT (transaction_id) DO UPDATE SET
        customer_id  = EXCLUDED.customer_id,
        product_id   = EXCLUDED.product_id,
        product_name = EXCLUDED.product_name,
        category     = EXCLUDED.category,
        price        = EXCLUDED.price,
        quantity     = EXCLUDED.quantity,
        discount     = EXCLUDED.discount,
        sale_date    = EXCLUDED.sale_date,
        region       = EXCLUDED.region,
        total_amount = EXCLUDED.total_amount,
        update_date  = EXCLUDED.update_date";

const SELECT_ROW_SQL: &str = "
    SELECT transaction_id, customer_id, product_id, product_name, category,
           price, quantity, discount, CAST(sale_date AS VARCHAR), region,
           total_amount, CAST(insert_date AS VARCHAR),
           CAST(update_date AS VARCHAR)
    FROM silver.sales
    WHERE transaction_id = ?";

/// One merged row from the target store.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetRow {
    pub transaction_id: String,
    pub customer_id: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub discount: Option<f64>,
    pub sale_date: Option<NaiveDateTime>,
    pub region: Option<String>,
    pub total_amount: Option<f64>,
    pub insert_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

/// Merge-time derivation: `quantity * price * (1 - discount)`.
///
/// A missing quantity is tolerated by the rule set, so the total degrades
/// to NULL rather than guessing.
fn derived_total(record: &NormalizedRecord) -> Option<f64> {
    let quantity = record.quantity?;
    let price = record.price?;
    let discount = record.discount.unwrap_or(0.0);
    Some(quantity as f64 * price * (1.0 - discount))
}

#[async_trait]
impl TargetStore for DuckDbStore {
    async fn merge_batch(&self, records: &[ClassifiedRecord]) -> StoreResult<usize> {
        if records.is_empty() {
            log::info!("No records to merge into silver.sales");
            return Ok(0);
        }

        let merge_time = Utc::now();

        self.with_transaction(|conn| {
            let mut stmt = conn.prepare(UPSERT_SQL)?;
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
                    derived_total(record),
                    fmt_ts(record.ingested_at),
                    fmt_ts(merge_time),
                ])?;
            }
            log::info!(
                "Merged {} records into silver.sales (upsert on transaction_id)",
                records.len()
            );
            Ok(records.len())
        })
    }

    async fn target_row(&self, transaction_id: &str) -> StoreResult<Option<TargetRow>> {
        let conn = self.lock()?;
        let result = conn.query_row(SELECT_ROW_SQL, duckdb::params![transaction_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<f64>>(5)?,
                row.get::<_, Option<i64>>(6)?,
                row.get::<_, Option<f64>>(7)?,
                row.get::<_, Option<String>>(8)?,
                row.get::<_, Option<String>>(9)?,
                row.get::<_, Option<f64>>(10)?,
                row.get::<_, String>(11)?,
                row.get::<_, String>(12)?,
            ))
        });

        let raw = match result {
            Ok(raw) => raw,
            Err(duckdb::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(StoreError::QueryError(format!("target_row: {e}"))),
        };

        Ok(Some(TargetRow {
            transaction_id: raw.0,
            customer_id: raw.1,
            product_id: raw.2,
            product_name: raw.3,
            category: raw.4,
            price: raw.5,
            quantity: raw.6,
            discount: raw.7,
            sale_date: parse_naive_opt(raw.8)?,
            region: raw.9,
            total_amount: raw.10,
            insert_date: parse_ts(&raw.11)?,
            update_date: parse_ts(&raw.12)?,
        }))
    }

    async fn target_count(&self) -> StoreResult<usize> {
        self.count_rows("silver.sales")
    }
}

#[cfg(test)]
#[path = "target_test.rs"]
mod tests;
