//! Landing store: append-only ingestion target with watermark-bounded
//! extraction over `raw.sales_raw`.

use crate::connection::DuckDbStore;
use crate::error::{StoreError, StoreResult};
use crate::row_helpers::{fmt_naive_opt, fmt_ts, parse_naive_opt, parse_ts};
use crate::traits::LandingStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sl_core::NormalizedRecord;

const INSERT_SQL: &str = "
    INSERT INTO raw.sales_raw (
        transaction_id, customer_id, product_id, product_name, category,
        price, quantity, discount, sale_date, region, insert_date
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, CAST(? AS TIMESTAMP), ?, CAST(? AS TIMESTAMP))";

const EXTRACT_SQL: &str = "
    SELECT transaction_id, customer_id, product_id, product_name, category,
           price, quantity, discount, CAST(sale_date AS VARCHAR), region,
           CAST(insert_date AS VARCHAR)
    FROM raw.sales_raw
    WHERE insert_date > CAST(? AS TIMESTAMP)
    ORDER BY insert_date";

/// Raw column values as read from DuckDB, before timestamp parsing.
struct LandingRow {
    transaction_id: Option<String>,
    customer_id: Option<String>,
    product_id: Option<String>,
    product_name: Option<String>,
    category: Option<String>,
    price: Option<f64>,
    quantity: Option<i64>,
    discount: Option<f64>,
    sale_date: Option<String>,
    region: Option<String>,
    insert_date: String,
}

impl LandingRow {
    fn into_record(self) -> StoreResult<NormalizedRecord> {
        Ok(NormalizedRecord {
            transaction_id: self.transaction_id,
            customer_id: self.customer_id,
            product_id: self.product_id,
            product_name: self.product_name,
            category: self.category,
            price: self.price,
            quantity: self.quantity,
            discount: self.discount,
            sale_date: parse_naive_opt(self.sale_date)?,
            region: self.region,
            ingested_at: parse_ts(&self.insert_date)?,
        })
    }
}

#[async_trait]
impl LandingStore for DuckDbStore {
    async fn append_batch(&self, records: &[NormalizedRecord]) -> StoreResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        self.with_transaction(|conn| {
            let mut stmt = conn.prepare(INSERT_SQL)?;
            for record in records {
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
                ])?;
            }
            log::info!("Appended {} records to raw.sales_raw", records.len());
            Ok(records.len())
        })
    }

    async fn extract_since(
        &self,
        watermark: DateTime<Utc>,
    ) -> StoreResult<Vec<NormalizedRecord>> {
        let rows: Vec<LandingRow> = {
            let conn = self.lock()?;
            let mut stmt = conn.prepare(EXTRACT_SQL)?;
            stmt.query_map(duckdb::params![fmt_ts(watermark)], |row| {
                Ok(LandingRow {
                    transaction_id: row.get(0)?,
                    customer_id: row.get(1)?,
                    product_id: row.get(2)?,
                    product_name: row.get(3)?,
                    category: row.get(4)?,
                    price: row.get(5)?,
                    quantity: row.get(6)?,
                    discount: row.get(7)?,
                    sale_date: row.get(8)?,
                    region: row.get(9)?,
                    insert_date: row.get(10)?,
                })
            })
            .map_err(|e| StoreError::QueryError(format!("extract query: {e}")))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::QueryError(format!("extract row: {e}")))?
        };

        let records = rows
            .into_iter()
            .map(LandingRow::into_record)
            .collect::<StoreResult<Vec<_>>>()?;

        log::info!(
            "Extracted {} landing records newer than {}",
            records.len(),
            watermark
        );
        Ok(records)
    }

    async fn max_ingested_at(&self) -> StoreResult<Option<DateTime<Utc>>> {
        let max: Option<String> = {
            let conn = self.lock()?;
            conn.query_row(
                "SELECT CAST(MAX(insert_date) AS VARCHAR) FROM raw.sales_raw",
                [],
                |row| row.get(0),
            )
            .map_err(|e| StoreError::QueryError(format!("max insert_date: {e}")))?
        };

        match max {
            Some(s) => Ok(Some(parse_ts(&s)?)),
            None => Ok(None),
        }
    }

    async fn landing_count(&self) -> StoreResult<usize> {
        self.count_rows("raw.sales_raw")
    }
}

#[cfg(test)]
#[path = "landing_test.rs"]
mod tests;
