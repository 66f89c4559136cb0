//! Shared helpers for moving values across the DuckDB boundary.
//!
//! Timestamps cross as microsecond-formatted strings with explicit CASTs:
//! the driver does not expose structured timestamp values uniformly, and
//! both sides formatting through the same function keeps watermark
//! comparisons exact.

use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Format written to the store (microsecond precision).
const TS_WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Format read back; `%.f` tolerates a missing fractional part.
const TS_READ_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Format a UTC timestamp for binding into a `CAST(? AS TIMESTAMP)` slot.
pub(crate) fn fmt_ts(ts: DateTime<Utc>) -> String {
    ts.format(TS_WRITE_FORMAT).to_string()
}

/// Format an optional naive timestamp (sale dates) for binding.
pub(crate) fn fmt_naive_opt(ts: Option<NaiveDateTime>) -> Option<String> {
    ts.map(|t| t.format(TS_WRITE_FORMAT).to_string())
}

/// Parse a timestamp string read back from the store as UTC.
pub(crate) fn parse_ts(s: &str) -> StoreResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, TS_READ_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::TimestampParse(format!("{s}: {e}")))
}

/// Parse an optional naive timestamp read back from the store.
pub(crate) fn parse_naive_opt(s: Option<String>) -> StoreResult<Option<NaiveDateTime>> {
    match s {
        Some(s) => NaiveDateTime::parse_from_str(&s, TS_READ_FORMAT)
            .map(Some)
            .map_err(|e| StoreError::TimestampParse(format!("{s}: {e}"))),
        None => Ok(None),
    }
}

/// Read a column value as a String, trying multiple DuckDB types.
///
/// DuckDB integer columns return `None` for `Option<String>`, so we try
/// String -> i64 -> f64 -> bool -> "null".
pub(crate) fn get_column_as_string(row: &duckdb::Row<'_>, idx: usize) -> String {
    if let Ok(Some(s)) = row.get::<_, Option<String>>(idx) {
        return s;
    }
    if let Ok(Some(n)) = row.get::<_, Option<i64>>(idx) {
        return n.to_string();
    }
    if let Ok(Some(f)) = row.get::<_, Option<f64>>(idx) {
        return f.to_string();
    }
    if let Ok(Some(b)) = row.get::<_, Option<bool>>(idx) {
        return b.to_string();
    }
    "null".to_string()
}

/// Execute a prepared statement and collect all results as strings.
///
/// DuckDB panics on `stmt.column_count()` before execution, so rows are
/// collected via `query_map` first, then column metadata is read.
///
/// Returns `(column_names, rows)`.
pub(crate) fn execute_and_collect(
    stmt: &mut duckdb::Statement,
) -> StoreResult<(Vec<String>, Vec<Vec<String>>)> {
    let raw_rows: Vec<Vec<String>> = stmt
        .query_map([], |row| {
            let col_count = row.as_ref().column_count();
            Ok((0..col_count)
                .map(|i| get_column_as_string(row, i))
                .collect())
        })
        .map_err(|e| StoreError::QueryError(format!("query failed: {e}")))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| StoreError::QueryError(format!("row error: {e}")))?;

    let column_count = stmt.column_count();
    let column_names: Vec<String> = (0..column_count)
        .map(|i| {
            stmt.column_name(i)
                .map_or("?".to_string(), |v| v.to_string())
        })
        .collect();

    Ok((column_names, raw_rows))
}
