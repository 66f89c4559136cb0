//! DuckDB-backed pipeline store.
//!
//! [`DuckDbStore`] owns a DuckDB [`Connection`] behind a `Mutex` so the
//! async store traits can be `Send + Sync`; every operation is blocking
//! under the lock, which matches the single-run-at-a-time pipeline model.

use crate::error::{StoreError, StoreResult};
use crate::migration::run_migrations;
use crate::traits::Store;
use duckdb::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// DuckDB store backend
pub struct DuckDbStore {
    conn: Mutex<Connection>,
}

impl DuckDbStore {
    /// Open (or create) the store at `path` and run pending migrations.
    pub fn open(path: &str) -> StoreResult<Self> {
        if path == ":memory:" {
            return Self::open_memory();
        }

        let path = Path::new(path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::ConnectionError(format!("{}: {e}", parent.display()))
                })?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| StoreError::ConnectionError(format!("{e}: {}", path.display())))?;
        run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store with all migrations applied.
    ///
    /// Useful for unit tests that don't need persistence.
    pub fn open_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?;
        run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub(crate) fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::MutexPoisoned(e.to_string()))
    }

    /// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling
    /// back on error.
    pub(crate) fn with_transaction<F, T>(&self, body: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T>,
    {
        let conn = self.lock()?;

        conn.execute_batch("BEGIN TRANSACTION")
            .map_err(|e| StoreError::TransactionError(format!("BEGIN failed: {e}")))?;

        let result = body(&conn);

        match &result {
            Ok(_) => {
                if let Err(commit_err) = conn.execute_batch("COMMIT") {
                    let _ = conn.execute_batch("ROLLBACK");
                    return Err(StoreError::TransactionError(format!(
                        "COMMIT failed: {commit_err}"
                    )));
                }
            }
            Err(_) => {
                let _ = conn.execute_batch("ROLLBACK");
            }
        }
        result
    }

    /// Count rows in a table (shared by the status queries).
    pub(crate) fn count_rows(&self, table: &str) -> StoreResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })
            .map_err(|e| StoreError::QueryError(format!("count {table}: {e}")))?;
        Ok(count as usize)
    }
}

impl Store for DuckDbStore {
    fn store_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod tests;
