//! Error types for sl-store

use thiserror::Error;

/// Storage layer errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection error (S001)
    #[error("[S001] Store connection failed: {0}")]
    ConnectionError(String),

    /// Schema migration error (S002)
    #[error("[S002] Store migration failed: {0}")]
    MigrationError(String),

    /// SQL execution error (S003)
    #[error("[S003] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Query error (S004)
    #[error("[S004] Store query failed: {0}")]
    QueryError(String),

    /// Transaction management error (S005)
    #[error("[S005] Store transaction failed: {0}")]
    TransactionError(String),

    /// Mutex poisoned (S006)
    #[error("[S006] Store mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// Timestamp round-trip error (S007)
    #[error("[S007] Invalid timestamp from store: {0}")]
    TimestampParse(String),

    /// Unknown reporting view (S008)
    #[error("[S008] Unknown reporting view: {0}")]
    UnknownView(String),
}

/// Result type alias for StoreError
pub type StoreResult<T> = Result<T, StoreError>;

impl From<duckdb::Error> for StoreError {
    fn from(err: duckdb::Error) -> Self {
        StoreError::ExecutionError(err.to_string())
    }
}
