//! Read-only queries over the gold reporting views.
//!
//! These are downstream consumers of the target store; the pipeline run
//! path never touches them.

use crate::connection::DuckDbStore;
use crate::error::{StoreError, StoreResult};
use crate::row_helpers::execute_and_collect;

/// Views exposed to `sluice report`, in display order.
pub const REPORT_VIEWS: &[&str] = &["v_sales_by_region", "v_daily_sales", "v_top_products"];

/// A materialized reporting view result.
#[derive(Debug, Clone)]
pub struct ReportTable {
    /// View name without the schema prefix
    pub view: String,
    /// Column names in select order
    pub columns: Vec<String>,
    /// Rows, every value rendered as a string
    pub rows: Vec<Vec<String>>,
}

impl DuckDbStore {
    /// Query one gold view by name.
    ///
    /// The name must be one of [`REPORT_VIEWS`]; view names are
    /// interpolated into SQL, so arbitrary input is refused.
    pub fn query_view(&self, view: &str) -> StoreResult<ReportTable> {
        if !REPORT_VIEWS.contains(&view) {
            return Err(StoreError::UnknownView(view.to_string()));
        }

        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!("SELECT * FROM gold.{view}"))
            .map_err(|e| StoreError::QueryError(format!("prepare {view}: {e}")))?;
        let (columns, rows) = execute_and_collect(&mut stmt)?;

        Ok(ReportTable {
            view: view.to_string(),
            columns,
            rows,
        })
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
