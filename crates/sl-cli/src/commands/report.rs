//! Report command implementation - prints the gold reporting views

use anyhow::{Context, Result};
use sl_store::REPORT_VIEWS;

use crate::cli::{GlobalArgs, ReportArgs};
use crate::context::RuntimeContext;

/// Execute the report command
pub(crate) async fn execute(args: &ReportArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;

    let views: Vec<&str> = match &args.view {
        Some(view) => vec![view.as_str()],
        None => REPORT_VIEWS.to_vec(),
    };

    for view in views {
        let table = ctx
            .store
            .query_view(view)
            .with_context(|| format!("Failed to query view {view}"))?;

        println!("{}", table.view);
        println!("  {}", table.columns.join(" | "));
        if table.rows.is_empty() {
            println!("  (no rows)");
        } else {
            for row in &table.rows {
                println!("  {}", row.join(" | "));
            }
        }
        println!();
    }

    Ok(())
}
