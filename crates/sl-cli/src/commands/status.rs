//! Status command implementation

use anyhow::Result;
use sl_store::{AuditSink, LandingStore, TargetStore, WatermarkStore};

use crate::cli::GlobalArgs;
use crate::context::RuntimeContext;

/// Execute the status command
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;

    println!("Pipeline: {}", ctx.config.name);

    match ctx.store.read_watermark(&ctx.config.name).await? {
        Some(watermark) => println!("Watermark: {watermark}"),
        None => println!("Watermark: none (first run pending)"),
    }

    println!();
    println!("  landing rows:  {}", ctx.store.landing_count().await?);
    println!("  target rows:   {}", ctx.store.target_count().await?);
    println!("  rejected rows: {}", ctx.store.reject_count().await?);

    Ok(())
}
