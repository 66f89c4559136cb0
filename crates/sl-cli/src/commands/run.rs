//! Run command implementation

use anyhow::Result;
use sl_core::RunReport;
use sl_pipeline::PipelineRunner;
use std::sync::Arc;

use crate::cli::{GlobalArgs, RunArgs, RunOutput};
use crate::context::RuntimeContext;

/// Execute the run command
pub(crate) async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let mut ctx = RuntimeContext::new(global)?;

    if let Some(input) = &args.input {
        ctx.verbose(&format!("Input override: {input}"));
        ctx.config.input_path = input.clone();
    }

    ctx.verbose(&format!(
        "Running pipeline {} against {}",
        ctx.config.name, ctx.db_path
    ));

    let runner = PipelineRunner::new(
        ctx.store.clone() as Arc<dyn sl_store::Store>,
        ctx.config.clone(),
        ctx.root.clone(),
    );
    let report = runner.run().await;

    match args.output {
        RunOutput::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        RunOutput::Text => print_report(&report),
    }

    if !report.is_success() {
        anyhow::bail!(
            "Run {} aborted in stage {}: {}",
            report.run_id,
            report.stage,
            report.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}

fn print_report(report: &RunReport) {
    println!("Run {} ({})\n", report.run_id, report.status);
    println!("  ingested:   {}", report.counts.ingested);
    println!("  extracted:  {}", report.counts.extracted);
    println!("  valid:      {}", report.counts.valid);
    println!("  rejected:   {}", report.counts.invalid);
    println!("  merged:     {}", report.counts.merged);

    match report.watermark_after {
        Some(watermark) => println!("  watermark:  {watermark}"),
        None => println!("  watermark:  none"),
    }
}
