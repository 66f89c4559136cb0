//! Sluice CLI - incremental sales ETL with watermark checkpointing

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::Cli;
use commands::{init, report, run, status};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Init(args) => init::execute(args).await,
        cli::Commands::Run(args) => run::execute(args, &cli.global).await,
        cli::Commands::Status => status::execute(&cli.global).await,
        cli::Commands::Report(args) => report::execute(args, &cli.global).await,
    }
}
