//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Sluice - incremental sales ETL with watermark checkpointing
#[derive(Parser, Debug)]
#[command(name = "sluice")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override database path
    #[arg(short, long, global = true)]
    pub target: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new Sluice pipeline project
    Init(InitArgs),

    /// Execute one pipeline run (ingest, classify, merge, commit)
    Run(RunArgs),

    /// Show the watermark and store row counts
    Status,

    /// Print the gold reporting views
    Report(ReportArgs),
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Name of the project directory to create
    pub name: String,

    /// Database path written into sluice.yml
    #[arg(long, default_value = "target/sluice.duckdb")]
    pub database_path: String,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Override the input file or directory for this run
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output format for the run report
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: RunOutput,
}

/// Run report output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutput {
    /// Human-readable summary
    Text,
    /// JSON report
    Json,
}

/// Arguments for the report command
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Single view to print (default: all views)
    #[arg(long)]
    pub view: Option<String>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
