//! sl-pipeline - Pipeline orchestrator for Sluice
//!
//! This crate owns the input boundary (JSON batch discovery and
//! archival) and the run sequencing over any [`sl_store::Store`]
//! backend.

pub mod error;
pub mod input;
pub mod runner;

pub use error::{PipelineError, PipelineResult};
pub use input::{archive_batch, discover_input, InputBatch};
pub use runner::PipelineRunner;
