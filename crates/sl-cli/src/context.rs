//! Runtime context for CLI commands

use anyhow::{Context, Result};
use sl_core::Config;
use sl_store::{DuckDbStore, Store};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Runtime context containing the loaded config and store connection
pub struct RuntimeContext {
    /// The loaded pipeline configuration
    pub config: Config,

    /// Project root directory
    pub root: PathBuf,

    /// Resolved database path (after --target override)
    pub db_path: String,

    /// Store connection
    pub store: Arc<DuckDbStore>,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let root = PathBuf::from(&args.project_dir);
        if !root.exists() {
            anyhow::bail!("Project directory not found: {}", root.display());
        }

        // Load config from custom path or project directory
        let config = if let Some(config_path) = &args.config {
            Config::load(Path::new(config_path)).context("Failed to load configuration file")?
        } else {
            Config::load_from_dir(&root).context("Failed to load project configuration")?
        };

        // Open the store (use --target override if provided)
        let db_path = args
            .target
            .clone()
            .unwrap_or_else(|| config.database_path_absolute(&root));
        let store =
            Arc::new(DuckDbStore::open(&db_path).context("Failed to open pipeline store")?);
        log::debug!("Opened {} store at {}", store.store_type(), db_path);

        Ok(Self {
            config,
            root,
            db_path,
            store,
            verbose: args.verbose,
        })
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }
}
