//! Configuration types and parsing for sluice.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main pipeline configuration from sluice.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Pipeline name, used as the watermark identity
    pub name: String,

    /// Project version
    #[serde(default = "default_version")]
    pub version: String,

    /// Input file or directory containing raw JSON batches
    #[serde(default = "default_input_path")]
    pub input_path: String,

    /// Directory where consumed input files are archived
    #[serde(default = "default_processed_path")]
    pub processed_path: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Path to the DuckDB database file (":memory:" for in-memory)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_input_path() -> String {
    "data/incoming".to_string()
}

fn default_processed_path() -> String {
    "data/processed".to_string()
}

fn default_db_path() -> String {
    "target/sluice.duckdb".to_string()
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            CoreError::ConfigParseError {
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory (sluice.yml or sluice.yaml)
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("sluice.yml");
        let yaml_path = dir.join("sluice.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: dir.join("sluice.yml").display().to_string(),
            })
        }
    }

    fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "pipeline name must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Resolve the input path relative to the project root
    pub fn input_path_absolute(&self, root: &Path) -> PathBuf {
        resolve(root, &self.input_path)
    }

    /// Resolve the processed directory relative to the project root
    pub fn processed_path_absolute(&self, root: &Path) -> PathBuf {
        resolve(root, &self.processed_path)
    }

    /// Resolve the database path relative to the project root
    ///
    /// ":memory:" is passed through untouched.
    pub fn database_path_absolute(&self, root: &Path) -> String {
        if self.database.path == ":memory:" {
            self.database.path.clone()
        } else {
            resolve(root, &self.database.path).display().to_string()
        }
    }
}

fn resolve(root: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        root.join(p)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
