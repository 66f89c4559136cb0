//! Input boundary: one logical input unit per run.
//!
//! The configured input path is either a single JSON file or a directory
//! whose `*.json` files (sorted by name) form the batch. An absent path
//! is a logged no-op, not an error; a present file that is not valid
//! JSON is a run-level error. Consumed files are archived only after the
//! whole run succeeds, so a failed run re-executes unchanged.

use crate::error::{PipelineError, PipelineResult};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// The raw documents for one run, with the files they came from.
#[derive(Debug, Default)]
pub struct InputBatch {
    /// Source files, in the order they were read
    pub files: Vec<PathBuf>,
    /// One entry per logical transaction document
    pub documents: Vec<Value>,
}

impl InputBatch {
    /// A batch with nothing to do
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when the run has no documents to ingest
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Discover and read the input unit at `path`.
///
/// Returns an empty batch when the path does not exist or matches no
/// JSON files.
pub fn discover_input(path: &Path) -> PipelineResult<InputBatch> {
    if !path.exists() {
        log::warn!("Input not found. Skipping ingest: {}", path.display());
        return Ok(InputBatch::empty());
    }

    let mut files = Vec::new();
    if path.is_dir() {
        collect_json_files(path, &mut files)?;
        files.sort();
    } else {
        files.push(path.to_path_buf());
    }

    if files.is_empty() {
        log::warn!("No JSON files under input path: {}", path.display());
        return Ok(InputBatch::empty());
    }

    let mut documents = Vec::new();
    for file in &files {
        let count_before = documents.len();
        read_documents(file, &mut documents)?;
        log::info!(
            "Read {} documents from {}",
            documents.len() - count_before,
            file.display()
        );
    }

    Ok(InputBatch { files, documents })
}

/// Recursively collect `.json` files under a directory
fn collect_json_files(dir: &Path, files: &mut Vec<PathBuf>) -> PipelineResult<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| PipelineError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    })?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_json_files(&path, files)?;
        } else if path.extension().is_some_and(|e| e == "json") {
            files.push(path);
        }
    }
    Ok(())
}

/// Parse one file into documents.
///
/// A top-level array contributes its elements; a top-level object is a
/// batch of one. An empty file or empty array contributes nothing.
fn read_documents(path: &Path, documents: &mut Vec<Value>) -> PipelineResult<()> {
    let content = std::fs::read_to_string(path).map_err(|e| PipelineError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })?;

    if content.trim().is_empty() {
        log::warn!("Input file is empty. Nothing to load: {}", path.display());
        return Ok(());
    }

    let value: Value =
        serde_json::from_str(&content).map_err(|e| PipelineError::InputParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    match value {
        Value::Array(items) => documents.extend(items),
        doc @ Value::Object(_) => documents.push(doc),
        other => {
            return Err(PipelineError::InputParse {
                path: path.display().to_string(),
                message: format!("expected an object or array, got {other}"),
            })
        }
    }
    Ok(())
}

/// Move a consumed batch's files into the processed directory.
///
/// Called only after a fully successful run. Returns the new locations.
pub fn archive_batch(batch: &InputBatch, processed_dir: &Path) -> PipelineResult<Vec<PathBuf>> {
    if batch.files.is_empty() {
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(processed_dir).map_err(|e| PipelineError::IoWithPath {
        path: processed_dir.display().to_string(),
        source: e,
    })?;

    let mut moved = Vec::new();
    for file in &batch.files {
        let file_name = file.file_name().unwrap_or_default();
        let dest = processed_dir.join(file_name);
        std::fs::rename(file, &dest).map_err(|e| PipelineError::IoWithPath {
            path: file.display().to_string(),
            source: e,
        })?;
        log::info!("Moved file to processed folder: {}", dest.display());
        moved.push(dest);
    }
    Ok(moved)
}

#[cfg(test)]
#[path = "input_test.rs"]
mod tests;
