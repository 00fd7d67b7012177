//! Document ID lists.
//!
//! IDs come either from a list file (one per line) or from walking a
//! corpus directory and taking the stem of every file with the
//! expected extension.

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::core::error::{IndexError, Result};

/// Read one document ID per line, skipping blank lines
pub fn read_id_list(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| IndexError::Config(format!("Failed to read ID list {path:?}: {e}")))?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Collect document IDs from files with `extension` under `dir`
///
/// Hidden entries are skipped. IDs are returned sorted so repeated
/// runs (and checkpoints) see the same order.
pub fn discover_ids(dir: &Path, extension: &str) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(IndexError::Config(format!(
            "Documents directory {dir:?} does not exist"
        )));
    }

    let mut ids = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
    {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some(extension) {
                    continue;
                }
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
            Err(e) => {
                tracing::warn!("Walk error: {}", e);
            }
        }
    }

    ids.sort();
    ids.dedup();
    tracing::info!("Discovered {} documents in {:?}", ids.len(), dir);
    Ok(ids)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|n| n.starts_with('.'))
}
