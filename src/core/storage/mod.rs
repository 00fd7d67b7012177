//! Persistence for index builds.
//!
//! Everything is stored as JSON. Files are written to a temporary
//! sibling and renamed into place so a crash never leaves a
//! half-written index or checkpoint behind.
//!
//! # Layout
//!
//! ```text
//! {output}/
//! ├── compounded_index.json   # group -> phrase -> ["doc.sentence", ...]
//! ├── processed.json          # optional raw per-document results
//! └── checkpoint.json         # batch progress, removed after a build
//! ```

mod checkpoint;
mod corpus;
mod output;

pub use checkpoint::Checkpoint;
pub use corpus::{discover_ids, read_id_list};
pub use output::{load_index, load_processed, save_index, save_processed};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::error::{IndexError, Result};

/// Serialize a value to pretty JSON and atomically replace `path`
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(value)?;
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path).map_err(|e| {
        IndexError::Storage(format!("Failed to move {tmp:?} into place at {path:?}: {e}"))
    })?;

    Ok(())
}

/// Read a JSON file into a value
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| IndexError::Storage(format!("Failed to read {path:?}: {e}")))?;
    Ok(serde_json::from_str(&contents)?)
}
