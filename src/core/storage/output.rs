//! Index and raw-result files.

use std::path::Path;

use crate::core::aggregator::InvertedIndex;
use crate::core::error::Result;
use crate::core::storage::{read_json, write_json};
use crate::core::types::ProcessedDocument;

/// Write the inverted index
pub fn save_index(path: &Path, index: &InvertedIndex) -> Result<()> {
    write_json(path, index)?;
    tracing::info!(
        "Wrote index with {} groups ({} references) to {:?}",
        index.group_count(),
        index.location_count(),
        path
    );
    Ok(())
}

/// Read a previously written inverted index
pub fn load_index(path: &Path) -> Result<InvertedIndex> {
    read_json(path)
}

/// Write the raw per-document results
pub fn save_processed(path: &Path, processed: &[ProcessedDocument]) -> Result<()> {
    write_json(path, processed)?;
    tracing::info!("Wrote {} per-document results to {:?}", processed.len(), path);
    Ok(())
}

/// Read raw per-document results
pub fn load_processed(path: &Path) -> Result<Vec<ProcessedDocument>> {
    read_json(path)
}
