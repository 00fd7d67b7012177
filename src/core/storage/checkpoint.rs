//! Batch checkpoints.
//!
//! After every batch the pipeline may persist the aggregate state so
//! an interrupted build resumes at the next unprocessed batch instead
//! of starting over.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use crate::core::aggregator::InvertedIndex;
use crate::core::error::{IndexError, Result};
use crate::core::storage::{read_json, write_json};
use crate::core::types::{FailedDocument, ProcessedDocument};

/// Aggregate state after the last completed batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Number of IDs in the run this checkpoint belongs to
    pub total_documents: usize,

    /// SHA-256 of the run's ID list, used to detect a different list
    pub ids_digest: String,

    /// IDs consumed so far (processed or failed)
    pub completed: usize,

    /// Batches finished so far
    pub batches: usize,

    pub index: InvertedIndex,

    pub failed: Vec<FailedDocument>,

    /// Raw results, kept only when the run retains them
    #[serde(default)]
    pub processed: Option<Vec<ProcessedDocument>>,

    pub updated_at: DateTime<Utc>,
}

impl Checkpoint {
    /// Empty checkpoint for a run over `ids`
    pub fn start(ids: &[String], keep_processed: bool) -> Self {
        Self {
            total_documents: ids.len(),
            ids_digest: digest_ids(ids),
            completed: 0,
            batches: 0,
            index: InvertedIndex::new(),
            failed: Vec::new(),
            processed: keep_processed.then(Vec::new),
            updated_at: Utc::now(),
        }
    }

    /// Load a checkpoint if one exists at `path`
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let checkpoint: Checkpoint = read_json(path)?;
        tracing::info!(
            "Loaded checkpoint: {}/{} documents in {} batches",
            checkpoint.completed,
            checkpoint.total_documents,
            checkpoint.batches
        );
        Ok(Some(checkpoint))
    }

    /// Persist the checkpoint
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.updated_at = Utc::now();
        write_json(path, &*self)
    }

    /// Delete a checkpoint file if present
    pub fn remove(path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path)?;
            tracing::debug!("Removed checkpoint {:?}", path);
        }
        Ok(())
    }

    /// Check that this checkpoint was written for the same ID list
    pub fn ensure_matches(&self, ids: &[String]) -> Result<()> {
        if self.total_documents != ids.len() || self.ids_digest != digest_ids(ids) {
            return Err(IndexError::Storage(format!(
                "Checkpoint was written for a different document list \
                 ({} documents); remove it to start over",
                self.total_documents
            )));
        }
        if self.completed > ids.len() {
            return Err(IndexError::Storage(format!(
                "Checkpoint claims {} completed documents out of {}",
                self.completed,
                ids.len()
            )));
        }
        Ok(())
    }
}

/// Order-sensitive fingerprint of an ID list
pub fn digest_ids(ids: &[String]) -> String {
    let mut hasher = Sha256::new();
    for id in ids {
        hasher.update(id.as_bytes());
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}
