//! Index build orchestration.
//!
//! Coordinates the end-to-end build:
//! 1. Split the document IDs into fixed-size batches
//! 2. Fetch and match each document of a batch on the executor
//! 3. Fold the batch's results into the inverted index
//! 4. Optionally checkpoint the aggregate state
//!
//! Per-document results are dropped after folding unless the caller
//! asks to keep them, so memory is bounded by the index and one
//! batch. Unavailable documents are recorded as failed and skipped;
//! any other error aborts the build.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::core::aggregator::InvertedIndex;
use crate::core::compiler::CompiledDictionary;
use crate::core::error::{IndexError, Result};
use crate::core::executor::Executor;
use crate::core::matcher::SentenceMatcher;
use crate::core::source::DocumentSource;
use crate::core::storage::Checkpoint;
use crate::core::types::{DocumentMatches, FailedDocument, ProcessedDocument, RunStats};

/// Default number of documents per batch
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Build options
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Documents per batch (must be > 0)
    pub batch_size: usize,

    /// Retain every per-document result in the report
    pub keep_processed: bool,

    /// Where to persist progress after each batch
    pub checkpoint_path: Option<PathBuf>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            keep_processed: false,
            checkpoint_path: None,
        }
    }
}

/// Outcome of an index build
#[derive(Debug, Clone)]
pub struct RunReport {
    pub index: InvertedIndex,

    /// Documents excluded because their text was unavailable
    pub failed: Vec<FailedDocument>,

    /// Raw per-document results, when requested
    pub processed: Option<Vec<ProcessedDocument>>,

    pub stats: RunStats,
}

/// Orchestrates matching and aggregation over a corpus
pub struct IndexingPipeline {
    dictionary: Arc<CompiledDictionary>,
    source: Box<dyn DocumentSource>,
    matcher: SentenceMatcher,
    options: PipelineOptions,
}

impl IndexingPipeline {
    /// Create a new pipeline
    ///
    /// # Arguments
    ///
    /// * `dictionary` - Compiled indicator dictionary, shared read-only
    /// * `source` - Where document text comes from
    /// * `options` - Batching, retention and checkpoint settings
    pub fn new(
        dictionary: Arc<CompiledDictionary>,
        source: Box<dyn DocumentSource>,
        options: PipelineOptions,
    ) -> Result<Self> {
        if options.batch_size == 0 {
            return Err(IndexError::Config(
                "Batch size must be non-zero".to_string(),
            ));
        }

        Ok(Self {
            dictionary,
            source,
            matcher: SentenceMatcher::default(),
            options,
        })
    }

    /// Builder: use a custom sentence matcher
    pub fn with_matcher(mut self, matcher: SentenceMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn dictionary(&self) -> &CompiledDictionary {
        &self.dictionary
    }

    /// Fetch and match a single document
    ///
    /// This is the unit of work handed to the executor. It has no
    /// side effects and may run on any thread.
    pub fn process_document(&self, document_id: &str) -> Result<DocumentMatches> {
        let text = self.source.get_text(document_id)?;
        let matches = self.matcher.match_document(&text, &self.dictionary);
        tracing::debug!(
            "Matched {} ({} groups, {} hits)",
            document_id,
            matches.group_count(),
            matches.hit_count()
        );
        Ok(matches)
    }

    /// Build the inverted index over `ids`
    ///
    /// Resumes from the configured checkpoint when it belongs to the
    /// same ID list.
    pub fn run<E: Executor>(&self, ids: &[String], executor: &E) -> Result<RunReport> {
        let started_at = Utc::now();
        let start = Instant::now();

        let mut state = self.initial_state(ids)?;
        let total = ids.len();
        let batch_size = self.options.batch_size;

        tracing::info!(
            "Building index over {} documents ({} groups, batch size {}, {} workers)",
            total,
            self.dictionary.len(),
            batch_size,
            executor.workers()
        );

        while state.completed < total {
            let batch_start = Instant::now();
            let begin = state.completed;
            let end = (begin + batch_size).min(total);
            let batch: Vec<&String> = ids[begin..end].iter().collect();

            let results = executor.map(batch, |id| (id, self.process_document(id)));
            self.fold_batch(&mut state, results)?;

            state.completed = end;
            state.batches += 1;

            if let Some(path) = &self.options.checkpoint_path {
                state.save(path)?;
            }

            log_progress(end, total, batch_start, end - begin);
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        let documents_failed = state.failed.len();
        let stats = RunStats {
            documents_total: total,
            documents_processed: total - documents_failed,
            documents_failed,
            batches: state.batches,
            groups: state.index.group_count(),
            location_refs: state.index.location_count(),
            duration_ms,
            started_at,
        };

        tracing::info!(
            "Index complete: {} documents processed, {} failed, \
             {} groups, {} references in {}ms",
            stats.documents_processed,
            stats.documents_failed,
            stats.groups,
            stats.location_refs,
            duration_ms
        );

        Ok(RunReport {
            index: state.index,
            failed: state.failed,
            processed: state.processed,
            stats,
        })
    }

    fn initial_state(&self, ids: &[String]) -> Result<Checkpoint> {
        if let Some(path) = &self.options.checkpoint_path {
            if let Some(checkpoint) = Checkpoint::load(path)? {
                checkpoint.ensure_matches(ids)?;
                if self.options.keep_processed && checkpoint.processed.is_none() {
                    return Err(IndexError::Storage(
                        "Checkpoint does not retain per-document results; \
                         remove it or disable result retention"
                            .to_string(),
                    ));
                }
                tracing::info!(
                    "Resuming after {} of {} documents",
                    checkpoint.completed,
                    ids.len()
                );
                return Ok(checkpoint);
            }
        }
        Ok(Checkpoint::start(ids, self.options.keep_processed))
    }

    /// Fold one batch sequentially, in input order
    fn fold_batch(
        &self,
        state: &mut Checkpoint,
        results: Vec<(&String, Result<DocumentMatches>)>,
    ) -> Result<()> {
        for (id, result) in results {
            match result {
                Ok(matches) => {
                    state
                        .index
                        .accumulate_checked(&self.dictionary, id, &matches)?;
                    if let Some(processed) = state.processed.as_mut() {
                        processed.push(ProcessedDocument {
                            document_id: id.clone(),
                            matches,
                        });
                    }
                }
                Err(e) if e.is_per_document() => {
                    tracing::warn!("Skipping {}: {}", id, e);
                    state.failed.push(FailedDocument {
                        document_id: id.clone(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

/// Log percentage done and a remaining-time estimate after a batch
fn log_progress(completed: usize, total: usize, batch_start: Instant, batch_len: usize) {
    let elapsed = batch_start.elapsed().as_secs_f64();
    let percent = if total > 0 {
        100.0 * completed as f64 / total as f64
    } else {
        100.0
    };
    let remaining = total - completed;
    let remaining_minutes = if batch_len > 0 {
        remaining as f64 * elapsed / (60.0 * batch_len as f64)
    } else {
        0.0
    };

    tracing::info!(
        "Progress: {}/{} documents ({:.1}% done); batch of {} took {:.2}s, \
         about {:.1} minutes remaining",
        completed,
        total,
        percent,
        batch_len,
        elapsed,
        remaining_minutes
    );
}
