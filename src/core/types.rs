//! Core data types for the indicator index.
//!
//! This module defines the per-document match results produced by
//! the sentence matcher, location references, and run statistics
//! reported by the batch pipeline.

use crate::core::error::{IndexError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Separator between ancestor names in a group path
pub const GROUP_SEPARATOR: char = '>';

/// Name of the implicit root taxonomy node
pub const ROOT_GROUP: &str = "root";

/// Build a location reference (`<documentID>.<sentenceIndex>`)
pub fn location_ref(document_id: &str, sentence_index: usize) -> String {
    format!("{document_id}.{sentence_index}")
}

/// Indicator phrases of one group that fired on a single sentence
///
/// Serialized as a `[phrases, "sentence_index"]` pair, with the
/// index written as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SentencePair", try_from = "SentencePair")]
pub struct SentenceMatch {
    /// Original phrase text of every matcher that fired, in
    /// declaration order
    pub phrases: Vec<String>,

    /// Zero-based sentence index within the document
    pub sentence_index: usize,
}

impl SentenceMatch {
    pub fn new(phrases: Vec<String>, sentence_index: usize) -> Self {
        Self {
            phrases,
            sentence_index,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct SentencePair(Vec<String>, String);

impl From<SentenceMatch> for SentencePair {
    fn from(m: SentenceMatch) -> Self {
        SentencePair(m.phrases, m.sentence_index.to_string())
    }
}

impl TryFrom<SentencePair> for SentenceMatch {
    type Error = String;

    fn try_from(pair: SentencePair) -> std::result::Result<Self, Self::Error> {
        let sentence_index = pair
            .1
            .parse()
            .map_err(|_| format!("invalid sentence index '{}'", pair.1))?;
        Ok(SentenceMatch::new(pair.0, sentence_index))
    }
}

/// Match result for a single document
///
/// Maps group path to the ordered list of sentences that matched at
/// least one of the group's indicators. Groups without any matching
/// sentence are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentMatches {
    groups: BTreeMap<String, Vec<SentenceMatch>>,
}

impl DocumentMatches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sentence match to a group, creating the group on
    /// first use
    pub fn push(&mut self, group: &str, entry: SentenceMatch) {
        self.groups.entry(group.to_string()).or_default().push(entry);
    }

    /// Sentence matches recorded for a group
    pub fn get(&self, group: &str) -> Option<&[SentenceMatch]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SentenceMatch])> {
        self.groups.iter().map(|(g, m)| (g.as_str(), m.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of (phrase, sentence) hits across all groups
    pub fn hit_count(&self) -> usize {
        self.groups
            .values()
            .flat_map(|entries| entries.iter())
            .map(|entry| entry.phrases.len())
            .sum()
    }

    /// Check the structural contract of a match result
    ///
    /// Within each group, sentence indices must be strictly
    /// increasing and every entry must carry at least one phrase.
    pub fn verify(&self, document_id: &str) -> Result<()> {
        for (group, entries) in &self.groups {
            let mut previous: Option<usize> = None;
            for entry in entries {
                if entry.phrases.is_empty() {
                    return Err(IndexError::MatchingAssertion {
                        document_id: document_id.to_string(),
                        message: format!(
                            "group '{group}' has an empty phrase list for sentence {}",
                            entry.sentence_index
                        ),
                    });
                }
                if previous.is_some_and(|p| p >= entry.sentence_index) {
                    return Err(IndexError::MatchingAssertion {
                        document_id: document_id.to_string(),
                        message: format!(
                            "group '{group}' sentence indices out of order at {}",
                            entry.sentence_index
                        ),
                    });
                }
                previous = Some(entry.sentence_index);
            }
        }
        Ok(())
    }
}

/// A document's identifier together with its match result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub document_id: String,
    pub matches: DocumentMatches,
}

/// A document that could not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedDocument {
    pub document_id: String,
    pub reason: String,
}

/// Statistics from an index build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    /// Number of document IDs supplied to the run
    pub documents_total: usize,

    /// Documents matched and folded into the index
    pub documents_processed: usize,

    /// Documents skipped because their text was unavailable
    pub documents_failed: usize,

    /// Number of batches executed (including resumed ones)
    pub batches: usize,

    /// Groups present in the final index
    pub groups: usize,

    /// Total location references in the final index
    pub location_refs: usize,

    /// Build duration in milliseconds
    pub duration_ms: u64,

    /// When the run started
    pub started_at: DateTime<Utc>,
}
