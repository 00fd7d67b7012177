//! Sentence-level indicator matching.
//!
//! Splits a document into sentences and tests every compiled
//! matcher of every group against each sentence. Key properties:
//!
//! - Pure function of (text, dictionary), safe to run on any worker
//! - Sentences are lower-cased, trimmed and padded with a single
//!   space on each side so boundary patterns fire at sentence edges
//! - All matches of a sentence are collected before being recorded,
//!   so matcher order never changes the result

pub mod sentences;

pub use sentences::{Sentence, SentenceSplitter};

use crate::core::compiler::CompiledDictionary;
use crate::core::types::{DocumentMatches, SentenceMatch};

/// Normalize a sentence for boundary matching
pub fn normalize_sentence(sentence: &str) -> String {
    format!(" {} ", sentence.to_lowercase().trim())
}

/// Applies a compiled dictionary to document text
#[derive(Debug, Clone, Default)]
pub struct SentenceMatcher {
    splitter: SentenceSplitter,
}

impl SentenceMatcher {
    pub fn new(splitter: SentenceSplitter) -> Self {
        Self { splitter }
    }

    /// Match every sentence of a document against the dictionary
    ///
    /// Returns an empty result for empty text. Only groups with at
    /// least one matching sentence appear in the result.
    pub fn match_document(&self, text: &str, dictionary: &CompiledDictionary) -> DocumentMatches {
        let mut found = DocumentMatches::new();
        if dictionary.is_empty() {
            return found;
        }

        for sentence in self.splitter.split(text) {
            let padded = normalize_sentence(sentence.text);

            for group in dictionary.groups() {
                let phrases: Vec<String> = group
                    .matchers
                    .iter()
                    .filter(|m| m.is_match(&padded))
                    .map(|m| m.phrase().to_string())
                    .collect();

                if !phrases.is_empty() {
                    found.push(&group.path, SentenceMatch::new(phrases, sentence.index));
                }
            }
        }

        found
    }
}
