//! Inverted index construction.
//!
//! Folds per-document match results into a single index mapping
//! group path -> indicator phrase -> location references
//! (`<documentID>.<sentenceIndex>`). Groups and phrases are created
//! on first occurrence and duplicates are kept: every (phrase,
//! sentence) hit contributes exactly one reference.
//!
//! Folding is order-independent with respect to which document is
//! processed when. Only the order of references inside a single
//! location list depends on processing order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::compiler::CompiledDictionary;
use crate::core::error::{IndexError, Result};
use crate::core::types::{location_ref, DocumentMatches};

/// Phrase -> location references for one group
pub type PhraseLocations = BTreeMap<String, Vec<String>>;

/// Group -> phrase -> location references
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    groups: BTreeMap<String, PhraseLocations>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every hit of one document to the index
    pub fn add_document(&mut self, document_id: &str, matches: &DocumentMatches) {
        for (group, entries) in matches.iter() {
            let phrases = self.groups.entry(group.to_string()).or_default();
            for entry in entries {
                let location = location_ref(document_id, entry.sentence_index);
                for phrase in &entry.phrases {
                    phrases
                        .entry(phrase.clone())
                        .or_default()
                        .push(location.clone());
                }
            }
        }
    }

    /// Reduction step: fold one document into the index and return it
    pub fn accumulate(mut self, document_id: &str, matches: &DocumentMatches) -> Self {
        self.add_document(document_id, matches);
        self
    }

    /// Check one document's results against the dictionary
    ///
    /// A group missing from the dictionary, or a structurally
    /// broken match result, means the compiler and matcher disagree
    /// and the run must stop.
    pub fn check(
        dictionary: &CompiledDictionary,
        document_id: &str,
        matches: &DocumentMatches,
    ) -> Result<()> {
        matches.verify(document_id)?;
        if let Some((group, _)) = matches.iter().find(|(g, _)| !dictionary.contains(g)) {
            return Err(IndexError::AggregationInconsistency {
                group: group.to_string(),
            });
        }
        Ok(())
    }

    /// Fold one document after checking it against the dictionary
    ///
    /// Nothing is added on failure.
    pub fn accumulate_checked(
        &mut self,
        dictionary: &CompiledDictionary,
        document_id: &str,
        matches: &DocumentMatches,
    ) -> Result<()> {
        Self::check(dictionary, document_id, matches)?;
        self.add_document(document_id, matches);
        Ok(())
    }

    /// Sequentially fold a stream of per-document results
    pub fn fold<I, S>(results: I) -> Self
    where
        I: IntoIterator<Item = (S, DocumentMatches)>,
        S: AsRef<str>,
    {
        results
            .into_iter()
            .fold(Self::new(), |index, (id, matches)| {
                index.accumulate(id.as_ref(), &matches)
            })
    }

    /// Fold results on the rayon pool using per-worker partial
    /// indexes merged pairwise
    pub fn par_fold<S>(results: Vec<(S, DocumentMatches)>) -> Self
    where
        S: AsRef<str> + Send,
    {
        results
            .into_par_iter()
            .fold(Self::new, |index, (id, matches)| {
                index.accumulate(id.as_ref(), &matches)
            })
            .reduce(Self::new, Self::merged)
    }

    /// Check every result against the dictionary, then `par_fold`
    ///
    /// Fails on the first inconsistent document without building
    /// anything.
    pub fn par_fold_checked<S>(
        dictionary: &CompiledDictionary,
        results: Vec<(S, DocumentMatches)>,
    ) -> Result<Self>
    where
        S: AsRef<str> + Send + Sync,
    {
        results
            .par_iter()
            .try_for_each(|(id, matches)| Self::check(dictionary, id.as_ref(), matches))?;
        Ok(Self::par_fold(results))
    }

    /// Move every reference of `other` into this index
    pub fn merge(&mut self, other: InvertedIndex) {
        for (group, phrases) in other.groups {
            let target = self.groups.entry(group).or_default();
            for (phrase, mut locations) in phrases {
                target.entry(phrase).or_default().append(&mut locations);
            }
        }
    }

    /// Merge two indexes into one
    pub fn merged(mut self, other: InvertedIndex) -> Self {
        self.merge(other);
        self
    }

    pub fn group(&self, group: &str) -> Option<&PhraseLocations> {
        self.groups.get(group)
    }

    /// Location references for a (group, phrase) pair
    pub fn locations(&self, group: &str, phrase: &str) -> Option<&[String]> {
        self.groups
            .get(group)
            .and_then(|p| p.get(phrase))
            .map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PhraseLocations)> {
        self.groups.iter().map(|(g, p)| (g.as_str(), p))
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of location references
    pub fn location_count(&self) -> usize {
        self.groups
            .values()
            .flat_map(|p| p.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Copy with every location list sorted
    ///
    /// Useful for comparing indexes built in different orders.
    pub fn normalized(&self) -> Self {
        let mut copy = self.clone();
        for phrases in copy.groups.values_mut() {
            for locations in phrases.values_mut() {
                locations.sort();
            }
        }
        copy
    }
}
