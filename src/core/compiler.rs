//! Indicator dictionary compilation.
//!
//! Walks a [`Taxonomy`] and turns every node that declares indicator
//! phrases into a group of boundary-anchored, case-insensitive
//! matchers keyed by the node's group path.
//!
//! # Example
//!
//! ```
//! use indicator_index::core::compiler::SchemaCompiler;
//! use indicator_index::core::taxonomy::Taxonomy;
//!
//! let taxonomy = Taxonomy::from_json_str(
//!     r#"{"conditions": {"respiratory": {"indicators": ["copd", "asthma"]}}}"#,
//! )
//! .unwrap();
//! let dictionary = SchemaCompiler::default().compile(&taxonomy).unwrap();
//!
//! let group = dictionary.group("root>conditions>respiratory").unwrap();
//! assert_eq!(group.matchers.len(), 2);
//! assert!(group.matchers[0].is_match(" he has copd. "));
//! ```

use std::collections::HashMap;

use regex::Regex;

use crate::core::error::{IndexError, Result};
use crate::core::taxonomy::{Taxonomy, TaxonomyNode};
use crate::core::types::{GROUP_SEPARATOR, ROOT_GROUP};

/// Default structural token elided from group paths
pub const DEFAULT_STRUCTURAL_TOKEN: &str = "refinements";

/// An indicator phrase paired with its compiled boundary pattern
#[derive(Debug, Clone)]
pub struct IndicatorMatcher {
    phrase: String,
    pattern: Regex,
}

impl IndicatorMatcher {
    /// Compile a phrase into a word-boundary anchored matcher
    ///
    /// The phrase is escaped, so characters such as `(` or `+` are
    /// matched literally. The pattern only fires when the phrase is
    /// surrounded by non-alphanumeric characters, which is why
    /// sentences are padded with spaces before matching.
    pub fn new(phrase: &str) -> std::result::Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r"(?i)[^a-z0-9]({})[^a-z0-9]",
            regex::escape(phrase)
        ))?;
        Ok(Self {
            phrase: phrase.to_string(),
            pattern,
        })
    }

    /// The original phrase text
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Test the matcher against a normalized (padded) sentence
    pub fn is_match(&self, normalized: &str) -> bool {
        self.pattern.is_match(normalized)
    }
}

/// All matchers compiled for one taxonomy node
#[derive(Debug, Clone)]
pub struct IndicatorGroup {
    /// Group path, e.g. `root>conditions>respiratory`
    pub path: String,

    /// One matcher per declared phrase, in declaration order
    pub matchers: Vec<IndicatorMatcher>,
}

/// Immutable mapping from group path to compiled matchers
///
/// Built once per run and shared read-only by every worker.
#[derive(Debug, Clone, Default)]
pub struct CompiledDictionary {
    groups: Vec<IndicatorGroup>,
    positions: HashMap<String, usize>,
}

impl CompiledDictionary {
    /// Groups in taxonomy traversal order
    pub fn groups(&self) -> &[IndicatorGroup] {
        &self.groups
    }

    pub fn group(&self, path: &str) -> Option<&IndicatorGroup> {
        self.positions.get(path).map(|&i| &self.groups[i])
    }

    pub fn contains(&self, path: &str) -> bool {
        self.positions.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of matchers across all groups
    pub fn matcher_count(&self) -> usize {
        self.groups.iter().map(|g| g.matchers.len()).sum()
    }

    fn insert(&mut self, path: String, matchers: Vec<IndicatorMatcher>) {
        match self.positions.get(&path) {
            Some(&i) => {
                // Elision can map two nodes onto one path
                tracing::debug!("Merging indicators into existing group {}", path);
                self.groups[i].matchers.extend(matchers);
            }
            None => {
                self.positions.insert(path.clone(), self.groups.len());
                self.groups.push(IndicatorGroup { path, matchers });
            }
        }
    }
}

/// Compiles taxonomies into indicator dictionaries
#[derive(Debug, Clone)]
pub struct SchemaCompiler {
    /// Path segment dropped from group paths
    structural_token: String,
}

impl Default for SchemaCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_STRUCTURAL_TOKEN)
    }
}

impl SchemaCompiler {
    pub fn new(structural_token: impl Into<String>) -> Self {
        Self {
            structural_token: structural_token.into(),
        }
    }

    /// Compile every node of the taxonomy that declares indicators
    ///
    /// Fails on the first phrase that cannot be compiled; there is
    /// no partial dictionary.
    pub fn compile(&self, taxonomy: &Taxonomy) -> Result<CompiledDictionary> {
        let mut dictionary = CompiledDictionary::default();
        let mut segments = vec![ROOT_GROUP.to_string()];
        self.visit(&taxonomy.root, &mut segments, &mut dictionary)?;

        tracing::info!(
            "Compiled {} indicator groups ({} matchers)",
            dictionary.len(),
            dictionary.matcher_count()
        );
        Ok(dictionary)
    }

    fn visit(
        &self,
        node: &TaxonomyNode,
        segments: &mut Vec<String>,
        dictionary: &mut CompiledDictionary,
    ) -> Result<()> {
        let phrases = node.phrases();
        if !phrases.is_empty() {
            let path = self.group_path(segments);
            let matchers = phrases
                .iter()
                .map(|phrase| compile_phrase(&path, phrase))
                .collect::<Result<Vec<_>>>()?;
            dictionary.insert(path, matchers);
        }

        for (name, child) in &node.children {
            segments.push(name.clone());
            self.visit(child, segments, dictionary)?;
            segments.pop();
        }

        Ok(())
    }

    /// Join path segments, dropping the structural token
    ///
    /// Only intermediate segments are elided; a node named after the
    /// token keeps it as its own last segment.
    fn group_path(&self, segments: &[String]) -> String {
        let separator = GROUP_SEPARATOR.to_string();
        let last = segments.len().saturating_sub(1);
        segments
            .iter()
            .enumerate()
            .filter(|(i, s)| *i == 0 || *i == last || **s != self.structural_token)
            .map(|(_, s)| s.as_str())
            .collect::<Vec<_>>()
            .join(&separator)
    }
}

fn compile_phrase(group: &str, phrase: &str) -> Result<IndicatorMatcher> {
    if phrase.trim().is_empty() {
        return Err(IndexError::compilation(group, "empty indicator phrase"));
    }
    IndicatorMatcher::new(phrase).map_err(|e| {
        IndexError::compilation(group, format!("cannot compile phrase '{phrase}': {e}"))
    })
}
