//! Indicator taxonomy tree.
//!
//! A taxonomy is a tree of named categories. Each node may declare a
//! list of indicator phrases and may own any number of named child
//! nodes. Taxonomies are usually loaded from a nested JSON document
//! in which a node is an object, its indicator list lives under the
//! `"indicators"` key, and every other object-valued key is a child.

use crate::core::error::{IndexError, Result};
use crate::core::types::{GROUP_SEPARATOR, ROOT_GROUP};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default key holding a node's indicator phrases
pub const DEFAULT_INDICATORS_KEY: &str = "indicators";

/// Deepest nesting accepted when loading a taxonomy
pub const MAX_DEPTH: usize = 64;

/// A single taxonomy node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyNode {
    /// Indicator phrases declared directly on this node
    pub indicators: Option<Vec<String>>,

    /// Named child nodes
    pub children: BTreeMap<String, TaxonomyNode>,
}

impl TaxonomyNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: declare indicator phrases on this node
    pub fn with_indicators<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indicators = Some(phrases.into_iter().map(Into::into).collect());
        self
    }

    /// Builder: attach a named child node
    pub fn with_child(mut self, name: impl Into<String>, child: TaxonomyNode) -> Self {
        self.children.insert(name.into(), child);
        self
    }

    /// Declared phrases, empty when the node has none
    pub fn phrases(&self) -> &[String] {
        self.indicators.as_deref().unwrap_or(&[])
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .values()
            .map(TaxonomyNode::node_count)
            .sum::<usize>()
    }

    fn from_value(value: &Value, path: &str, depth: usize, indicators_key: &str) -> Result<Self> {
        if depth > MAX_DEPTH {
            return Err(IndexError::compilation(
                path,
                format!("taxonomy nested deeper than {MAX_DEPTH} levels"),
            ));
        }

        let object = value
            .as_object()
            .ok_or_else(|| IndexError::compilation(path, "taxonomy node must be an object"))?;

        let mut node = TaxonomyNode::new();
        for (key, child) in object {
            if key == indicators_key {
                node.indicators = Some(parse_phrases(child, path)?);
            } else if child.is_object() {
                let child_path = format!("{path}{GROUP_SEPARATOR}{key}");
                let parsed = Self::from_value(child, &child_path, depth + 1, indicators_key)?;
                node.children.insert(key.clone(), parsed);
            }
            // Scalars and arrays under other keys are annotations, not nodes
        }

        Ok(node)
    }
}

fn parse_phrases(value: &Value, path: &str) -> Result<Vec<String>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(IndexError::compilation(
                path,
                format!("indicators must be a list of strings, found {}", kind(other)),
            ))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(phrase) => Ok(phrase.clone()),
            other => Err(IndexError::compilation(
                path,
                format!("indicator #{i} is not a string ({})", kind(other)),
            )),
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A complete indicator taxonomy rooted at the unnamed root node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    pub root: TaxonomyNode,
}

impl Taxonomy {
    pub fn new(root: TaxonomyNode) -> Self {
        Self { root }
    }

    /// Build a taxonomy from an already-parsed JSON value
    pub fn from_value(value: &Value, indicators_key: &str) -> Result<Self> {
        let root = TaxonomyNode::from_value(value, ROOT_GROUP, 0, indicators_key)?;
        Ok(Self { root })
    }

    /// Parse a taxonomy from JSON text using the default indicators key
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_json_str_with_key(json, DEFAULT_INDICATORS_KEY)
    }

    /// Parse a taxonomy from JSON text with a custom indicators key
    pub fn from_json_str_with_key(json: &str, indicators_key: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| IndexError::compilation(ROOT_GROUP, format!("invalid JSON: {e}")))?;
        Self::from_value(&value, indicators_key)
    }

    /// Load a taxonomy from a JSON file
    pub fn from_file(path: impl AsRef<Path>, indicators_key: &str) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            IndexError::compilation(
                ROOT_GROUP,
                format!("failed to read taxonomy {}: {e}", path.display()),
            )
        })?;
        tracing::debug!("Loaded taxonomy from {:?}", path);
        Self::from_json_str_with_key(&contents, indicators_key)
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}
