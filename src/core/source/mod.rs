//! Document sources.
//!
//! A [`DocumentSource`] turns a document ID into cleaned plain text.
//! Failures are reported as [`IndexError::DocumentUnavailable`] so the
//! pipeline can skip the document without aborting the batch; a
//! missing or corrupt document is never treated as empty text.
//!
//! Provided sources:
//!
//! - [`InMemorySource`]: fixed map of ID to text
//! - [`TextDirSource`]: `<dir>/<id>.txt`
//! - [`JsonArticleSource`]: `<dir>/<id>.json` with the body in `"text"`

pub mod clean;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::error::{IndexError, Result};

/// Supplies plain-text document bodies by ID
pub trait DocumentSource: Send + Sync {
    /// Fetch the cleaned text of a document
    fn get_text(&self, document_id: &str) -> Result<String>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for Box<S> {
    fn get_text(&self, document_id: &str) -> Result<String> {
        (**self).get_text(document_id)
    }
}

/// On-disk layout of a corpus directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusFormat {
    /// One JSON article per document with its body under `"text"`
    #[default]
    Json,
    /// One plain-text file per document
    Text,
}

impl CorpusFormat {
    /// File extension used for documents of this format
    pub fn extension(&self) -> &'static str {
        match self {
            CorpusFormat::Json => "json",
            CorpusFormat::Text => "txt",
        }
    }
}

impl fmt::Display for CorpusFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CorpusFormat::Json => "json",
            CorpusFormat::Text => "text",
        })
    }
}

impl FromStr for CorpusFormat {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(CorpusFormat::Json),
            "text" | "txt" => Ok(CorpusFormat::Text),
            other => Err(IndexError::Config(format!(
                "Unknown corpus format '{other}' (expected 'json' or 'text')"
            ))),
        }
    }
}

/// Open a directory-backed source for the given format
pub fn open_directory(
    dir: impl Into<PathBuf>,
    format: CorpusFormat,
    clean_markup: bool,
) -> Box<dyn DocumentSource> {
    match format {
        CorpusFormat::Json => Box::new(JsonArticleSource::new(dir, clean_markup)),
        CorpusFormat::Text => Box::new(TextDirSource::new(dir)),
    }
}

/// Fixed in-memory documents
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    documents: HashMap<String, String>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a document
    pub fn with_document(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.insert(id.into(), text.into());
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(id.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentSource for InMemorySource {
    fn get_text(&self, document_id: &str) -> Result<String> {
        self.documents
            .get(document_id)
            .cloned()
            .ok_or_else(|| IndexError::unavailable(document_id, "no such document"))
    }
}

/// Plain-text files named `<id>.txt`
#[derive(Debug, Clone)]
pub struct TextDirSource {
    dir: PathBuf,
}

impl TextDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DocumentSource for TextDirSource {
    fn get_text(&self, document_id: &str) -> Result<String> {
        let path = document_path(&self.dir, document_id, "txt")?;
        read_document(&path, document_id)
    }
}

/// JSON articles named `<id>.json`, body in the `"text"` field
#[derive(Debug, Clone)]
pub struct JsonArticleSource {
    dir: PathBuf,
    clean_markup: bool,
}

impl JsonArticleSource {
    pub fn new(dir: impl Into<PathBuf>, clean_markup: bool) -> Self {
        Self {
            dir: dir.into(),
            clean_markup,
        }
    }
}

impl DocumentSource for JsonArticleSource {
    fn get_text(&self, document_id: &str) -> Result<String> {
        let path = document_path(&self.dir, document_id, "json")?;
        let contents = read_document(&path, document_id)?;

        let article: serde_json::Value = serde_json::from_str(&contents)
            .map_err(|e| IndexError::unavailable(document_id, format!("corrupt JSON: {e}")))?;

        let text = article
            .get("text")
            .and_then(|t| t.as_str())
            .ok_or_else(|| IndexError::unavailable(document_id, "article has no \"text\" field"))?;

        if self.clean_markup {
            Ok(clean::clean_markup(text))
        } else {
            Ok(text.to_string())
        }
    }
}

/// Resolve `<dir>/<id>.<ext>`, refusing IDs that escape the directory
fn document_path(dir: &Path, document_id: &str, extension: &str) -> Result<PathBuf> {
    let trimmed = document_id.trim();
    if trimmed.is_empty()
        || trimmed.contains(['/', '\\'])
        || trimmed == ".."
        || trimmed.starts_with('.')
    {
        return Err(IndexError::unavailable(
            document_id,
            "invalid document ID for a file-backed source",
        ));
    }
    Ok(dir.join(format!("{trimmed}.{extension}")))
}

fn read_document(path: &Path, document_id: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::InvalidData {
            IndexError::unavailable(document_id, format!("non-UTF-8 file {path:?}"))
        } else {
            IndexError::unavailable(document_id, format!("failed to read {path:?}: {e}"))
        }
    })
}
