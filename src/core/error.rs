//! Error types and error handling for the indicator index.
//!
//! Errors fall into two classes. Fatal errors (a malformed
//! taxonomy, a contract violation between the compiler and the
//! matcher, bad configuration) abort the whole run. Per-document
//! errors are isolated: the document is recorded as failed and
//! excluded from aggregation while the batch carries on.

use thiserror::Error;

/// Result type alias for indicator index operations
pub type Result<T> = std::result::Result<T, IndexError>;

/// Main error type for the indicator index
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Taxonomy compilation failed at '{group}': {message}")]
    Compilation { group: String, message: String },

    #[error("Document '{document_id}' unavailable: {reason}")]
    DocumentUnavailable { document_id: String, reason: String },

    #[error("Matching assertion failed for document '{document_id}': {message}")]
    MatchingAssertion {
        document_id: String,
        message: String,
    },

    #[error("Aggregation inconsistency: group '{group}' is not in the compiled dictionary")]
    AggregationInconsistency { group: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl IndexError {
    /// Build a compilation error for a taxonomy node
    pub fn compilation(group: impl Into<String>, message: impl Into<String>) -> Self {
        IndexError::Compilation {
            group: group.into(),
            message: message.into(),
        }
    }

    /// Build a per-document unavailability error
    pub fn unavailable(document_id: impl Into<String>, reason: impl Into<String>) -> Self {
        IndexError::DocumentUnavailable {
            document_id: document_id.into(),
            reason: reason.into(),
        }
    }

    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this error must abort the whole run
    pub fn is_fatal(&self) -> bool {
        !self.is_per_document()
    }

    /// Check if this error only affects a single document
    pub fn is_per_document(&self) -> bool {
        matches!(self, IndexError::DocumentUnavailable { .. })
    }
}
