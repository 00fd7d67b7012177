//! Indicator Index - sentence-level occurrence index over text corpora
//!
//! Given a hierarchical taxonomy of named indicator phrases and a large
//! corpus of free-text documents, finds every sentence that mentions an
//! indicator and aggregates the findings into an inverted index from
//! each (group, phrase) to its `document.sentence` locations.
//!
//! # Architecture
//!
//! - **core**: Domain logic (CLI-agnostic)
//!   - taxonomy, compiler (taxonomy to matcher dictionary)
//!   - matcher (sentence splitting, boundary matching)
//!   - aggregator (inverted index)
//!   - source, executor, pipeline, storage
//!   - config, error, types, services
//!
//! - **cli**: Command-line adapter (depends on core)
//!
//! # Example
//!
//! ```
//! use indicator_index::{InvertedIndex, SchemaCompiler, Taxonomy};
//! use indicator_index::core::matcher::SentenceMatcher;
//!
//! let taxonomy = Taxonomy::from_json_str(
//!     r#"{"symptoms": {"indicators": ["fever", "cough"]}}"#,
//! ).unwrap();
//! let dictionary = SchemaCompiler::default().compile(&taxonomy).unwrap();
//!
//! let matches = SentenceMatcher::default()
//!     .match_document("He had a fever. Then a cough.", &dictionary);
//! let index = InvertedIndex::new().accumulate("doc7", &matches);
//!
//! assert_eq!(index.locations("root>symptoms", "cough").unwrap(), ["doc7.1"]);
//! ```

// Core domain logic (CLI-agnostic)
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use crate::core::aggregator::InvertedIndex;
pub use crate::core::compiler::{CompiledDictionary, SchemaCompiler};
pub use crate::core::config::Config;
pub use crate::core::error::{IndexError, Result};
pub use crate::core::services::Services;
pub use crate::core::taxonomy::Taxonomy;
pub use crate::core::types::*;
