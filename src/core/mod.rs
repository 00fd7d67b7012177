//! Core domain logic (CLI-agnostic)
//!
//! This module contains all indexing logic that is independent of
//! how a run is invoked.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Match results and run statistics
//! - **taxonomy**: Hierarchical indicator definitions
//! - **compiler**: Taxonomy to matcher dictionary
//! - **matcher**: Sentence splitting and phrase matching
//! - **aggregator**: Inverted index construction
//! - **source**: Document text providers
//! - **executor**: Sequential and thread-pool task execution
//! - **storage**: ID lists, checkpoints and output files
//! - **pipeline**: Batched end-to-end index build
//! - **services**: Unified service container

pub mod aggregator;
pub mod compiler;
pub mod config;
pub mod error;
pub mod executor;
pub mod matcher;
pub mod pipeline;
pub mod services;
pub mod source;
pub mod storage;
pub mod taxonomy;
pub mod types;

// Re-export key types for convenience
pub use aggregator::InvertedIndex;
pub use compiler::{CompiledDictionary, SchemaCompiler};
pub use config::Config;
pub use error::{IndexError, Result};
pub use pipeline::{IndexingPipeline, PipelineOptions, RunReport};
pub use services::Services;
pub use taxonomy::Taxonomy;
