//! Unified service container
//!
//! Provides shared access to configuration and builds the pieces of
//! an index run from it.

use crate::core::compiler::{CompiledDictionary, SchemaCompiler};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::executor::RayonExecutor;
use crate::core::pipeline::IndexingPipeline;
use crate::core::source::{open_directory, DocumentSource};
use crate::core::storage::{discover_ids, read_id_list};
use crate::core::taxonomy::Taxonomy;
use std::sync::Arc;

/// Unified services container
///
/// Every CLI command goes through this struct.
#[derive(Clone)]
pub struct Services {
    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Load the configured taxonomy
    pub fn load_taxonomy(&self) -> Result<Taxonomy> {
        let taxonomy = &self.config.taxonomy;
        Taxonomy::from_file(&taxonomy.path, &taxonomy.indicators_key)
    }

    /// Load and compile the configured taxonomy
    pub fn compile_dictionary(&self) -> Result<CompiledDictionary> {
        let taxonomy = self.load_taxonomy()?;
        let dictionary =
            SchemaCompiler::new(self.config.taxonomy.structural_token.clone()).compile(&taxonomy)?;

        tracing::info!(
            "Compiled {} groups with {} matchers from {:?}",
            dictionary.len(),
            dictionary.matcher_count(),
            self.config.taxonomy.path
        );
        Ok(dictionary)
    }

    /// Document source for the configured corpus
    pub fn create_source(&self) -> Box<dyn DocumentSource> {
        let corpus = &self.config.corpus;
        open_directory(
            corpus.documents_dir.clone(),
            corpus.format,
            corpus.clean_markup,
        )
    }

    /// Worker pool sized from the configuration
    pub fn create_executor(&self) -> Result<RayonExecutor> {
        RayonExecutor::new(self.config.execution.workers)
    }

    /// Create an IndexingPipeline over the configured corpus
    pub fn create_pipeline(&self, dictionary: Arc<CompiledDictionary>) -> Result<IndexingPipeline> {
        IndexingPipeline::new(
            dictionary,
            self.create_source(),
            self.config.pipeline_options(),
        )
    }

    /// Document IDs to index
    ///
    /// Read from the configured ID list when one is set, otherwise
    /// discovered from the documents directory.
    pub fn load_ids(&self) -> Result<Vec<String>> {
        let corpus = &self.config.corpus;
        match &corpus.ids_file {
            Some(path) => read_id_list(path),
            None => discover_ids(&corpus.documents_dir, corpus.format.extension()),
        }
    }
}
