//! Configuration management for the indicator index.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::compiler::DEFAULT_STRUCTURAL_TOKEN;
use crate::core::error::{IndexError, Result};
use crate::core::pipeline::{PipelineOptions, DEFAULT_BATCH_SIZE};
use crate::core::source::CorpusFormat;
use crate::core::taxonomy::DEFAULT_INDICATORS_KEY;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "INDICATOR_INDEX_CONFIG";

/// Config file name in the working directory
pub const LOCAL_CONFIG_FILE: &str = "indicator-index.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Taxonomy configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaxonomyConfig {
    /// Path to the taxonomy JSON file
    #[serde(default = "default_taxonomy_path")]
    pub path: PathBuf,

    /// Path segment elided from group paths
    #[serde(default = "default_structural_token")]
    pub structural_token: String,

    /// Key holding a node's indicator phrases
    #[serde(default = "default_indicators_key")]
    pub indicators_key: String,
}

/// Corpus configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    /// Directory holding one file per document
    #[serde(default = "default_documents_dir")]
    pub documents_dir: PathBuf,

    /// Document file format
    #[serde(default)]
    pub format: CorpusFormat,

    /// Optional list of document IDs (one per line); when absent
    /// IDs are discovered from `documents_dir`
    #[serde(default)]
    pub ids_file: Option<PathBuf>,

    /// Strip reference tags and list lines from JSON articles
    #[serde(default = "default_clean_markup")]
    pub clean_markup: bool,
}

/// Execution configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExecutionConfig {
    /// Worker threads used for matching
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Documents per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Checkpoint file written after each batch
    #[serde(default)]
    pub checkpoint_path: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Where the inverted index is written
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,

    /// Where raw per-document results are written (optional)
    #[serde(default)]
    pub processed_path: Option<PathBuf>,
}

// Default value functions
fn default_taxonomy_path() -> PathBuf {
    PathBuf::from("structured-output-schema.json")
}

fn default_structural_token() -> String {
    DEFAULT_STRUCTURAL_TOKEN.to_string()
}

fn default_indicators_key() -> String {
    DEFAULT_INDICATORS_KEY.to_string()
}

fn default_documents_dir() -> PathBuf {
    PathBuf::from("./articles")
}

fn default_clean_markup() -> bool {
    true
}

fn default_workers() -> usize {
    20
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_index_path() -> PathBuf {
    PathBuf::from("compounded_index.json")
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            path: default_taxonomy_path(),
            structural_token: default_structural_token(),
            indicators_key: default_indicators_key(),
        }
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            documents_dir: default_documents_dir(),
            format: CorpusFormat::default(),
            ids_file: None,
            clean_markup: default_clean_markup(),
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            batch_size: default_batch_size(),
            checkpoint_path: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
            processed_path: None,
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| IndexError::Config(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Per-user config file (`~/.config/indicator-index/config.toml`)
    pub fn user_config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("indicator-index").join("config.toml"))
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// File lookup order:
    /// 1. `explicit` path (e.g. from `--config`)
    /// 2. INDICATOR_INDEX_CONFIG env var
    /// 3. User config file
    /// 4. ./indicator-index.toml
    /// 5. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit {
            Self::from_file(path)?
        } else if let Ok(path) = env::var(CONFIG_ENV) {
            Self::from_file(path)?
        } else {
            match Self::user_config_file().filter(|p| p.exists()) {
                Some(path) => Self::from_file(path)?,
                None if Path::new(LOCAL_CONFIG_FILE).exists() => {
                    Self::from_file(LOCAL_CONFIG_FILE)?
                }
                None => Self::default(),
            }
        };

        // Override with environment variables
        config.merge_env();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(path) = env::var("INDICATOR_INDEX_TAXONOMY") {
            self.taxonomy.path = PathBuf::from(path);
        }
        if let Ok(dir) = env::var("INDICATOR_INDEX_DOCUMENTS_DIR") {
            self.corpus.documents_dir = PathBuf::from(dir);
        }
        if let Ok(workers) = env::var("INDICATOR_INDEX_WORKERS") {
            if let Ok(w) = workers.parse() {
                self.execution.workers = w;
            }
        }
        if let Ok(batch_size) = env::var("INDICATOR_INDEX_BATCH_SIZE") {
            if let Ok(b) = batch_size.parse() {
                self.execution.batch_size = b;
            }
        }
        if let Ok(output) = env::var("INDICATOR_INDEX_OUTPUT") {
            self.output.index_path = PathBuf::from(output);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.taxonomy.structural_token.is_empty() {
            return Err(IndexError::Config(
                "Structural token must not be empty".to_string(),
            ));
        }

        if self.taxonomy.indicators_key.is_empty() {
            return Err(IndexError::Config(
                "Indicators key must not be empty".to_string(),
            ));
        }

        if self.execution.workers == 0 {
            return Err(IndexError::Config(
                "Worker count must be non-zero".to_string(),
            ));
        }

        if self.execution.batch_size == 0 {
            return Err(IndexError::Config(
                "Batch size must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Pipeline options derived from this configuration
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            batch_size: self.execution.batch_size,
            keep_processed: self.output.processed_path.is_some(),
            checkpoint_path: self.execution.checkpoint_path.clone(),
        }
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Taxonomy: {:?}", self.taxonomy.path);
        tracing::info!("  Structural token: {}", self.taxonomy.structural_token);
        tracing::info!("  Documents dir: {:?}", self.corpus.documents_dir);
        tracing::info!("  Format: {}", self.corpus.format);
        tracing::info!("  IDs file: {:?}", self.corpus.ids_file);
        tracing::info!("  Workers: {}", self.execution.workers);
        tracing::info!("  Batch size: {}", self.execution.batch_size);
        tracing::info!("  Checkpoint: {:?}", self.execution.checkpoint_path);
        tracing::info!("  Index output: {:?}", self.output.index_path);
    }
}
