//! Build command - run the full indexing pipeline over a corpus

use crate::cli::output::{colors, format_count, format_duration, print_warning};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use crate::core::source::CorpusFormat;
use crate::core::storage::{save_index, save_processed, Checkpoint};
use crate::core::types::{FailedDocument, RunStats};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Failed documents listed in human output before truncating
const MAX_FAILED_SHOWN: usize = 10;

/// Arguments for the build command
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Taxonomy JSON file
    #[arg(long, short = 't')]
    pub taxonomy: Option<PathBuf>,

    /// Directory holding the documents
    #[arg(long, short = 'd')]
    pub documents: Option<PathBuf>,

    /// Document file format (json or text)
    #[arg(long)]
    pub corpus_format: Option<CorpusFormat>,

    /// File listing document IDs, one per line
    #[arg(long)]
    pub ids: Option<PathBuf>,

    /// Worker threads
    #[arg(long, short = 'w')]
    pub workers: Option<usize>,

    /// Documents per batch
    #[arg(long, short = 'b')]
    pub batch_size: Option<usize>,

    /// Checkpoint file for resuming an interrupted build
    #[arg(long)]
    pub checkpoint: Option<PathBuf>,

    /// Where to write the inverted index
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Also write raw per-document results here
    #[arg(long)]
    pub processed: Option<PathBuf>,

    /// Keep reference tags and list lines in JSON articles
    #[arg(long)]
    pub no_clean: bool,

    /// Keep the checkpoint file after a successful build
    #[arg(long)]
    pub keep_checkpoint: bool,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl BuildArgs {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &Config) -> crate::core::error::Result<Config> {
        let mut config = config.clone();
        if let Some(path) = &self.taxonomy {
            config.taxonomy.path = path.clone();
        }
        if let Some(dir) = &self.documents {
            config.corpus.documents_dir = dir.clone();
        }
        if let Some(format) = self.corpus_format {
            config.corpus.format = format;
        }
        if let Some(ids) = &self.ids {
            config.corpus.ids_file = Some(ids.clone());
        }
        if self.no_clean {
            config.corpus.clean_markup = false;
        }
        if let Some(workers) = self.workers {
            config.execution.workers = workers;
        }
        if let Some(batch_size) = self.batch_size {
            config.execution.batch_size = batch_size;
        }
        if let Some(path) = &self.checkpoint {
            config.execution.checkpoint_path = Some(path.clone());
        }
        if let Some(path) = &self.output {
            config.output.index_path = path.clone();
        }
        if let Some(path) = &self.processed {
            config.output.processed_path = Some(path.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

/// Build result response
#[derive(Debug, Serialize)]
pub struct BuildResponse {
    pub index_path: String,
    pub processed_path: Option<String>,
    pub stats: RunStats,
    pub failed: Vec<FailedDocument>,
    pub duration_secs: f64,
}

/// Execute the build command
pub fn execute(
    args: BuildArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let services = Services::new(args.apply(&services.config)?);
    let config = Arc::clone(&services.config);
    config.log_config();

    let dictionary = Arc::new(services.compile_dictionary()?);
    let ids = services.load_ids()?;
    if ids.is_empty() {
        print_warning("No documents to index");
    }

    if !args.quiet && format == OutputFormat::Human {
        eprintln!(
            "Indexing {} documents from {} ({} groups, {} workers)...",
            colors::number(&ids.len().to_string()),
            colors::file_path(&config.corpus.documents_dir.display().to_string()),
            colors::number(&dictionary.len().to_string()),
            colors::number(&config.execution.workers.to_string())
        );
    }

    let pipeline = services.create_pipeline(dictionary)?;
    let executor = services.create_executor()?;
    let report = pipeline.run(&ids, &executor)?;

    save_index(&config.output.index_path, &report.index)?;
    if let (Some(path), Some(processed)) = (&config.output.processed_path, &report.processed) {
        save_processed(path, processed)?;
    }
    if let Some(path) = &config.execution.checkpoint_path {
        if !args.keep_checkpoint {
            Checkpoint::remove(path)?;
        }
    }

    let response = BuildResponse {
        index_path: config.output.index_path.to_string_lossy().into_owned(),
        processed_path: config
            .output
            .processed_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned()),
        duration_secs: report.stats.duration_ms as f64 / 1000.0,
        stats: report.stats,
        failed: report.failed,
    };

    match format {
        OutputFormat::Human => print_human(&response),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

fn print_human(response: &BuildResponse) {
    let stats = &response.stats;
    println!(
        "{} {} documents in {} ({} batches)",
        colors::success("Indexed"),
        format_count(stats.documents_processed),
        colors::number(&format_duration(response.duration_secs)),
        format_count(stats.batches)
    );
    println!(
        "Groups: {}  References: {}",
        format_count(stats.groups),
        format_count(stats.location_refs)
    );
    println!(
        "Index: {}",
        colors::file_path(&response.index_path)
    );
    if let Some(path) = &response.processed_path {
        println!("Per-document results: {}", colors::file_path(path));
    }

    if !response.failed.is_empty() {
        print_warning(&format!(
            "{} documents could not be read",
            response.failed.len()
        ));
        for failed in response.failed.iter().take(MAX_FAILED_SHOWN) {
            eprintln!(
                "  {} {}",
                failed.document_id,
                colors::dim(&failed.reason)
            );
        }
        if response.failed.len() > MAX_FAILED_SHOWN {
            eprintln!(
                "  {}",
                colors::dim(&format!(
                    "... and {} more",
                    response.failed.len() - MAX_FAILED_SHOWN
                ))
            );
        }
    }
}
