//! Aggregate command - fold saved per-document results into an index

use crate::cli::output::{colors, format_count, format_duration};
use crate::cli::OutputFormat;
use crate::core::aggregator::InvertedIndex;
use crate::core::services::Services;
use crate::core::storage::{load_processed, save_index};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Arguments for the aggregate command
#[derive(Args, Debug)]
pub struct AggregateArgs {
    /// Per-document results file written by `build --processed`
    pub input: PathBuf,

    /// Where to write the inverted index (defaults to the configured path)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Taxonomy the results were matched against (defaults to the configured taxonomy)
    #[arg(long, short = 't')]
    pub taxonomy: Option<PathBuf>,
}

/// Aggregate result response
#[derive(Debug, Serialize)]
pub struct AggregateResponse {
    pub input: String,
    pub index_path: String,
    pub documents: usize,
    pub groups: usize,
    pub location_refs: usize,
    pub duration_secs: f64,
}

/// Execute the aggregate command
pub fn execute(
    args: AggregateArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let index_path = args
        .output
        .unwrap_or_else(|| services.config.output.index_path.clone());

    let mut config = (*services.config).clone();
    if let Some(path) = args.taxonomy {
        config.taxonomy.path = path;
    }
    let dictionary = Services::new(config).compile_dictionary()?;

    let processed = load_processed(&args.input)?;
    let documents = processed.len();
    let results: Vec<_> = processed
        .into_iter()
        .map(|doc| (doc.document_id, doc.matches))
        .collect();
    let index = InvertedIndex::par_fold_checked(&dictionary, results)?;
    save_index(&index_path, &index)?;

    let response = AggregateResponse {
        input: args.input.to_string_lossy().into_owned(),
        index_path: index_path.to_string_lossy().into_owned(),
        documents,
        groups: index.group_count(),
        location_refs: index.location_count(),
        duration_secs: start.elapsed().as_secs_f64(),
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{} {} documents into {} groups ({} references) in {}",
                colors::success("Aggregated"),
                format_count(response.documents),
                format_count(response.groups),
                format_count(response.location_refs),
                colors::number(&format_duration(response.duration_secs))
            );
            println!("Index: {}", colors::file_path(&response.index_path));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
