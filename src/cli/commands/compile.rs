//! Compile command - compile a taxonomy and list its groups

use crate::cli::output::{colors, format_count};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the compile command
#[derive(Args, Debug, Default)]
pub struct CompileArgs {
    /// Taxonomy JSON file (defaults to the configured taxonomy)
    pub taxonomy: Option<PathBuf>,

    /// Path segment to elide from group paths
    #[arg(long)]
    pub structural_token: Option<String>,

    /// Key holding a node's indicator phrases
    #[arg(long)]
    pub indicators_key: Option<String>,

    /// Only print group paths
    #[arg(long, short = 'g')]
    pub groups_only: bool,
}

/// One compiled group
#[derive(Debug, Serialize)]
pub struct GroupSummary {
    pub path: String,
    pub phrases: Vec<String>,
}

/// Compile result response
#[derive(Debug, Serialize)]
pub struct CompileResponse {
    pub taxonomy: String,
    pub group_count: usize,
    pub matcher_count: usize,
    pub groups: Vec<GroupSummary>,
}

/// Execute the compile command
pub fn execute(
    args: CompileArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = (*services.config).clone();
    if let Some(path) = args.taxonomy {
        config.taxonomy.path = path;
    }
    if let Some(token) = args.structural_token {
        config.taxonomy.structural_token = token;
    }
    if let Some(key) = args.indicators_key {
        config.taxonomy.indicators_key = key;
    }
    config.validate()?;

    let services = Services::new(config);
    let dictionary = services.compile_dictionary()?;

    let response = CompileResponse {
        taxonomy: services.config.taxonomy.path.to_string_lossy().into_owned(),
        group_count: dictionary.len(),
        matcher_count: dictionary.matcher_count(),
        groups: dictionary
            .groups()
            .iter()
            .map(|group| GroupSummary {
                path: group.path.clone(),
                phrases: group
                    .matchers
                    .iter()
                    .map(|m| m.phrase().to_string())
                    .collect(),
            })
            .collect(),
    };

    match format {
        OutputFormat::Human => {
            for group in &response.groups {
                if args.groups_only {
                    println!("{}", colors::group(&group.path));
                    continue;
                }
                let phrases: Vec<String> = group
                    .phrases
                    .iter()
                    .map(|p| colors::phrase(p).to_string())
                    .collect();
                println!("{}: {}", colors::group(&group.path), phrases.join(", "));
            }
            println!();
            println!(
                "{} {} groups, {} phrases from {}",
                colors::success("Compiled"),
                format_count(response.group_count),
                format_count(response.matcher_count),
                colors::file_path(&response.taxonomy)
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
