//! Config command - show current configuration

use crate::cli::output::{colors, print_header};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Also show where configuration files are looked up
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    #[serde(flatten)]
    pub config: Config,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_config_file: Option<String>,
}

/// Execute the config command
pub fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = ConfigResponse {
        config: (*services.config).clone(),
        user_config_file: if args.all {
            Config::user_config_file().map(|p| p.to_string_lossy().into_owned())
        } else {
            None
        },
    };

    match format {
        OutputFormat::Human => {
            print_header("Configuration:");
            let config = &response.config;
            println!("  taxonomy:");
            println!("    path: {}", colors::file_path(&config.taxonomy.path.display().to_string()));
            println!("    structural_token: {}", config.taxonomy.structural_token);
            println!("    indicators_key: {}", config.taxonomy.indicators_key);
            println!("  corpus:");
            println!(
                "    documents_dir: {}",
                colors::file_path(&config.corpus.documents_dir.display().to_string())
            );
            println!("    format: {}", config.corpus.format);
            println!("    ids_file: {:?}", config.corpus.ids_file);
            println!("    clean_markup: {}", config.corpus.clean_markup);
            println!("  execution:");
            println!("    workers: {}", config.execution.workers);
            println!("    batch_size: {}", config.execution.batch_size);
            println!("    checkpoint_path: {:?}", config.execution.checkpoint_path);
            println!("  output:");
            println!(
                "    index_path: {}",
                colors::file_path(&config.output.index_path.display().to_string())
            );
            println!("    processed_path: {:?}", config.output.processed_path);
            if let Some(path) = &response.user_config_file {
                println!();
                println!("User config file: {}", colors::dim(path));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
