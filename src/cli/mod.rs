//! CLI adapter for the indicator index
//!
//! Provides the command-line interface for compiling taxonomies,
//! matching single documents and building the corpus index.
//!
//! # Architecture
//!
//! ```text
//!              +------------------+
//!              |     core/        |
//!              |  (domain logic)  |
//!              +--------+---------+
//!                       |
//!                       v
//!              +------------------+
//!              |      cli/        |
//!              | (clap adapter)   |
//!              +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Indicator Index - sentence-level occurrence index builder
///
/// Compiles a hierarchical taxonomy of indicator phrases, finds every
/// sentence in a corpus that mentions one, and writes an inverted
/// index from each phrase to its document.sentence locations.
#[derive(Parser, Debug)]
#[command(name = "indicator-index")]
#[command(author = "RHOBIMD HEALTH")]
#[command(version)]
#[command(about = "Sentence-level indicator index builder", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Configuration file (overrides INDICATOR_INDEX_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log line format on stderr
    #[arg(long, global = true, default_value = "text")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Log format for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Plain text lines (default)
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the inverted index over a corpus
    Build(commands::BuildArgs),

    /// Compile a taxonomy and list its indicator groups
    Compile(commands::CompileArgs),

    /// Match a single document against a taxonomy
    Match(commands::MatchArgs),

    /// Fold saved per-document results into an index
    Aggregate(commands::AggregateArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  indicator-index completions bash > ~/.local/share/bash-completion/completions/indicator-index
    ///   zsh:   indicator-index completions zsh > ~/.zfunc/_indicator-index
    ///   fish:  indicator-index completions fish > ~/.config/fish/completions/indicator-index.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    // Create services
    let services = Arc::new(Services::new(config));

    // Execute command
    match cli.command {
        Commands::Build(args) => commands::build::execute(args, &services, cli.format),
        Commands::Compile(args) => commands::compile::execute(args, &services, cli.format),
        Commands::Match(args) => commands::matching::execute(args, &services, cli.format),
        Commands::Aggregate(args) => commands::aggregate::execute(args, &services, cli.format),
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format),
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
