//! indicator-index - build a sentence-level indicator index from the command line
//!
//! # Examples
//!
//! ```bash
//! # Inspect the compiled taxonomy
//! indicator-index compile structured-output-schema.json
//!
//! # Try the taxonomy on one article
//! indicator-index match articles/12345.json
//!
//! # Build the index over the whole corpus
//! indicator-index build --documents ./articles --ids article_IDs.txt --workers 20
//!
//! # Show configuration
//! indicator-index show-config
//! ```

use clap::Parser;
use indicator_index::cli::{run, Cli, LogFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "indicator_index=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so JSON output on stdout stays clean
    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
