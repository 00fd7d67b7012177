//! Match command - match a single document against a taxonomy

use crate::cli::output::{colors, format_count};
use crate::cli::OutputFormat;
use crate::core::matcher::{SentenceMatcher, SentenceSplitter};
use crate::core::services::Services;
use crate::core::source::{DocumentSource, JsonArticleSource};
use crate::core::types::{location_ref, DocumentMatches};
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Characters of sentence text shown per hit in human output
const PREVIEW_CHARS: usize = 100;

/// Arguments for the match command
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Document to match (`.json` files are read as articles)
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Match this text instead of a file
    #[arg(long)]
    pub text: Option<String>,

    /// Taxonomy JSON file (defaults to the configured taxonomy)
    #[arg(long, short = 't')]
    pub taxonomy: Option<PathBuf>,

    /// Keep reference tags and list lines in JSON articles
    #[arg(long)]
    pub no_clean: bool,
}

/// Match result response
#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub document_id: String,
    pub sentences: usize,
    pub groups: usize,
    pub hits: usize,
    pub matches: DocumentMatches,
}

/// Execute the match command
pub fn execute(
    args: MatchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = (*services.config).clone();
    if let Some(path) = &args.taxonomy {
        config.taxonomy.path = path.clone();
    }
    let services = Services::new(config);
    let dictionary = services.compile_dictionary()?;

    let (document_id, text) = match (&args.file, args.text) {
        (_, Some(text)) => ("text".to_string(), text),
        (Some(path), None) => read_document(path, !args.no_clean)?,
        (None, None) => return Err("Provide a file or --text".into()),
    };

    let splitter = SentenceSplitter::default();
    let sentences = splitter.split(&text);
    let matches = SentenceMatcher::new(splitter).match_document(&text, &dictionary);

    let response = MatchResponse {
        sentences: sentences.len(),
        groups: matches.group_count(),
        hits: matches.hit_count(),
        matches,
        document_id,
    };

    match format {
        OutputFormat::Human => {
            for (group, entries) in response.matches.iter() {
                println!("{}", colors::group(group));
                for entry in entries {
                    let phrases: Vec<String> = entry
                        .phrases
                        .iter()
                        .map(|p| colors::phrase(p).to_string())
                        .collect();
                    let preview = sentences
                        .get(entry.sentence_index)
                        .map(|s| preview(s.text))
                        .unwrap_or_default();
                    println!(
                        "  {} {}  {}",
                        colors::number(&location_ref(&response.document_id, entry.sentence_index)),
                        phrases.join(", "),
                        colors::dim(&preview)
                    );
                }
            }
            if !response.matches.is_empty() {
                println!();
            }
            println!(
                "{} sentences, {} groups matched, {} hits",
                format_count(response.sentences),
                format_count(response.groups),
                format_count(response.hits)
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

/// Read a document file, returning its ID (file stem) and text
fn read_document(
    path: &Path,
    clean_markup: bool,
) -> Result<(String, String), Box<dyn std::error::Error>> {
    let document_id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("Invalid document path '{}'", path.display()))?
        .to_string();

    let text = if path.extension().and_then(|e| e.to_str()) == Some("json") {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        JsonArticleSource::new(dir, clean_markup).get_text(&document_id)?
    } else {
        fs::read_to_string(path).map_err(|e| {
            format!("Failed to read '{}': {}", path.display(), e)
        })?
    };

    Ok((document_id, text))
}

/// Single-line, char-safe preview of a sentence
fn preview(sentence: &str) -> String {
    let flat: String = sentence.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    }
}
