//! Tests for the match CLI command

use crate::common::{create_test_services, TestCorpus};
use indicator_index::cli::commands::matching::{execute, MatchArgs};
use indicator_index::cli::OutputFormat;
use std::fs;

fn args() -> MatchArgs {
    MatchArgs {
        file: None,
        text: None,
        taxonomy: None,
        no_clean: false,
    }
}

/// Test matching inline text
#[test]
fn test_match_text() {
    let corpus = TestCorpus::with_articles(&[]);
    let services = create_test_services(&corpus);

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let args = MatchArgs {
            text: Some("Patient had fever. No other symptoms were noted.".to_string()),
            ..args()
        };
        assert!(execute(args, &services, format).is_ok());
    }
}

/// Test matching a JSON article from the corpus
#[test]
fn test_match_article_file() {
    let corpus = TestCorpus::clinical();
    let services = create_test_services(&corpus);

    let args = MatchArgs {
        file: Some(corpus.documents_dir().join("a3.json")),
        ..args()
    };
    assert!(execute(args, &services, OutputFormat::Human).is_ok());
}

/// Test matching a plain-text file with another taxonomy
#[test]
fn test_match_plain_file_custom_taxonomy() {
    let corpus = TestCorpus::with_articles(&[]);
    let services = create_test_services(&corpus);
    let taxonomy = corpus.output("other.json");
    fs::write(&taxonomy, r#"{"signs": {"indicators": ["rash"]}}"#).unwrap();
    let file = corpus.output("note.txt");
    fs::write(&file, "A rash appeared.").unwrap();

    let args = MatchArgs {
        file: Some(file),
        taxonomy: Some(taxonomy),
        ..args()
    };
    assert!(execute(args, &services, OutputFormat::Json).is_ok());
}

/// Test that an unreadable file is an error
#[test]
fn test_match_missing_file() {
    let corpus = TestCorpus::with_articles(&[]);
    let services = create_test_services(&corpus);

    let args = MatchArgs {
        file: Some(corpus.output("absent.txt")),
        ..args()
    };
    assert!(execute(args, &services, OutputFormat::Human).is_err());
}
