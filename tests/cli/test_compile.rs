//! Tests for the compile CLI command

use crate::common::{create_test_services, TestCorpus};
use indicator_index::cli::commands::compile::{execute, CompileArgs};
use indicator_index::cli::OutputFormat;
use std::fs;

/// Test compiling the configured taxonomy
#[test]
fn test_compile_configured_taxonomy() {
    let corpus = TestCorpus::with_articles(&[]);
    let services = create_test_services(&corpus);

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let result = execute(CompileArgs::default(), &services, format);
        assert!(result.is_ok(), "Compile should succeed: {:?}", result.err());
    }
}

/// Test compiling an explicit file with a custom indicators key
#[test]
fn test_compile_custom_key() {
    let corpus = TestCorpus::with_articles(&[]);
    let services = create_test_services(&corpus);
    let path = corpus.output("custom.json");
    fs::write(&path, r#"{"signs": {"terms": ["rash"]}}"#).unwrap();

    let args = CompileArgs {
        taxonomy: Some(path),
        indicators_key: Some("terms".to_string()),
        groups_only: true,
        ..Default::default()
    };
    assert!(execute(args, &services, OutputFormat::Human).is_ok());
}

/// Test that a malformed taxonomy is reported
#[test]
fn test_compile_malformed_taxonomy() {
    let corpus = TestCorpus::with_articles(&[]);
    let services = create_test_services(&corpus);
    let path = corpus.output("bad.json");
    fs::write(&path, r#"{"signs": {"indicators": "rash"}}"#).unwrap();

    let args = CompileArgs {
        taxonomy: Some(path),
        ..Default::default()
    };
    let err = execute(args, &services, OutputFormat::Json).unwrap_err();
    assert!(err.to_string().contains("root>signs"));
}
