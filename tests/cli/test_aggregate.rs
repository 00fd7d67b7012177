//! Tests for the aggregate CLI command

use crate::common::{as_sets, create_test_services, TestCorpus};
use indicator_index::cli::commands::aggregate::{self, AggregateArgs};
use indicator_index::cli::commands::build::{self, BuildArgs};
use indicator_index::cli::OutputFormat;
use indicator_index::core::storage::load_index;
use std::fs;

/// Test that re-aggregating saved results reproduces the built index
#[test]
fn test_aggregate_matches_build() {
    let corpus = TestCorpus::clinical();
    let services = create_test_services(&corpus);

    let args = BuildArgs {
        processed: Some(corpus.output("processed.json")),
        quiet: true,
        ..Default::default()
    };
    build::execute(args, &services, OutputFormat::Json).unwrap();

    let args = AggregateArgs {
        input: corpus.output("processed.json"),
        output: Some(corpus.output("reaggregated.json")),
        taxonomy: None,
    };
    aggregate::execute(args, &services, OutputFormat::Human).unwrap();

    let built = load_index(&corpus.output("index.json")).unwrap();
    let reaggregated = load_index(&corpus.output("reaggregated.json")).unwrap();
    assert_eq!(as_sets(&built), as_sets(&reaggregated));
}

/// Test that structurally broken results are rejected
#[test]
fn test_aggregate_rejects_unordered_sentences() {
    let corpus = TestCorpus::with_articles(&[]);
    let services = create_test_services(&corpus);
    let input = corpus.output("processed.json");
    fs::write(
        &input,
        r#"[{"document_id": "d1",
             "matches": {"root>a": [[["x"], "3"], [["x"], "1"]]}}]"#,
    )
    .unwrap();

    let args = AggregateArgs {
        input,
        output: Some(corpus.output("out.json")),
        taxonomy: None,
    };
    assert!(aggregate::execute(args, &services, OutputFormat::Json).is_err());
    assert!(!corpus.output("out.json").exists());
}

/// Test that groups absent from the taxonomy are rejected
#[test]
fn test_aggregate_rejects_unknown_group() {
    let corpus = TestCorpus::with_articles(&[]);
    let services = create_test_services(&corpus);
    let input = corpus.output("processed.json");
    fs::write(
        &input,
        r#"[{"document_id": "d1", "matches": {"root>symptoms": [[["fever"], "0"]]}},
            {"document_id": "d2", "matches": {"root>ghost": [[["x"], "0"]]}}]"#,
    )
    .unwrap();

    let args = AggregateArgs {
        input,
        output: Some(corpus.output("out.json")),
        taxonomy: None,
    };
    let err = aggregate::execute(args, &services, OutputFormat::Json).unwrap_err();
    assert!(err.to_string().contains("root>ghost"));
    assert!(!corpus.output("out.json").exists());
}

/// Test checking results against an explicitly given taxonomy
#[test]
fn test_aggregate_with_taxonomy_override() {
    let corpus = TestCorpus::with_articles(&[]);
    let services = create_test_services(&corpus);
    let taxonomy = corpus.output("ghost.json");
    fs::write(&taxonomy, r#"{"ghost": {"indicators": ["x"]}}"#).unwrap();
    let input = corpus.output("processed.json");
    fs::write(
        &input,
        r#"[{"document_id": "d2", "matches": {"root>ghost": [[["x"], "0"]]}}]"#,
    )
    .unwrap();

    let args = AggregateArgs {
        input,
        output: Some(corpus.output("out.json")),
        taxonomy: Some(taxonomy),
    };
    aggregate::execute(args, &services, OutputFormat::Json).unwrap();

    let index = load_index(&corpus.output("out.json")).unwrap();
    assert_eq!(index.locations("root>ghost", "x").unwrap(), ["d2.0"]);
}

/// Test that a missing input file is an error
#[test]
fn test_aggregate_missing_input() {
    let corpus = TestCorpus::with_articles(&[]);
    let services = create_test_services(&corpus);

    let args = AggregateArgs {
        input: corpus.output("absent.json"),
        output: None,
        taxonomy: None,
    };
    assert!(aggregate::execute(args, &services, OutputFormat::Human).is_err());
}
