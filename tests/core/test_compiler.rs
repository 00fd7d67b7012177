//! Taxonomy compilation tests

use crate::common::{compile, TestCorpus, MEDICAL_TAXONOMY};
use indicator_index::core::compiler::SchemaCompiler;
use indicator_index::core::taxonomy::Taxonomy;
use indicator_index::IndexError;

#[test]
fn test_compile_medical_taxonomy_file() {
    let corpus = TestCorpus::with_articles(&[]);
    let taxonomy = Taxonomy::from_file(corpus.taxonomy(), "indicators").unwrap();
    let dictionary = SchemaCompiler::default().compile(&taxonomy).unwrap();

    let paths: Vec<&str> = dictionary.groups().iter().map(|g| g.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "root>conditions>cardiac",
            "root>conditions>respiratory",
            "root>conditions>respiratory>severe",
            "root>symptoms",
        ]
    );
    assert_eq!(dictionary.matcher_count(), 8);
}

#[test]
fn test_structural_token_is_configurable() {
    let taxonomy = Taxonomy::from_json_str(MEDICAL_TAXONOMY).unwrap();
    let dictionary = SchemaCompiler::new("subtypes").compile(&taxonomy).unwrap();

    assert!(dictionary.contains("root>conditions>respiratory>refinements>severe"));
    assert!(!dictionary.contains("root>conditions>respiratory>severe"));
}

#[test]
fn test_compiling_twice_behaves_identically() {
    let first = compile(MEDICAL_TAXONOMY);
    let second = compile(MEDICAL_TAXONOMY);

    let sentences = [
        " he has copd. ",
        " the recopductive organ ",
        " c.diff and heart failure ",
        " no shortness of breath ",
        " cdiff ",
    ];
    for (a, b) in first.groups().iter().zip(second.groups()) {
        assert_eq!(a.path, b.path);
        for (ma, mb) in a.matchers.iter().zip(&b.matchers) {
            for sentence in sentences {
                assert_eq!(ma.is_match(sentence), mb.is_match(sentence));
            }
        }
    }
}

#[test]
fn test_invalid_phrase_names_group() {
    let taxonomy =
        Taxonomy::from_json_str(r#"{"a": {"b": {"indicators": ["ok", "  "]}}}"#).unwrap();
    let err = SchemaCompiler::default().compile(&taxonomy).unwrap_err();

    assert!(err.is_fatal());
    match err {
        IndexError::Compilation { group, .. } => assert_eq!(group, "root>a>b"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_non_string_phrase_is_rejected() {
    let result = Taxonomy::from_json_str(r#"{"a": {"indicators": ["ok", 7]}}"#);
    assert!(matches!(result, Err(IndexError::Compilation { .. })));
}

#[test]
fn test_missing_taxonomy_file() {
    let corpus = TestCorpus::with_articles(&[]);
    assert!(Taxonomy::from_file(corpus.output("absent.json"), "indicators").is_err());
}
