// Test helper functions

use super::fixtures::TestCorpus;
use indicator_index::core::compiler::{CompiledDictionary, SchemaCompiler};
use indicator_index::core::config::Config;
use indicator_index::core::services::Services;
use indicator_index::core::taxonomy::Taxonomy;
use indicator_index::core::types::RunStats;
use indicator_index::InvertedIndex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Configuration pointing at a test corpus
#[allow(dead_code)] // Used in integration tests
pub fn corpus_config(corpus: &TestCorpus) -> Config {
    let mut config = Config::default();
    config.taxonomy.path = corpus.taxonomy();
    config.corpus.documents_dir = corpus.documents_dir();
    config.corpus.ids_file = Some(corpus.ids_file());
    config.execution.workers = 4;
    config.execution.batch_size = 2;
    config.output.index_path = corpus.output("index.json");
    config
}

/// Services wrapped in Arc (matching CLI execute() signatures)
#[allow(dead_code)] // Used in integration tests
pub fn create_test_services(corpus: &TestCorpus) -> Arc<Services> {
    Arc::new(Services::new(corpus_config(corpus)))
}

/// Compile a taxonomy given as a JSON string
#[allow(dead_code)] // Used in integration tests
pub fn compile(json: &str) -> CompiledDictionary {
    SchemaCompiler::default()
        .compile(&Taxonomy::from_json_str(json).expect("taxonomy should parse"))
        .expect("taxonomy should compile")
}

/// Index contents with every location list sorted
///
/// Location order depends on processing order, so comparisons
/// across runs go through this.
#[allow(dead_code)] // Used in integration tests
pub fn as_sets(index: &InvertedIndex) -> BTreeMap<String, BTreeMap<String, Vec<String>>> {
    index
        .iter()
        .map(|(group, phrases)| {
            let phrases = phrases
                .iter()
                .map(|(phrase, locations)| {
                    let mut locations = locations.clone();
                    locations.sort();
                    (phrase.clone(), locations)
                })
                .collect();
            (group.to_string(), phrases)
        })
        .collect()
}

/// Assert that run stats are consistent
#[allow(dead_code)] // Used in integration tests
pub fn assert_valid_stats(stats: &RunStats) {
    assert_eq!(
        stats.documents_processed + stats.documents_failed,
        stats.documents_total,
        "processed ({}) + failed ({}) should equal total ({})",
        stats.documents_processed,
        stats.documents_failed,
        stats.documents_total
    );
    assert!(
        stats.groups > 0,
        "Expected groups > 0, got {}",
        stats.groups
    );
    assert!(
        stats.location_refs >= stats.groups,
        "Expected location_refs ({}) >= groups ({})",
        stats.location_refs,
        stats.groups
    );
}
