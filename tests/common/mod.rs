// Common test utilities and fixtures

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items
// Note: These may appear unused in unit tests but are used in integration tests
#[allow(unused_imports)]
pub use fixtures::{TestCorpus, Utf8TestData, MEDICAL_TAXONOMY};
#[allow(unused_imports)]
pub use helpers::{as_sets, assert_valid_stats, compile, corpus_config, create_test_services};
