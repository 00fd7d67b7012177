//! Aggregation completeness and order independence

use crate::common::{as_sets, compile, MEDICAL_TAXONOMY};
use indicator_index::core::matcher::SentenceMatcher;
use indicator_index::core::types::DocumentMatches;
use indicator_index::InvertedIndex;
use std::collections::HashMap;

fn corpus() -> Vec<(String, DocumentMatches)> {
    let dictionary = compile(MEDICAL_TAXONOMY);
    let matcher = SentenceMatcher::default();
    let texts = [
        "Patient had fever. No other symptoms were noted.",
        "COPD was diagnosed. A cough and fever followed. Fever returned.",
        "Asthma and COPD. Then respiratory failure.",
        "Heart failure with fever. Heart failure again.",
        "Nothing relevant here.",
    ];
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| (format!("d{i}"), matcher.match_document(text, &dictionary)))
        .collect()
}

#[test]
fn test_reference_count_matches_sentence_hits() {
    let docs = corpus();
    let index = InvertedIndex::fold(docs.iter().map(|(id, m)| (id.as_str(), m.clone())));

    // Expected counts straight from the per-document results
    let mut expected: HashMap<(String, String), usize> = HashMap::new();
    for (_, matches) in &docs {
        for (group, entries) in matches.iter() {
            for entry in entries {
                for phrase in &entry.phrases {
                    *expected
                        .entry((group.to_string(), phrase.clone()))
                        .or_default() += 1;
                }
            }
        }
    }

    for ((group, phrase), count) in &expected {
        assert_eq!(
            index.locations(group, phrase).map_or(0, |l| l.len()),
            *count,
            "{group} / {phrase}"
        );
    }
    assert_eq!(index.location_count(), expected.values().sum::<usize>());
    assert_eq!(index.locations("root>symptoms", "fever").unwrap().len(), 4);
}

#[test]
fn test_fold_order_does_not_change_contents() {
    let docs = corpus();
    let forward = InvertedIndex::fold(docs.clone());
    let backward = InvertedIndex::fold(docs.clone().into_iter().rev());
    let parallel = InvertedIndex::par_fold(docs);

    assert_eq!(as_sets(&forward), as_sets(&backward));
    assert_eq!(as_sets(&forward), as_sets(&parallel));
    assert_eq!(forward.normalized(), parallel.normalized());
}

#[test]
fn test_partial_indexes_merge_to_full() {
    let docs = corpus();
    let full = InvertedIndex::fold(docs.clone());

    let (left, right) = docs.split_at(2);
    let merged = InvertedIndex::fold(left.to_vec()).merged(InvertedIndex::fold(right.to_vec()));

    assert_eq!(merged, full);
}

#[test]
fn test_checked_accumulate_accepts_matcher_output() {
    let dictionary = compile(MEDICAL_TAXONOMY);
    let mut index = InvertedIndex::new();
    for (id, matches) in corpus() {
        index.accumulate_checked(&dictionary, &id, &matches).unwrap();
    }
    assert_eq!(index, InvertedIndex::fold(corpus()));
}

#[test]
fn test_checked_accumulate_rejects_unknown_group() {
    let dictionary = compile(r#"{"symptoms": {"indicators": ["fever"]}}"#);
    let other = compile(MEDICAL_TAXONOMY);
    let matches =
        SentenceMatcher::default().match_document("COPD flared up.", &other);

    let mut index = InvertedIndex::new();
    let err = index
        .accumulate_checked(&dictionary, "d1", &matches)
        .unwrap_err();
    assert!(err.is_fatal());
    assert!(index.is_empty());
}

#[test]
fn test_index_json_shape() {
    let index = InvertedIndex::fold(corpus());
    let json = serde_json::to_value(&index).unwrap();

    assert_eq!(json["root>symptoms"]["fever"][0], "d0.0");
    assert_eq!(
        json["root>conditions>cardiac"]["heart failure"],
        serde_json::json!(["d3.0", "d3.1"])
    );
}
