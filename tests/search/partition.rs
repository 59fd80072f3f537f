//! Best/other split across collections.

use super::common::{blog_post_hit, page_hit, results, state_hit, unannotated_hit_json};
use ctp_search::{
    partition_hits_by_relevance, CollectionType, Hit, MatchLevel, RawResultSet, SearchResults,
};

fn slugs(hits: &[Hit]) -> Vec<&str> {
    hits.iter().map(|h| h.record.slug()).collect()
}

#[test]
fn test_collection_order_within_tiers() {
    let results = results(
        vec![
            state_hit("virginia", "Virginia", MatchLevel::Full),
            state_hit("west-virginia", "West Virginia", MatchLevel::Partial),
        ],
        vec![
            blog_post_hit("virginia-data", "Virginia", MatchLevel::Full),
            blog_post_hit("data-notes", "Data notes", MatchLevel::None),
        ],
        vec![page_hit("virginia", "Virginia", "", MatchLevel::Full, None)],
    );

    let partition = partition_hits_by_relevance(&results);

    assert_eq!(
        slugs(&partition.best_hits),
        vec!["virginia", "virginia-data", "virginia"]
    );
    assert_eq!(slugs(&partition.other_hits), vec!["west-virginia", "data-notes"]);
    assert_eq!(partition.len(), results.total_hits());
}

#[test]
fn test_missing_collections_contribute_nothing() {
    let mut results = SearchResults::default();
    results.insert(
        CollectionType::Page,
        RawResultSet::new(vec![page_hit("about", "About", "", MatchLevel::Partial, None)]),
    );

    let partition = partition_hits_by_relevance(&results);
    assert!(partition.best_hits.is_empty());
    assert_eq!(slugs(&partition.other_hits), vec!["about"]);
}

#[test]
fn test_nothing_retrieved_is_empty() {
    let partition = partition_hits_by_relevance(&SearchResults::default());
    assert!(partition.is_empty());
}

#[test]
fn test_unannotated_title_is_other() {
    let hit = Hit::from_value(
        CollectionType::BlogPost,
        unannotated_hit_json(CollectionType::BlogPost, "quiet"),
    )
    .unwrap();
    let results = results(vec![], vec![hit], vec![]);

    let partition = partition_hits_by_relevance(&results);
    assert!(partition.best_hits.is_empty());
    assert_eq!(partition.other_hits.len(), 1);
}

#[test]
fn test_only_title_field_decides() {
    // A state hit whose `name` is partial but some other field is full.
    let mut hit = state_hit("maine", "Maine", MatchLevel::Partial);
    let mut full = hit.highlight["name"].clone();
    full.match_level = MatchLevel::Full;
    hit.highlight.insert("slug".to_string(), full);

    let results = results(vec![hit], vec![], vec![]);
    let partition = partition_hits_by_relevance(&results);
    assert!(partition.best_hits.is_empty());
}
