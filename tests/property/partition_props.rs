//! Partition invariants over arbitrary result sets.

use ctp_search::testing::unannotated_hit_json;
use ctp_search::{
    partition_hits_by_relevance, CollectionType, Hit, MatchLevel, RawResultSet, RemoteResponse,
    SearchResults,
};
use proptest::prelude::*;
use serde_json::{json, Value};

use super::common::{blog_post_hit, page_hit, state_hit};

// ============================================================================
// STRATEGIES
// ============================================================================

fn collection_strategy() -> impl Strategy<Value = CollectionType> {
    prop::sample::select(CollectionType::ALL.to_vec())
}

/// `None` means the title carries no annotation at all.
fn level_strategy() -> impl Strategy<Value = Option<MatchLevel>> + Clone {
    prop::sample::select(vec![
        None,
        Some(MatchLevel::None),
        Some(MatchLevel::Partial),
        Some(MatchLevel::Full),
    ])
}

fn hit(collection: CollectionType, slug: &str, level: Option<MatchLevel>) -> Hit {
    match level {
        None => Hit::from_value(collection, unannotated_hit_json(collection, slug)).unwrap(),
        Some(level) => match collection {
            CollectionType::State => state_hit(slug, slug, level),
            CollectionType::BlogPost => blog_post_hit(slug, slug, level),
            CollectionType::Page => page_hit(slug, slug, "", level, None),
        },
    }
}

/// Per collection: either not retrieved, or up to 8 hits.
fn results_strategy() -> impl Strategy<Value = SearchResults> {
    let set = prop::option::of(prop::collection::vec(level_strategy(), 0..8));
    (set.clone(), set.clone(), set).prop_map(|(state, blog, page)| {
        let mut results = SearchResults::default();
        for (collection, levels) in [
            (CollectionType::State, state),
            (CollectionType::BlogPost, blog),
            (CollectionType::Page, page),
        ] {
            if let Some(levels) = levels {
                let hits = levels
                    .into_iter()
                    .enumerate()
                    .map(|(i, level)| hit(collection, &format!("{}-{}", collection, i), level))
                    .collect();
                results.insert(collection, RawResultSet::new(hits));
            }
        }
        results
    })
}

/// A string field as the index may send it: text, empty, or `null`.
fn nullable_text_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(json!("")),
        "[a-z ]{1,12}".prop_map(Value::from),
    ]
}

/// A raw hit for `collection` whose text fields may be `null`.
fn raw_hit_strategy(collection: CollectionType) -> impl Strategy<Value = (Value, bool)> {
    (nullable_text_strategy(), nullable_text_strategy(), any::<bool>()).prop_map(
        move |(title, body, full)| {
            let level = if full { "full" } else { "partial" };
            let title_field = collection.title_field();
            let mut hit = json!({
                "slug": "some-slug",
                "_highlightResult": { title_field: {"value": title.clone(), "matchLevel": level} },
            });
            hit[title_field] = title;
            if collection == CollectionType::Page {
                hit["body"] = body;
            }
            (hit, full)
        },
    )
}

fn raw_page_strategy() -> impl Strategy<Value = (CollectionType, Vec<(Value, bool)>)> {
    collection_strategy().prop_flat_map(|collection| {
        (
            Just(collection),
            prop::collection::vec(raw_hit_strategy(collection), 0..8),
        )
    })
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    /// Every hit lands in exactly one tier.
    #[test]
    fn prop_partition_accounts_for_every_hit(results in results_strategy()) {
        let partition = partition_hits_by_relevance(&results);
        prop_assert_eq!(partition.len(), results.total_hits());
    }

    /// Best holds exactly the full title matches.
    #[test]
    fn prop_tiers_follow_title_level(results in results_strategy()) {
        let partition = partition_hits_by_relevance(&results);
        prop_assert!(partition.best_hits.iter().all(Hit::is_full_title_match));
        prop_assert!(partition.other_hits.iter().all(|h| !h.is_full_title_match()));
    }

    /// Within a tier, collections appear in state, blog post, page order and
    /// each collection keeps its own order.
    #[test]
    fn prop_order_is_stable(results in results_strategy()) {
        let partition = partition_hits_by_relevance(&results);
        for tier in [&partition.best_hits, &partition.other_hits] {
            let expected: Vec<&Hit> = CollectionType::ALL
                .into_iter()
                .flat_map(|c| results.get(c).hits().iter())
                .filter(|h| tier.contains(*h))
                .collect();
            let actual: Vec<&Hit> = tier.iter().collect();
            prop_assert_eq!(actual, expected);
        }
    }

    /// Partitioning doesn't depend on anything but the results.
    #[test]
    fn prop_partition_is_deterministic(results in results_strategy()) {
        prop_assert_eq!(
            partition_hits_by_relevance(&results),
            partition_hits_by_relevance(&results)
        );
    }

    #[test]
    fn prop_single_hit_tier(collection in collection_strategy(), level in level_strategy()) {
        let mut results = SearchResults::default();
        results.insert(collection, RawResultSet::new(vec![hit(collection, "only", level)]));
        let partition = partition_hits_by_relevance(&results);
        let full = level == Some(MatchLevel::Full);
        prop_assert_eq!(partition.best_hits.len(), usize::from(full));
        prop_assert_eq!(partition.other_hits.len(), usize::from(!full));
    }

    /// Null text fields never cost a hit, and the title annotation still
    /// decides its tier.
    #[test]
    fn prop_null_fields_keep_every_hit((collection, raw) in raw_page_strategy()) {
        let full = raw.iter().filter(|(_, full)| *full).count();
        let response = RemoteResponse {
            nb_hits: raw.len(),
            hits: raw.into_iter().map(|(hit, _)| hit).collect(),
        };
        let given = response.hits.len();

        let mut results = SearchResults::default();
        results.insert(collection, RawResultSet::from_response(collection, response));
        prop_assert_eq!(results.total_hits(), given);

        let partition = partition_hits_by_relevance(&results);
        prop_assert_eq!(partition.len(), given);
        prop_assert_eq!(partition.best_hits.len(), full);
    }
}
