//! Query to display payload, the way the CLI drives it.

use super::common::{blog_post_hit_json, fixed_client, page_response, state_hit_json};
use ctp_search::{
    partition_hits_by_relevance, set_query_and_search, CollectionType, FetchStatus, MatchLevel,
    Normalizer, SearchStore,
};

#[tokio::test]
async fn test_search_to_display_payload() {
    let client = fixed_client(
        vec![state_hit_json("nevada", "Nevada", MatchLevel::Partial)],
        vec![blog_post_hit_json(
            "nursing-home-deaths",
            "Nursing",
            MatchLevel::Full,
        )],
        page_response().hits,
    );
    let store = SearchStore::new();

    set_query_and_search(&store, &client, "nursing").await;
    let state = store.snapshot();
    assert_eq!(state.status(), FetchStatus::Loaded { empty: false });

    let display = partition_hits_by_relevance(&state.results).normalize(&Normalizer::default());

    let best: Vec<_> = display.best_hits.iter().map(|h| h.route.as_str()).collect();
    let other: Vec<_> = display.other_hits.iter().map(|h| h.route.as_str()).collect();
    assert_eq!(best, vec!["/blog/nursing-home-deaths", "/nursing"]);
    assert_eq!(other, vec!["/nevada", "/data/long-term-care"]);

    let first_other_page = display
        .other_hits
        .iter()
        .find(|h| h.collection == CollectionType::Page)
        .unwrap();
    assert!(first_other_page.excerpt_html.contains("<em>nursing</em>"));
}

#[tokio::test]
async fn test_partition_json_shape() {
    let client = fixed_client(vec![], vec![], vec![]);
    let store = SearchStore::new();
    set_query_and_search(&store, &client, "nothing").await;

    let display = partition_hits_by_relevance(&store.snapshot().results)
        .normalize(&Normalizer::default());
    let value = serde_json::to_value(&display).unwrap();
    assert_eq!(value, serde_json::json!({"bestHits": [], "otherHits": []}));
}
