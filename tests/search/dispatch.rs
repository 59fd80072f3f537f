//! Fan-out, fault isolation and the state transitions around a fetch.

use std::sync::Arc;

use super::common::{
    fixed_client, page_hit_json, page_response, state_hit_json, FailingIndex, PanickingIndex,
};
use ctp_search::testing::FixedIndex;
use ctp_search::{
    dispatch_search, fetch_all, set_query_and_search, CollectionType, FetchStatus, MatchLevel,
    SearchClient, SearchError, SearchStore,
};

#[tokio::test]
async fn test_each_index_queried_once() {
    let state = Arc::new(FixedIndex::named("state"));
    let blog = Arc::new(FixedIndex::named("blogPost"));
    let page = Arc::new(FixedIndex::named("page"));
    let client = SearchClient::new(state.clone(), blog.clone(), page.clone());

    fetch_all(&client, "testing").await.unwrap();

    assert_eq!(state.calls(), 1);
    assert_eq!(blog.calls(), 1);
    assert_eq!(page.calls(), 1);
}

#[tokio::test]
async fn test_results_keyed_by_collection() {
    let client = fixed_client(
        vec![state_hit_json("texas", "Texas", MatchLevel::Full)],
        vec![],
        page_response().hits,
    );

    let results = fetch_all(&client, "nursing").await.unwrap();

    assert_eq!(results.get(CollectionType::State).hits().len(), 1);
    assert!(results.get(CollectionType::BlogPost).hits().is_empty());
    // The slugless page hit is dropped, the count is what the index said.
    assert_eq!(results.page.hits().len(), 2);
    assert_eq!(results.page.nb_hits, 3);
}

#[tokio::test]
async fn test_all_failing_still_loads() {
    let client = SearchClient::new(
        Arc::new(FailingIndex::new("state")),
        Arc::new(FailingIndex::new("blogPost")),
        Arc::new(FailingIndex::new("page")),
    );
    let store = SearchStore::new();

    set_query_and_search(&store, &client, "anything").await;

    let state = store.snapshot();
    assert_eq!(state.status(), FetchStatus::Loaded { empty: true });
    assert!(!state.has_errors);
    assert_eq!(state.failed_collections(), CollectionType::ALL.to_vec());
}

#[tokio::test]
async fn test_panicking_index_fails_the_fetch() {
    let client = SearchClient::new(
        Arc::new(PanickingIndex::new("state")),
        Arc::new(FixedIndex::named("blogPost")),
        Arc::new(FixedIndex::named("page")),
    );
    let store = SearchStore::new();

    dispatch_search(&store, &client, "boom").await;

    let state = store.snapshot();
    assert_eq!(state.status(), FetchStatus::Failed);
    assert!(!state.is_fetching);
    assert_eq!(state.errors.len(), 1);
    assert!(matches!(*state.errors[0], SearchError::Dispatch(_)));
    assert!(!state.has_loaded);
}

#[tokio::test]
async fn test_failure_keeps_previous_results() {
    let store = SearchStore::new();
    let good = fixed_client(
        vec![state_hit_json("ohio", "Ohio", MatchLevel::Full)],
        vec![],
        vec![page_hit_json("ohio-data", "Ohio data", "", MatchLevel::Partial, None)],
    );
    set_query_and_search(&store, &good, "ohio").await;
    assert_eq!(store.snapshot().results.total_hits(), 2);

    let bad = SearchClient::new(
        Arc::new(FixedIndex::named("state")),
        Arc::new(FixedIndex::named("blogPost")),
        Arc::new(PanickingIndex::new("page")),
    );
    set_query_and_search(&store, &bad, "ohio again").await;

    let state = store.snapshot();
    assert_eq!(state.query, "ohio again");
    assert_eq!(state.status(), FetchStatus::Failed);
    assert_eq!(state.results.total_hits(), 2);
    assert!(state.has_loaded);
}

#[tokio::test]
async fn test_last_success_wins() {
    let store = SearchStore::new();
    let first = fixed_client(vec![state_hit_json("iowa", "Iowa", MatchLevel::Full)], vec![], vec![]);
    let second = fixed_client(vec![], vec![], vec![]);

    set_query_and_search(&store, &first, "iowa").await;
    set_query_and_search(&store, &second, "zzz").await;

    let state = store.snapshot();
    assert_eq!(state.query, "zzz");
    assert_eq!(state.status(), FetchStatus::Loaded { empty: true });
}
