// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query dispatch: one search in, three concurrent index queries out.
//!
//! Each collection query runs on its own task and is individually
//! fault-tolerant: an error becomes an absent hit list for that collection
//! plus a log line. The only thing that can fail the dispatch as a whole is
//! the join (a task panicked or was cancelled), which is reported through
//! `Action::FetchError`.
//!
//! There is no staleness guard. Two overlapping dispatches both land, and
//! whichever `FetchSuccess` arrives last wins.

use std::sync::Arc;

use futures::future::try_join_all;

use crate::client::{SearchClient, SearchIndex};
use crate::error::{Result, SearchError};
use crate::state::{Action, SearchStore};
use crate::types::{CollectionType, RawResultSet, SearchResults};

/// Query one index, turning any failure into an absent hit list.
async fn query_index(
    index: Arc<dyn SearchIndex>,
    collection: CollectionType,
    query: String,
) -> (CollectionType, RawResultSet) {
    match index.search(&query).await {
        Ok(response) => {
            log::debug!(
                "{} returned {} of {} hits",
                index.name(),
                response.hits.len(),
                response.nb_hits
            );
            (collection, RawResultSet::from_response(collection, response))
        }
        Err(e) => {
            log::error!("search on {} failed: {}", index.name(), e);
            (collection, RawResultSet::default())
        }
    }
}

/// Query all three collections concurrently.
///
/// Must run inside a tokio runtime.
pub async fn fetch_all(client: &SearchClient, query: &str) -> Result<SearchResults> {
    let tasks = CollectionType::ALL.into_iter().map(|collection| {
        tokio::spawn(query_index(
            client.index(collection),
            collection,
            query.to_string(),
        ))
    });

    let sets = try_join_all(tasks)
        .await
        .map_err(|e| SearchError::Dispatch(e.to_string()))?;

    Ok(sets.into_iter().collect())
}

/// Run a search for `query` and record the outcome in `store`.
pub async fn dispatch_search(store: &SearchStore, client: &SearchClient, query: &str) {
    store.dispatch(Action::FetchStart);

    match fetch_all(client, query).await {
        Ok(results) => {
            log::debug!("search {:?}: {} hits", query, results.total_hits());
            store.dispatch(Action::FetchSuccess(results));
        }
        Err(error) => {
            log::error!("search {:?} failed: {}", query, error);
            store.dispatch(Action::FetchError(error));
        }
    }
}

/// Record `query` and search for it.
pub async fn set_query_and_search(store: &SearchStore, client: &SearchClient, query: &str) {
    store.dispatch(Action::SetQuery(query.to_string()));
    dispatch_search(store, client, query).await;
}
