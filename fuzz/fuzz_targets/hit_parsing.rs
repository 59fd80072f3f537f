// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for typing raw index responses.
//!
//! Whatever the index sends back, typing a response must not panic, must
//! never produce more hits than it was given, and the partition must account
//! for every hit that survived.

#![no_main]

use ctp_search::{
    partition_hits_by_relevance, CollectionType, Normalizer, RawResultSet, RemoteResponse,
    SearchResults,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(response) = serde_json::from_slice::<RemoteResponse>(data) else {
        return;
    };
    let given = response.hits.len();

    let results: SearchResults = CollectionType::ALL
        .into_iter()
        .map(|c| (c, RawResultSet::from_response(c, response.clone())))
        .collect();

    for (_, set) in results.iter() {
        // INVARIANT: malformed hits are dropped, never invented
        assert!(set.hits().len() <= given);
        assert!(!set.is_missing());
    }

    let partition = partition_hits_by_relevance(&results);
    // INVARIANT: every hit lands in exactly one tier
    assert_eq!(partition.len(), results.total_hits());

    let normalized = partition.normalize(&Normalizer::default());
    for hit in normalized.iter() {
        assert!(hit.route.starts_with('/'));
    }
});
