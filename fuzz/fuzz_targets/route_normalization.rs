// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for route normalization.

#![no_main]

use arbitrary::Arbitrary;
use ctp_search::{normalize_route, route_for, CollectionType};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct RouteInput {
    kind: String,
    slug: String,
}

fuzz_target!(|input: RouteInput| {
    match normalize_route(&input.kind, &input.slug) {
        Ok(route) => {
            let collection: CollectionType = input.kind.parse().unwrap();

            // INVARIANT: routes are absolute
            assert!(route.starts_with('/'));

            // INVARIANT: normalizing twice changes nothing
            assert_eq!(route_for(collection, &route), route);

            if collection == CollectionType::BlogPost {
                assert!(route.starts_with("/blog/"));
            }
        }
        Err(_) => {
            // INVARIANT: only the three collection tags are accepted
            assert!(!["state", "blogPost", "page"].contains(&input.kind.as_str()));
        }
    }
});
