//! Route invariants.

use ctp_search::{normalize_route, route_for, CollectionType};
use proptest::prelude::*;

fn slug_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("/?[a-z0-9-]{0,12}(/[a-z0-9-]{1,8}){0,2}").unwrap()
}

fn collection_strategy() -> impl Strategy<Value = CollectionType> {
    prop::sample::select(CollectionType::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_routes_are_absolute(collection in collection_strategy(), slug in slug_strategy()) {
        prop_assert!(route_for(collection, &slug).starts_with('/'));
    }

    /// Normalizing an already-normalized route changes nothing.
    #[test]
    fn prop_routes_are_idempotent(collection in collection_strategy(), slug in slug_strategy()) {
        let once = route_for(collection, &slug);
        prop_assert_eq!(route_for(collection, &once), once);
    }

    #[test]
    fn prop_blog_routes_live_under_blog(slug in slug_strategy()) {
        prop_assert!(route_for(CollectionType::BlogPost, &slug).starts_with("/blog/"));
    }

    /// Non-blog routes keep the slug, only gaining a leading slash.
    #[test]
    fn prop_other_routes_keep_slug(slug in slug_strategy()) {
        let route = route_for(CollectionType::Page, &slug);
        prop_assert_eq!(route.trim_start_matches('/'), slug.trim_start_matches('/'));
    }

    #[test]
    fn prop_string_kinds_match_typed(collection in collection_strategy(), slug in slug_strategy()) {
        prop_assert_eq!(
            normalize_route(collection.as_str(), &slug).unwrap(),
            route_for(collection, &slug)
        );
    }

    #[test]
    fn prop_unknown_kinds_fail(kind in "[a-z]{1,10}", slug in slug_strategy()) {
        prop_assume!(kind.parse::<CollectionType>().is_err());
        prop_assert!(normalize_route(&kind, &slug).is_err());
    }
}
