//! Routes and excerpts from captured index responses.

use super::common::{blog_post_hit, page_hit, page_response, EchoRenderer};
use ctp_search::{
    normalize_route, CollectionType, MatchLevel, Normalizer, RawResultSet, SearchError,
};

#[test]
fn test_page_fixture_excerpts() {
    let set = RawResultSet::from_response(CollectionType::Page, page_response());
    let normalizer = Normalizer::default();

    let normalized: Vec<_> = set.hits().iter().map(|h| normalizer.normalize(h)).collect();

    assert_eq!(normalized[0].route, "/data/long-term-care");
    assert_eq!(
        normalized[0].excerpt_html,
        "<p>deaths in <em>nursing</em> homes and other…</p>\n"
    );

    assert_eq!(normalized[1].route, "/nursing");
    assert_eq!(
        normalized[1].excerpt_html,
        "<p>A page about nursing facili...</p>\n"
    );
}

#[test]
fn test_excerpt_length_is_configurable() {
    let hit = page_hit(
        "long",
        "Long",
        "abcdefghijklmnopqrstuvwxyz",
        MatchLevel::None,
        None,
    );

    let short = Normalizer::with_renderer(EchoRenderer, 10);
    assert_eq!(short.excerpt_html(CollectionType::Page, &hit), "[abcdefg...]");

    let roomy = Normalizer::with_renderer(EchoRenderer, 100);
    assert_eq!(
        roomy.excerpt_html(CollectionType::Page, &hit),
        "[abcdefghijklmnopqrstuvwxyz]"
    );
}

#[test]
fn test_empty_snippet_falls_back_to_body() {
    let hit = page_hit("p", "P", "Body text", MatchLevel::None, Some(""));
    let normalizer = Normalizer::with_renderer(EchoRenderer, 30);
    assert_eq!(normalizer.excerpt_html(CollectionType::Page, &hit), "[Body text]");
}

#[test]
fn test_kind_overrides_record_shape() {
    // A page hit displayed as a blog post: blog route, no excerpt.
    let hit = page_hit("notes", "Notes", "body", MatchLevel::Full, Some("snippet"));
    let normalized = Normalizer::default().normalize_as("blogPost", &hit).unwrap();
    assert_eq!(normalized.collection, CollectionType::BlogPost);
    assert_eq!(normalized.route, "/blog/notes");
    assert_eq!(normalized.excerpt_html, "");
}

#[test]
fn test_route_errors_name_the_type() {
    let err = normalize_route("county", "x").unwrap_err();
    assert!(matches!(err, SearchError::InvalidType(ref kind) if kind == "county"));
    assert_eq!(err.to_string(), "Invalid search result type: county");
}

#[test]
fn test_serialized_shape() {
    let hit = blog_post_hit("2021/03/last-day", "Last day", MatchLevel::Full);
    let normalized = Normalizer::default().normalize(&hit);
    let value = serde_json::to_value(&normalized).unwrap();

    assert_eq!(value["type"], "blogPost");
    assert_eq!(value["route"], "/blog/2021/03/last-day");
    assert_eq!(value["excerptHtml"], "");
    assert_eq!(value["objectID"], "post-2021/03/last-day");
    assert_eq!(value["slug"], "2021/03/last-day");
    assert_eq!(value["title"], "Last day");
    assert_eq!(value["_highlightResult"]["title"]["matchLevel"], "full");
    assert!(value.get("hit").is_none());
}
