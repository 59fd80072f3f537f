//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides index doubles and hit builders so tests don't hand-roll JSON.

#![doc(hidden)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::client::SearchIndex;
use crate::error::{Result, SearchError};
use crate::markup::MarkupRenderer;
use crate::types::{CollectionType, Hit, MatchLevel, RemoteResponse};

// ============================================================================
// HIT BUILDERS
// ============================================================================

fn level_str(level: MatchLevel) -> &'static str {
    match level {
        MatchLevel::None => "none",
        MatchLevel::Partial => "partial",
        MatchLevel::Full => "full",
    }
}

fn highlight(value: &str, level: MatchLevel) -> Value {
    json!({
        "value": value,
        "matchLevel": level_str(level),
        "matchedWords": [],
    })
}

/// Raw state hit as the index returns it.
pub fn state_hit_json(slug: &str, name: &str, level: MatchLevel) -> Value {
    json!({
        "objectID": format!("state-{}", slug),
        "slug": slug,
        "name": name,
        "_highlightResult": { "name": highlight(name, level) },
    })
}

/// Raw page hit; `snippet` becomes `_snippetResult.body`.
pub fn page_hit_json(
    slug: &str,
    title: &str,
    body: &str,
    level: MatchLevel,
    snippet: Option<&str>,
) -> Value {
    let mut hit = json!({
        "objectID": format!("page-{}", slug),
        "slug": slug,
        "title": title,
        "body": body,
        "_highlightResult": { "title": highlight(title, level) },
    });
    if let Some(snippet) = snippet {
        hit["_snippetResult"] = json!({
            "body": { "value": snippet, "matchLevel": "partial" }
        });
    }
    hit
}

/// Raw blog post hit.
pub fn blog_post_hit_json(slug: &str, title: &str, level: MatchLevel) -> Value {
    json!({
        "objectID": format!("post-{}", slug),
        "slug": slug,
        "title": title,
        "authors": [{"name": "Data team"}],
        "_highlightResult": { "title": highlight(title, level) },
    })
}

/// Raw hit with no highlight annotation at all.
pub fn unannotated_hit_json(collection: CollectionType, slug: &str) -> Value {
    match collection {
        CollectionType::State => json!({ "slug": slug, "name": slug }),
        CollectionType::Page | CollectionType::BlogPost => {
            json!({ "slug": slug, "title": slug, "body": "" })
        }
    }
}

fn parse(collection: CollectionType, value: Value) -> Hit {
    Hit::from_value(collection, value).expect("test hit must parse")
}

pub fn state_hit(slug: &str, name: &str, level: MatchLevel) -> Hit {
    parse(CollectionType::State, state_hit_json(slug, name, level))
}

pub fn page_hit(
    slug: &str,
    title: &str,
    body: &str,
    level: MatchLevel,
    snippet: Option<&str>,
) -> Hit {
    parse(
        CollectionType::Page,
        page_hit_json(slug, title, body, level, snippet),
    )
}

pub fn blog_post_hit(slug: &str, title: &str, level: MatchLevel) -> Hit {
    parse(CollectionType::BlogPost, blog_post_hit_json(slug, title, level))
}

// ============================================================================
// INDEX DOUBLES
// ============================================================================

/// Index that always answers with the same hits.
pub struct FixedIndex {
    name: String,
    hits: Vec<Value>,
    calls: AtomicUsize,
}

impl FixedIndex {
    pub fn named(name: &str) -> Self {
        Self::with_hits(name, Vec::new())
    }

    pub fn with_hits(name: &str, hits: Vec<Value>) -> Self {
        Self {
            name: name.to_string(),
            hits,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchIndex for FixedIndex {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, _query: &str) -> Result<RemoteResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RemoteResponse {
            hits: self.hits.clone(),
            nb_hits: self.hits.len(),
        })
    }
}

/// Index whose every query is rejected, like a bad API key would.
pub struct FailingIndex {
    name: String,
}

impl FailingIndex {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl SearchIndex for FailingIndex {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, _query: &str) -> Result<RemoteResponse> {
        Err(SearchError::Status {
            index: self.name.clone(),
            status: 403,
            message: "Invalid Application-ID or API key".to_string(),
        })
    }
}

/// Index that panics mid-query, so the task running it never joins cleanly.
pub struct PanickingIndex {
    name: String,
}

impl PanickingIndex {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl SearchIndex for PanickingIndex {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &str) -> Result<RemoteResponse> {
        panic!("{} blew up on {:?}", self.name, query);
    }
}

// ============================================================================
// RENDERERS
// ============================================================================

/// Renderer that wraps its input in brackets, so tests can see exactly what
/// was handed to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoRenderer;

impl MarkupRenderer for EchoRenderer {
    fn render(&self, markup: &str) -> String {
        format!("[{}]", markup)
    }
}
