// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a search response.
//!
//! The hosted index hands back loosely-typed JSON: every hit is a bag of
//! fields plus two annotation maps (`_highlightResult`, `_snippetResult`)
//! keyed by field name. This module turns that into something the rest of
//! the crate can reason about:
//!
//! | Type             | Purpose                                          |
//! |------------------|--------------------------------------------------|
//! | `CollectionType` | Which index a hit came from                      |
//! | `Record`         | Typed fields for one hit, one shape per index    |
//! | `Hit`            | Record plus highlight/snippet annotations        |
//! | `RawResultSet`   | Hits for one collection (absent = query failed)  |
//! | `SearchResults`  | The three result sets, keyed by collection       |
//! | `NormalizedHit`  | Route + excerpt HTML, ready for display          |
//!
//! # Invariants
//!
//! - A `Hit`'s record variant always matches the collection it was parsed for.
//! - `NormalizedHit::route` always starts with `/`, and blog routes with `/blog/`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::SearchError;

// =============================================================================
// COLLECTIONS
// =============================================================================

/// The three searchable record categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectionType {
    State,
    Page,
    BlogPost,
}

impl CollectionType {
    /// Every collection, in the order results are merged and partitioned.
    ///
    /// State first, then blog posts, then pages. This fixes how ties across
    /// collections are ordered inside a relevance tier.
    pub const ALL: [CollectionType; 3] = [
        CollectionType::State,
        CollectionType::BlogPost,
        CollectionType::Page,
    ];

    /// Wire tag, also used as the index name suffix.
    pub fn as_str(self) -> &'static str {
        match self {
            CollectionType::State => "state",
            CollectionType::Page => "page",
            CollectionType::BlogPost => "blogPost",
        }
    }

    /// The field whose match level decides the relevance tier.
    pub fn title_field(self) -> &'static str {
        match self {
            CollectionType::State => "name",
            CollectionType::Page | CollectionType::BlogPost => "title",
        }
    }
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "state" => Ok(CollectionType::State),
            "page" => Ok(CollectionType::Page),
            "blogPost" => Ok(CollectionType::BlogPost),
            other => Err(SearchError::InvalidType(other.to_string())),
        }
    }
}

// =============================================================================
// ANNOTATIONS
// =============================================================================

/// How strongly a field matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchLevel {
    None,
    Partial,
    Full,
}

/// Per-field highlight annotation (`_highlightResult.<field>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightField {
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    pub match_level: MatchLevel,
    #[serde(default)]
    pub matched_words: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_highlighted: Option<bool>,
}

/// Per-field snippet annotation (`_snippetResult.<field>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetField {
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    pub match_level: MatchLevel,
}

// =============================================================================
// RECORDS
// =============================================================================

/// Read `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A state landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A content page. `body` is Markdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPostRecord {
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Typed fields of a hit, one shape per collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    State(StateRecord),
    Page(PageRecord),
    BlogPost(BlogPostRecord),
}

impl Record {
    /// Parse the plain (non-annotation) fields of a hit for `collection`.
    pub fn from_fields(
        collection: CollectionType,
        fields: Map<String, Value>,
    ) -> Result<Self, serde_json::Error> {
        let value = Value::Object(fields);
        Ok(match collection {
            CollectionType::State => Record::State(serde_json::from_value(value)?),
            CollectionType::Page => Record::Page(serde_json::from_value(value)?),
            CollectionType::BlogPost => Record::BlogPost(serde_json::from_value(value)?),
        })
    }

    pub fn collection(&self) -> CollectionType {
        match self {
            Record::State(_) => CollectionType::State,
            Record::Page(_) => CollectionType::Page,
            Record::BlogPost(_) => CollectionType::BlogPost,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            Record::State(r) => &r.slug,
            Record::Page(r) => &r.slug,
            Record::BlogPost(r) => &r.slug,
        }
    }

    /// The display title: `name` for states, `title` otherwise.
    pub fn title(&self) -> &str {
        match self {
            Record::State(r) => &r.name,
            Record::Page(r) => &r.title,
            Record::BlogPost(r) => &r.title,
        }
    }

    /// Markdown body, only pages carry one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Record::Page(r) => Some(&r.body),
            _ => None,
        }
    }
}

// =============================================================================
// HITS
// =============================================================================

/// Shape of a hit on the wire, before the record is typed.
#[derive(Deserialize)]
struct WireHit {
    #[serde(rename = "objectID", default)]
    object_id: String,
    #[serde(rename = "_highlightResult", default)]
    highlight_result: Map<String, Value>,
    #[serde(rename = "_snippetResult", default)]
    snippet_result: Map<String, Value>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

/// One matched record returned by the search capability.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hit {
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(flatten)]
    pub record: Record,
    #[serde(rename = "_highlightResult")]
    pub highlight: BTreeMap<String, HighlightField>,
    #[serde(rename = "_snippetResult")]
    pub snippet: BTreeMap<String, SnippetField>,
}

impl Hit {
    /// Parse a raw hit as returned by the index for `collection`.
    ///
    /// Annotations that don't look like a single-field annotation (array
    /// fields produce nested ones) are dropped rather than failing the hit.
    pub fn from_value(collection: CollectionType, value: Value) -> Result<Self, serde_json::Error> {
        let wire: WireHit = serde_json::from_value(value)?;
        let record = Record::from_fields(collection, wire.fields)?;
        Ok(Hit {
            object_id: wire.object_id,
            record,
            highlight: annotations(wire.highlight_result),
            snippet: annotations(wire.snippet_result),
        })
    }

    pub fn collection(&self) -> CollectionType {
        self.record.collection()
    }

    /// Match level of the collection's title field, if annotated.
    pub fn title_match_level(&self) -> Option<MatchLevel> {
        self.highlight
            .get(self.collection().title_field())
            .map(|h| h.match_level)
    }

    /// True only when the title field is annotated with a full match.
    pub fn is_full_title_match(&self) -> bool {
        self.title_match_level() == Some(MatchLevel::Full)
    }

    /// Non-empty snippet text for `field`.
    pub fn snippet_value(&self, field: &str) -> Option<&str> {
        self.snippet
            .get(field)
            .map(|s| s.value.as_str())
            .filter(|v| !v.is_empty())
    }
}

fn annotations<T: DeserializeOwned>(raw: Map<String, Value>) -> BTreeMap<String, T> {
    raw.into_iter()
        .filter_map(|(field, value)| serde_json::from_value(value).ok().map(|a| (field, a)))
        .collect()
}

// =============================================================================
// RESULT SETS
// =============================================================================

/// Response body of one index query, hits still untyped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteResponse {
    #[serde(default)]
    pub hits: Vec<Value>,
    #[serde(default)]
    pub nb_hits: usize,
}

/// Hits for one collection.
///
/// `hits == None` means the collection was never retrieved (initial state, or
/// its query failed). It reads as an empty hit list everywhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResultSet {
    pub hits: Option<Vec<Hit>>,
    pub nb_hits: usize,
}

impl RawResultSet {
    pub fn new(hits: Vec<Hit>) -> Self {
        let nb_hits = hits.len();
        Self {
            hits: Some(hits),
            nb_hits,
        }
    }

    /// Type every hit in `response` for `collection`.
    ///
    /// A malformed hit is skipped with a warning; the rest of the page
    /// survives.
    pub fn from_response(collection: CollectionType, response: RemoteResponse) -> Self {
        let hits = response
            .hits
            .into_iter()
            .filter_map(|value| match Hit::from_value(collection, value) {
                Ok(hit) => Some(hit),
                Err(e) => {
                    log::warn!("skipping malformed {} hit: {}", collection, e);
                    None
                }
            })
            .collect();
        Self {
            hits: Some(hits),
            nb_hits: response.nb_hits,
        }
    }

    pub fn hits(&self) -> &[Hit] {
        self.hits.as_deref().unwrap_or(&[])
    }

    pub fn is_missing(&self) -> bool {
        self.hits.is_none()
    }
}

/// The three result sets of a search, keyed by collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub state: RawResultSet,
    pub blog_post: RawResultSet,
    pub page: RawResultSet,
}

impl SearchResults {
    pub fn get(&self, collection: CollectionType) -> &RawResultSet {
        match collection {
            CollectionType::State => &self.state,
            CollectionType::BlogPost => &self.blog_post,
            CollectionType::Page => &self.page,
        }
    }

    pub fn insert(&mut self, collection: CollectionType, set: RawResultSet) {
        match collection {
            CollectionType::State => self.state = set,
            CollectionType::BlogPost => self.blog_post = set,
            CollectionType::Page => self.page = set,
        }
    }

    /// Result sets in merge order (state, blogPost, page).
    pub fn iter(&self) -> impl Iterator<Item = (CollectionType, &RawResultSet)> + '_ {
        CollectionType::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Number of hits across all collections.
    pub fn total_hits(&self) -> usize {
        self.iter().map(|(_, set)| set.hits().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_hits() == 0
    }

    /// Collections with no hit list at all.
    pub fn missing_collections(&self) -> Vec<CollectionType> {
        self.iter()
            .filter(|(_, set)| set.is_missing())
            .map(|(c, _)| c)
            .collect()
    }
}

impl FromIterator<(CollectionType, RawResultSet)> for SearchResults {
    fn from_iter<I: IntoIterator<Item = (CollectionType, RawResultSet)>>(iter: I) -> Self {
        let mut results = SearchResults::default();
        for (collection, set) in iter {
            results.insert(collection, set);
        }
        results
    }
}

// =============================================================================
// DISPLAY PAYLOAD
// =============================================================================

/// A hit ready for display: where it links to and what to show under it.
///
/// Serializes as the hit's own fields plus `type`, `route` and `excerptHtml`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedHit {
    #[serde(rename = "type")]
    pub collection: CollectionType,
    pub route: String,
    pub excerpt_html: String,
    #[serde(flatten)]
    pub hit: Hit,
}

impl NormalizedHit {
    pub fn title(&self) -> &str {
        self.hit.record.title()
    }
}
