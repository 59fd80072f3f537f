// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! From raw hit to display payload.
//!
//! Two things a result row needs that the index doesn't give us directly:
//!
//! - **A route.** Slugs arrive with or without a leading `/`, and blog posts
//!   live under `/blog`. `route_for` papers over both. It is idempotent, so
//!   feeding it an already-normalized route is harmless.
//! - **An excerpt.** Pages show the highlighted body snippet when the index
//!   produced one, otherwise the start of the body. Either way it goes
//!   through the markup renderer. Other collections have no excerpt.

use crate::config::DEFAULT_EXCERPT_LENGTH;
use crate::error::Result;
use crate::markup::{truncate, MarkdownRenderer, MarkupRenderer};
use crate::types::{CollectionType, Hit, NormalizedHit};

const BLOG_PREFIX: &str = "/blog";

fn with_leading_slash(slug: &str) -> String {
    if slug.starts_with('/') {
        slug.to_string()
    } else {
        format!("/{}", slug)
    }
}

/// Absolute application path for a hit of `collection` with `slug`.
pub fn route_for(collection: CollectionType, slug: &str) -> String {
    let path = with_leading_slash(slug);
    match collection {
        CollectionType::State | CollectionType::Page => path,
        CollectionType::BlogPost => {
            if path.starts_with("/blog/") {
                path
            } else {
                format!("{}{}", BLOG_PREFIX, path)
            }
        }
    }
}

/// `route_for` at the string boundary: fails loudly on an unknown kind.
pub fn normalize_route(kind: &str, slug: &str) -> Result<String> {
    let collection: CollectionType = kind.parse()?;
    Ok(route_for(collection, slug))
}

/// Derives routes and excerpts for hits.
#[derive(Debug, Clone)]
pub struct Normalizer<R = MarkdownRenderer> {
    renderer: R,
    excerpt_length: usize,
}

impl Default for Normalizer<MarkdownRenderer> {
    fn default() -> Self {
        Self::new(DEFAULT_EXCERPT_LENGTH)
    }
}

impl Normalizer<MarkdownRenderer> {
    pub fn new(excerpt_length: usize) -> Self {
        Self::with_renderer(MarkdownRenderer, excerpt_length)
    }
}

impl<R: MarkupRenderer> Normalizer<R> {
    pub fn with_renderer(renderer: R, excerpt_length: usize) -> Self {
        Self {
            renderer,
            excerpt_length,
        }
    }

    pub fn excerpt_length(&self) -> usize {
        self.excerpt_length
    }

    /// Excerpt HTML for `hit` displayed as `collection`.
    ///
    /// Only pages have excerpts. A non-empty body snippet wins; otherwise the
    /// body is truncated to `excerpt_length` characters.
    pub fn excerpt_html(&self, collection: CollectionType, hit: &Hit) -> String {
        match collection {
            CollectionType::Page => match hit.snippet_value("body") {
                Some(snippet) => self.renderer.render(snippet),
                None => {
                    let body = hit.record.body().unwrap_or_default();
                    self.renderer.render(&truncate(body, self.excerpt_length))
                }
            },
            CollectionType::State | CollectionType::BlogPost => String::new(),
        }
    }

    /// Route and excerpt for a hit, typed by its own record.
    pub fn normalize(&self, hit: &Hit) -> NormalizedHit {
        self.normalize_typed(hit.collection(), hit)
    }

    /// Same as `normalize`, with the collection given as a wire tag.
    pub fn normalize_as(&self, kind: &str, hit: &Hit) -> Result<NormalizedHit> {
        Ok(self.normalize_typed(kind.parse()?, hit))
    }

    fn normalize_typed(&self, collection: CollectionType, hit: &Hit) -> NormalizedHit {
        NormalizedHit {
            collection,
            route: route_for(collection, hit.record.slug()),
            excerpt_html: self.excerpt_html(collection, hit),
            hit: hit.clone(),
        }
    }
}
