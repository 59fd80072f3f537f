// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The remote search capability, as seen from this side of the wire.
//!
//! `SearchIndex` is the seam: one implementation per backend, plus test
//! doubles in `crate::testing`. `SearchClient` bundles the three indexes the
//! site searches and is built once, then handed to the dispatcher.

mod algolia;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::types::{CollectionType, RemoteResponse};

pub use algolia::AlgoliaIndex;

/// A single remotely hosted index.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Index name, for logs and error messages.
    fn name(&self) -> &str;

    /// Run `query` and return ranked hits, best first.
    async fn search(&self, query: &str) -> Result<RemoteResponse>;
}

/// One index per collection.
#[derive(Clone)]
pub struct SearchClient {
    state: Arc<dyn SearchIndex>,
    blog_post: Arc<dyn SearchIndex>,
    page: Arc<dyn SearchIndex>,
}

impl SearchClient {
    pub fn new(
        state: Arc<dyn SearchIndex>,
        blog_post: Arc<dyn SearchIndex>,
        page: Arc<dyn SearchIndex>,
    ) -> Self {
        Self {
            state,
            blog_post,
            page,
        }
    }

    /// Client backed by the hosted Algolia application in `config`.
    ///
    /// All three indexes share one HTTP connection pool.
    pub fn algolia(config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        let http = AlgoliaIndex::http_client(config)?;
        let index = |collection| -> Arc<dyn SearchIndex> {
            Arc::new(AlgoliaIndex::new(http.clone(), config, collection))
        };
        Ok(Self::new(
            index(CollectionType::State),
            index(CollectionType::BlogPost),
            index(CollectionType::Page),
        ))
    }

    pub fn index(&self, collection: CollectionType) -> Arc<dyn SearchIndex> {
        match collection {
            CollectionType::State => Arc::clone(&self.state),
            CollectionType::BlogPost => Arc::clone(&self.blog_post),
            CollectionType::Page => Arc::clone(&self.page),
        }
    }
}

impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient")
            .field("state", &self.state.name())
            .field("blog_post", &self.blog_post.name())
            .field("page", &self.page.name())
            .finish()
    }
}
