// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Algolia REST backend.
//!
//! One `POST /1/indexes/{index}/query` per search, authenticated with the
//! public search-only key. Nothing here retries; the dispatcher decides what a
//! failure means.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde_json::json;

use super::SearchIndex;
use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::types::{CollectionType, RemoteResponse};

const HEADER_APP_ID: &str = "X-Algolia-Application-Id";
const HEADER_API_KEY: &str = "X-Algolia-API-Key";

pub struct AlgoliaIndex {
    http: Client,
    index_name: String,
    url: String,
}

impl AlgoliaIndex {
    pub fn new(http: Client, config: &SearchConfig, collection: CollectionType) -> Self {
        let index_name = config.index_name(collection);
        let url = query_url(&config.app_id, &index_name);
        Self {
            http,
            index_name,
            url,
        }
    }

    /// HTTP client carrying the credentials and timeout from `config`.
    pub fn http_client(config: &SearchConfig) -> Result<Client> {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_APP_ID, header_value(&config.app_id)?);
        let mut key = header_value(&config.search_key)?;
        key.set_sensitive(true);
        headers.insert(HEADER_API_KEY, key);

        Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|source| SearchError::Transport {
                index: "*".to_string(),
                source,
            })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| SearchError::Config("credentials contain invalid header characters".to_string()))
}

/// DSN host for reads; it routes to the nearest replica.
pub(crate) fn query_url(app_id: &str, index_name: &str) -> String {
    format!(
        "https://{}-dsn.algolia.net/1/indexes/{}/query",
        app_id.to_lowercase(),
        urlencoding::encode(index_name)
    )
}

pub(crate) fn request_body(query: &str) -> serde_json::Value {
    json!({ "params": format!("query={}", urlencoding::encode(query)) })
}

/// Pull the `message` out of an Algolia error body, or fall back to the raw text.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl SearchIndex for AlgoliaIndex {
    fn name(&self) -> &str {
        &self.index_name
    }

    async fn search(&self, query: &str) -> Result<RemoteResponse> {
        log::debug!("querying {} for {:?}", self.index_name, query);

        let transport = |source| SearchError::Transport {
            index: self.index_name.clone(),
            source,
        };

        let response = self
            .http
            .post(&self.url)
            .json(&request_body(query))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(SearchError::Status {
                index: self.index_name.clone(),
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| SearchError::Decode {
            index: self.index_name.clone(),
            source,
        })
    }
}
