// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One error type for the whole search pipeline.
//!
//! The variants map onto three very different outcomes:
//!
//! - **Per-collection query failures** (`Transport`, `Status`, `Decode`) are
//!   recovered by the dispatcher. The collection reads as "no hits", the
//!   failure gets logged, and nobody else hears about it.
//! - **Dispatch failures** (`Dispatch`) mean the concurrent join itself broke.
//!   They land in `SearchState::errors` and flip `has_errors`.
//! - **Contract violations** (`InvalidType`) mean a caller handed us a
//!   collection tag we don't know. Those abort the operation.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// A collection tag outside `state` / `page` / `blogPost`.
    #[error("Invalid search result type: {0}")]
    InvalidType(String),

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("request to index '{index}' failed: {source}")]
    Transport {
        index: String,
        #[source]
        source: reqwest::Error,
    },

    /// The index answered with a non-success HTTP status.
    #[error("index '{index}' returned HTTP {status}: {message}")]
    Status {
        index: String,
        status: u16,
        message: String,
    },

    /// The response body was not the shape we expected.
    #[error("could not decode response from index '{index}': {source}")]
    Decode {
        index: String,
        #[source]
        source: serde_json::Error,
    },

    /// The concurrent join over the per-collection queries failed.
    #[error("search dispatch failed: {0}")]
    Dispatch(String),

    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SearchError {
    /// True for failures the dispatcher swallows per collection.
    pub fn is_query_failure(&self) -> bool {
        matches!(
            self,
            SearchError::Transport { .. } | SearchError::Status { .. } | SearchError::Decode { .. }
        )
    }
}

pub type Result<T, E = SearchError> = std::result::Result<T, E>;
