// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search state and the one place it changes.
//!
//! `SearchState` is a plain value; `SearchState::apply` is the reducer.
//! `SearchStore` wraps one state behind a lock and is the only thing the
//! dispatcher touches, so transitions happen one action at a time no matter
//! how many queries are in flight.
//!
//! The UI has to tell three outcomes apart: still loading, loaded with zero
//! results, loaded with an error. `SearchState::status` makes that a single
//! match instead of a combination of flags.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::SearchError;
use crate::types::{CollectionType, SearchResults};

/// Everything that can happen to search state.
#[derive(Debug)]
pub enum Action {
    SetQuery(String),
    FetchStart,
    FetchError(SearchError),
    FetchSuccess(SearchResults),
}

/// What the result area should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// Nothing searched yet.
    Idle,
    Loading,
    /// Last fetch succeeded; `empty` when no collection returned a hit.
    Loaded { empty: bool },
    /// Last fetch failed at the dispatch level.
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub results: SearchResults,
    pub is_fetching: bool,
    pub has_errors: bool,
    pub errors: Vec<Arc<SearchError>>,
    /// Set by the first successful fetch.
    pub has_loaded: bool,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reducer. Results are only replaced on success; a failed fetch keeps
    /// whatever was there before.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetQuery(query) => {
                self.query = query;
            }
            Action::FetchStart => {
                self.is_fetching = true;
                self.has_errors = false;
                self.errors.clear();
            }
            Action::FetchError(error) => {
                self.is_fetching = false;
                self.has_errors = true;
                self.errors.push(Arc::new(error));
            }
            Action::FetchSuccess(results) => {
                self.is_fetching = false;
                self.results = results;
                self.has_loaded = true;
            }
        }
    }

    pub fn status(&self) -> FetchStatus {
        if self.is_fetching {
            FetchStatus::Loading
        } else if self.has_errors {
            FetchStatus::Failed
        } else if self.has_loaded {
            FetchStatus::Loaded {
                empty: self.results.is_empty(),
            }
        } else {
            FetchStatus::Idle
        }
    }

    /// Collections whose query failed in the last successful fetch.
    ///
    /// These don't count as errors; callers may still want to say that some
    /// results could be missing.
    pub fn failed_collections(&self) -> Vec<CollectionType> {
        if self.has_loaded {
            self.results.missing_collections()
        } else {
            Vec::new()
        }
    }
}

/// The single state container for a session.
#[derive(Debug, Default)]
pub struct SearchStore {
    state: Mutex<SearchState>,
}

impl SearchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&self, action: Action) {
        log::trace!("dispatch {:?}", action);
        self.state.lock().apply(action);
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SearchState {
        self.state.lock().clone()
    }

    /// Read the state without copying it.
    pub fn with_state<T>(&self, f: impl FnOnce(&SearchState) -> T) -> T {
        f(&self.state.lock())
    }

    pub fn query(&self) -> String {
        self.with_state(|s| s.query.clone())
    }
}
