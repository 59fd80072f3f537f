// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Two-tier relevance partitioning.
//!
//! The hosted index already ranks hits within a collection. What it can't do
//! is rank *across* collections, so we impose one coarse rule on top: a hit
//! whose title (or state name) matched the query in full goes to the best
//! tier, everything else to the other tier.
//!
//! **Invariants**:
//! - Every input hit lands in exactly one tier.
//! - Order inside a tier follows collection order (state, blogPost, page),
//!   then the index's own ranking.
//! - A collection with no hit list is skipped, never an error.

use serde::Serialize;

use crate::markup::MarkupRenderer;
use crate::normalize::Normalizer;
use crate::types::{Hit, NormalizedHit, SearchResults};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionResult<T = Hit> {
    pub best_hits: Vec<T>,
    pub other_hits: Vec<T>,
}

impl<T> Default for PartitionResult<T> {
    fn default() -> Self {
        Self {
            best_hits: Vec::new(),
            other_hits: Vec::new(),
        }
    }
}

impl<T> PartitionResult<T> {
    pub fn len(&self) -> usize {
        self.best_hits.len() + self.other_hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Best tier first, then the rest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.best_hits.iter().chain(self.other_hits.iter())
    }

    /// Apply `f` to every hit, keeping tiers and order.
    pub fn map<U, F: FnMut(&T) -> U>(&self, mut f: F) -> PartitionResult<U> {
        PartitionResult {
            best_hits: self.best_hits.iter().map(&mut f).collect(),
            other_hits: self.other_hits.iter().map(&mut f).collect(),
        }
    }
}

impl PartitionResult<Hit> {
    /// Routes and excerpts for every hit.
    pub fn normalize<R: MarkupRenderer>(
        &self,
        normalizer: &Normalizer<R>,
    ) -> PartitionResult<NormalizedHit> {
        self.map(|hit| normalizer.normalize(hit))
    }
}

/// Split all hits into full-title matches and everything else.
pub fn partition_hits_by_relevance(results: &SearchResults) -> PartitionResult {
    let mut partition = PartitionResult::default();

    for (collection, set) in results.iter() {
        let Some(hits) = set.hits.as_ref() else {
            log::debug!("no hit list for {}, skipping", collection);
            continue;
        };
        for hit in hits {
            if hit.is_full_title_match() {
                partition.best_hits.push(hit.clone());
            } else {
                partition.other_hits.push(hit.clone());
            }
        }
    }

    partition
}
