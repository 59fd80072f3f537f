//! Site search for the COVID Tracking Project.
//!
//! One query fans out to three hosted indexes (states, blog posts, pages).
//! The hits come back annotated with how well each field matched, get split
//! into "best" (full title match) and "other", and are then normalized into
//! something a result list can render: a route and an HTML excerpt.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌────────────────┐
//! │  dispatch.rs │────▶│  client/     │────▶│ hosted indexes │
//! │ (fetch_all,  │     │ (SearchIndex,│     │ state/blogPost/│
//! │  reducer)    │◀────│  Algolia)    │◀────│ page           │
//! └──────────────┘     └──────────────┘     └────────────────┘
//!        │
//!        ▼
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  state.rs    │────▶│ partition.rs │────▶│ normalize.rs │
//! │ (SearchStore)│     │ (best/other) │     │ (route,      │
//! │              │     │              │     │  excerpt)    │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! The `ltc` and `race` modules hold the table arithmetic for the state data
//! pages that search results link to, and `series` the seven-day averages
//! behind the homepage charts.
//!
//! # Usage
//!
//! ```ignore
//! use ctp_search::{dispatch, partition_hits_by_relevance, Normalizer, SearchClient, SearchConfig, SearchStore};
//!
//! let client = SearchClient::algolia(&SearchConfig::from_env())?;
//! let store = SearchStore::new();
//! dispatch::set_query_and_search(&store, &client, "nursing homes").await;
//!
//! let partition = partition_hits_by_relevance(&store.snapshot().results);
//! let display = partition.normalize(&Normalizer::default());
//! ```

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod ltc;
pub mod markup;
pub mod normalize;
pub mod partition;
pub mod race;
pub mod series;
pub mod state;
pub mod types;
pub mod utils;

// Test helpers, compiled always so integration tests and fuzz targets can
// reach them.
pub mod testing;

pub use client::{AlgoliaIndex, SearchClient, SearchIndex};
pub use config::SearchConfig;
pub use dispatch::{dispatch_search, fetch_all, set_query_and_search};
pub use error::{Result, SearchError};
pub use ltc::{LtcAggregate, LtcSummary};
pub use markup::{truncate, MarkdownRenderer, MarkupRenderer};
pub use normalize::{normalize_route, route_for, Normalizer};
pub use partition::{partition_hits_by_relevance, PartitionResult};
pub use series::{daily_series, DailyPoint, DailySeries};
pub use state::{Action, FetchStatus, SearchState, SearchStore};
pub use types::{
    CollectionType, Hit, MatchLevel, NormalizedHit, RawResultSet, Record, RemoteResponse,
    SearchResults,
};
