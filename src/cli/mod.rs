// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the ctp-search command-line interface.
//!
//! Two subcommands: `search` runs a query against the hosted indexes and
//! prints the partitioned results, `ltc` prints the long-term-care summary
//! table for one state from a local aggregate file. Credentials come from a
//! config file, the environment, or flags, in increasing precedence.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ctp_search::config::{ENV_APP_ID, ENV_INDEX_PREFIX, ENV_SEARCH_KEY};

#[derive(Parser)]
#[command(
    name = "ctp-search",
    about = "Search the COVID Tracking Project site from the terminal",
    version
)]
pub struct Cli {
    /// Log at debug level (RUST_LOG still wins)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search states, blog posts and pages
    Search {
        /// Search query
        query: String,

        /// JSON config file (appId, searchKey, indexPrefix, ...)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Search application id
        #[arg(long, env = ENV_APP_ID)]
        app_id: Option<String>,

        /// Search-only API key
        #[arg(long, env = ENV_SEARCH_KEY, hide_env_values = true)]
        search_key: Option<String>,

        /// Prefix prepended to each index name
        #[arg(long, env = ENV_INDEX_PREFIX)]
        index_prefix: Option<String>,

        /// Maximum excerpt length for page bodies, in characters
        #[arg(long)]
        excerpt_length: Option<usize>,

        /// Print normalized results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the long-term-care summary for one state
    Ltc {
        /// Path to the state's LTC aggregate record (JSON object)
        file: PathBuf,

        /// State slug, used for the history link
        #[arg(short, long)]
        state: String,

        /// Print the summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
