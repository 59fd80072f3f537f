use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;

use ctp_search::{
    partition_hits_by_relevance, set_query_and_search, FetchStatus, LtcAggregate, LtcSummary,
    Normalizer, SearchClient, SearchConfig, SearchStore,
};

mod cli;
use cli::{display, Cli, Commands};

/// Flags given on the command line, applied over file and environment.
struct SearchFlags {
    config: Option<PathBuf>,
    app_id: Option<String>,
    search_key: Option<String>,
    index_prefix: Option<String>,
    excerpt_length: Option<usize>,
}

fn main() {
    let cli = Cli::parse();

    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env).init();

    if let Err(e) = run(cli.command) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Search {
            query,
            config,
            app_id,
            search_key,
            index_prefix,
            excerpt_length,
            json,
        } => {
            let flags = SearchFlags {
                config,
                app_id,
                search_key,
                index_prefix,
                excerpt_length,
            };
            run_search(&query, flags, json)
        }
        Commands::Ltc { file, state, json } => run_ltc(&file, &state, json),
    }
}

/// File first, then environment, then flags.
fn load_config(flags: SearchFlags) -> Result<SearchConfig> {
    let mut config = match &flags.config {
        Some(path) => SearchConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SearchConfig::default(),
    };
    config.apply_overrides(|key| std::env::var(key).ok());

    if let Some(app_id) = flags.app_id {
        config.app_id = app_id;
    }
    if let Some(search_key) = flags.search_key {
        config.search_key = search_key;
    }
    if let Some(prefix) = flags.index_prefix {
        config.index_prefix = prefix;
    }
    if let Some(length) = flags.excerpt_length {
        config.excerpt_length = length;
    }

    config.validate()?;
    Ok(config)
}

fn run_search(query: &str, flags: SearchFlags, json: bool) -> Result<()> {
    let config = load_config(flags)?;
    let client = SearchClient::algolia(&config)?;
    let store = SearchStore::new();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build runtime")?;
    runtime.block_on(set_query_and_search(&store, &client, query));

    let state = store.snapshot();
    if state.status() == FetchStatus::Failed {
        let message = state
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        bail!("search for {:?} failed: {}", query, message);
    }

    let normalizer = Normalizer::new(config.excerpt_length);
    let results = partition_hits_by_relevance(&state.results).normalize(&normalizer);
    let failed = state.failed_collections();

    if json {
        let out = serde_json::to_string_pretty(&results).context("serializing results")?;
        println!("{}", out);
    } else {
        display::print_results(query, &results, &failed);
    }
    Ok(())
}

fn run_ltc(path: &Path, state: &str, json: bool) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let aggregate: LtcAggregate = serde_json::from_str(&content)
        .with_context(|| format!("{} is not an LTC record", path.display()))?;

    let summary = LtcSummary::build(state, &aggregate);
    if json {
        let out = serde_json::to_string_pretty(&summary).context("serializing summary")?;
        println!("{}", out);
    } else {
        display::print_ltc(&summary);
    }
    Ok(())
}
