//! Query module - the inventory query engine
//!
//! This module contains the core query logic, including:
//! - HTTP fetching with a per-source timeout
//! - Markup parsing and pre-order tree walking
//! - Year extraction and window filtering
//! - Sequential aggregation of hits and per-source failures

mod aggregator;
mod extractor;
mod failures;
mod fetcher;
mod source;
mod walker;

pub use aggregator::{run_queries, QueryOutcome};
pub use extractor::{Extractor, Finding, YearExtractor, YearWindow};
pub use failures::{QueriesFailed, SourceFailure, QUERIES_FAILED};
pub use fetcher::{build_http_client, fetch_page};
pub use source::{build_sources, Hit, QueryState, Source};
pub use walker::{parse, walk, walk_document, Visitor};

use crate::config::Config;

/// Runs every configured source
///
/// This is the main entry point for a query run. It will:
/// 1. Build the shared HTTP client
/// 2. Build the source list from the configuration
/// 3. Query each source in order
///
/// # Returns
///
/// * `Ok(QueryOutcome)` - The run completed; individual sources may still
///   have failed, see [`QueryOutcome::error`]
/// * `Err(ScoutError::Client)` - The HTTP client could not be built
pub async fn run(config: &Config) -> crate::Result<QueryOutcome> {
    let client = build_http_client(&config.query.user_agent, config.timeout())?;
    let sources = build_sources(config);

    tracing::info!(
        "Querying {} sources for years in {}",
        sources.len(),
        config.window
    );

    Ok(run_queries(&client, &sources, config.timeout()).await)
}
