//! Query aggregation - runs every source and merges the outcome
//!
//! Sources are queried one after another in configuration order. A failing
//! source is recorded and skipped; it never stops the sources after it.

use crate::query::extractor::Finding;
use crate::query::failures::{QueriesFailed, SourceFailure};
use crate::query::fetcher::fetch_page;
use crate::query::source::{Hit, QueryState, Source};
use crate::QueryError;
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Everything a query run produced
#[derive(Debug)]
pub struct QueryOutcome {
    /// Hits in source order, at most one per source
    pub hits: Vec<Hit>,

    /// Every per-source failure, `None` when no source failed
    pub error: Option<QueriesFailed>,

    /// Number of sources that were queried
    pub source_count: usize,
}

impl QueryOutcome {
    /// True when every source produced a hit and none failed
    pub fn is_complete(&self) -> bool {
        self.error.is_none() && self.hits.len() == self.source_count
    }

    /// True when at least one source failed to fetch
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }

    /// Drops partial hits when any source failed
    pub fn into_result(self) -> Result<Vec<Hit>, QueriesFailed> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.hits),
        }
    }
}

/// Runs every source in order and aggregates the results
///
/// Each source gets its own fresh `timeout` budget. Failures are collected
/// into the outcome's error; hits collected before and after a failure are
/// always returned.
///
/// # Arguments
///
/// * `client` - HTTP client shared by all fetches
/// * `sources` - The sources to query, in order
/// * `timeout` - Per-source time budget
pub async fn run_queries(
    client: &Client,
    sources: &[Arc<Source>],
    timeout: Duration,
) -> QueryOutcome {
    let start_time = Instant::now();
    let mut hits = Vec::new();
    let mut failures = Vec::new();

    for source in sources {
        tracing::debug!(
            "[{}] {} -> {}",
            source.label(),
            QueryState::Pending,
            QueryState::Fetching
        );

        match query_source(client, source, timeout).await {
            Ok(Some(finding)) => {
                tracing::info!(
                    "[{}] {}: years {}",
                    source.label(),
                    QueryState::Succeeded,
                    finding.description()
                );
                hits.push(Hit::new(Arc::clone(source), finding));
            }
            Ok(None) => {
                tracing::info!(
                    "[{}] {}: no years in window",
                    source.label(),
                    QueryState::Succeeded
                );
            }
            Err(error) => {
                tracing::warn!("[{}] {}: {}", source.label(), QueryState::Failed, error);
                failures.push(SourceFailure {
                    label: source.label().to_string(),
                    url: source.url().to_string(),
                    error,
                });
            }
        }
    }

    tracing::info!(
        "Queried {} sources in {:?}: {} hits, {} failures",
        sources.len(),
        start_time.elapsed(),
        hits.len(),
        failures.len()
    );

    QueryOutcome {
        hits,
        error: QueriesFailed::from_failures(failures),
        source_count: sources.len(),
    }
}

/// Fetches and extracts a single source
async fn query_source(
    client: &Client,
    source: &Source,
    timeout: Duration,
) -> Result<Option<Finding>, QueryError> {
    let page = fetch_page(client, source.url(), timeout).await?;

    tracing::debug!(
        "[{}] {} -> {} ({} bytes)",
        source.label(),
        QueryState::Fetching,
        QueryState::Extracting,
        page.len()
    );

    Ok(source.extractor().extract(&page))
}
