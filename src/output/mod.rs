//! Output module for run reports
//!
//! This module handles:
//! - The `Reporter` interface the CLI writes through
//! - The file-backed reporter (error file + hit log)
//! - Formatting of hits and run summaries

mod report;
mod traits;

pub use report::FileReporter;
pub use traits::{OutputError, OutputResult, Reporter, RunSummary};

use crate::query::{Hit, QueryOutcome};
use chrono::{DateTime, Utc};

/// Formats a hit as a log entry
///
/// ```text
///
/// Source entity 'maxima', found at https://...:
///     1985 1988
/// ```
pub fn format_hit(hit: &Hit) -> String {
    format!(
        "\nSource entity '{}', found at {}:\n    {}\n",
        hit.source().label(),
        hit.source().url(),
        hit.description()
    )
}

/// Formats the one-line run summary
pub fn format_summary(summary: &RunSummary) -> String {
    format!(
        "{} sources, {} hits ({}, config {})",
        summary.source_count,
        summary.hit_count,
        summary.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
        short_hash(&summary.config_hash)
    )
}

fn short_hash(hash: &str) -> &str {
    hash.get(..12).unwrap_or(hash)
}

/// Writes a query outcome through a reporter
///
/// The aggregate error (if any) and the summary go to the failure stream,
/// each hit goes to the log. A hit that fails to write is reported on the
/// failure stream and the remaining hits are still written.
///
/// `started_at` is the time the run began, taken before any source was
/// queried.
pub fn report_outcome(
    reporter: &mut dyn Reporter,
    outcome: &QueryOutcome,
    started_at: DateTime<Utc>,
    config_hash: &str,
) -> OutputResult<RunSummary> {
    if let Some(error) = &outcome.error {
        reporter.record_failure(&error.to_string())?;
    }

    let summary = RunSummary::new(
        started_at,
        config_hash,
        outcome.source_count,
        outcome.hits.len(),
    );
    reporter.record_summary(&summary)?;

    for hit in &outcome.hits {
        if let Err(e) = reporter.record_hit(hit) {
            tracing::error!("Failed to record hit for {}: {}", hit.source().label(), e);
            reporter.record_failure(&e.to_string())?;
        }
    }

    reporter.finish()?;
    Ok(summary)
}
