//! Reporter trait and report types
//!
//! The query engine never writes reports itself; the caller hands its
//! outcome to a `Reporter`.

use crate::query::Hit;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Run-level information written alongside the hits
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// When the first source query was issued
    pub started_at: DateTime<Utc>,
    pub config_hash: String,
    pub source_count: usize,
    pub hit_count: usize,
}

impl RunSummary {
    pub fn new(
        started_at: DateTime<Utc>,
        config_hash: impl Into<String>,
        source_count: usize,
        hit_count: usize,
    ) -> Self {
        Self {
            started_at,
            config_hash: config_hash.into(),
            source_count,
            hit_count,
        }
    }
}

/// Destination for the failure stream and the hit log
pub trait Reporter {
    /// Records a failure message (aggregate error, write problems)
    fn record_failure(&mut self, message: &str) -> OutputResult<()>;

    /// Records a single hit
    fn record_hit(&mut self, hit: &Hit) -> OutputResult<()>;

    /// Records the run summary on the failure stream
    fn record_summary(&mut self, summary: &RunSummary) -> OutputResult<()>;

    /// Flushes buffered output
    fn finish(&mut self) -> OutputResult<()>;
}
