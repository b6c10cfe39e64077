//! Yard-Scout: a salvage yard inventory watcher
//!
//! This crate queries a fixed list of yard inventory pages, pulls the model
//! years out of each listing, and reports which yards have a vehicle inside
//! the target year window.

pub mod config;
pub mod output;
pub mod query;

use std::time::Duration;
use thiserror::Error;

/// Main error type for Yard-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error(transparent)]
    QueriesFailed(#[from] query::QueriesFailed),
}

/// Errors that fail a single source query
///
/// None of these stop the batch; the aggregator records them against the
/// source and moves on.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request to {url} timed out after {after:?}")]
    Timeout { url: String, after: Duration },

    #[error("Content-Type mismatch for {url}: expected markup, got {content_type}")]
    ContentMismatch { url: String, content_type: String },
}

impl QueryError {
    /// Returns true if the source was reachable but the request ran out of time
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// The URL of the source that failed
    pub fn url(&self) -> &str {
        match self {
            Self::Http { url, .. }
            | Self::Status { url, .. }
            | Self::Timeout { url, .. }
            | Self::ContentMismatch { url, .. } => url,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Yard-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

// Re-export commonly used types
pub use config::Config;
pub use query::{run_queries, Hit, QueriesFailed, QueryOutcome, Source};
