use crate::query::YearWindow;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Yard-Scout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub query: QueryConfig,
    pub window: YearWindow,
    #[serde(default)]
    pub marker: MarkerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default, rename = "source")]
    pub sources: Vec<SourceEntry>,
}

impl Config {
    /// Per-source query timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.query.timeout_ms)
    }
}

/// Request behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// Per-source time budget covering the request and the body read (milliseconds)
    #[serde(rename = "timeout-ms", default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

/// Identifies the year-bearing elements of a listing page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarkerConfig {
    /// Element name, e.g. `span`
    #[serde(default = "default_marker_tag")]
    pub tag: String,

    /// Attribute inspected on candidate elements
    #[serde(default = "default_marker_attribute")]
    pub attribute: String,

    /// Substring the attribute value must contain
    #[serde(default = "default_marker_contains")]
    pub contains: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            tag: default_marker_tag(),
            attribute: default_marker_attribute(),
            contains: default_marker_contains(),
        }
    }
}

/// Report file locations
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the report files are written into (created if missing)
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// Failures and the run summary
    #[serde(rename = "error-file", default = "default_error_file")]
    pub error_file: String,

    /// One entry per hit
    #[serde(rename = "log-file", default = "default_log_file")]
    pub log_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            error_file: default_error_file(),
            log_file: default_log_file(),
        }
    }
}

/// A single inventory page to query
#[derive(Debug, Clone, Deserialize)]
pub struct SourceEntry {
    /// Absolute URL of the listing page
    pub url: String,

    /// Short entity tag shown in reports (e.g. "maxima")
    pub label: String,

    /// Extraction strategy used on the fetched page
    #[serde(default)]
    pub extractor: ExtractorKind,
}

/// Extraction strategy selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractorKind {
    /// Years held in marker elements, filtered by the configured window
    #[default]
    YearMarker,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    format!("yard-scout/{}", env!("CARGO_PKG_VERSION"))
}

fn default_marker_tag() -> String {
    "span".to_string()
}

fn default_marker_attribute() -> String {
    "id".to_string()
}

fn default_marker_contains() -> String {
    "yard_locations_Year".to_string()
}

fn default_output_directory() -> String {
    "results".to_string()
}

fn default_error_file() -> String {
    "err.txt".to_string()
}

fn default_log_file() -> String {
    "log.txt".to_string()
}
