//! Query targets and their results

use crate::config::{Config, ExtractorKind};
use crate::query::extractor::{Extractor, Finding, YearExtractor};
use std::fmt;
use std::sync::Arc;

/// A configured inventory page plus the strategy used to read it
#[derive(Debug, Clone)]
pub struct Source {
    url: String,
    label: String,
    extractor: Arc<dyn Extractor>,
}

impl Source {
    pub fn new(
        url: impl Into<String>,
        label: impl Into<String>,
        extractor: Arc<dyn Extractor>,
    ) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
            extractor,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Short entity tag, e.g. the model being searched for
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn extractor(&self) -> &dyn Extractor {
        self.extractor.as_ref()
    }
}

/// A successful extraction, tied back to the source that produced it
#[derive(Debug, Clone)]
pub struct Hit {
    source: Arc<Source>,
    finding: Finding,
}

impl Hit {
    pub fn new(source: Arc<Source>, finding: Finding) -> Self {
        Self { source, finding }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn finding(&self) -> &Finding {
        &self.finding
    }

    pub fn description(&self) -> &str {
        self.finding.description()
    }
}

/// Progress of a single source through a query run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryState {
    /// Not yet started
    Pending,

    /// Request in flight
    Fetching,

    /// Body received, walking the markup
    Extracting,

    /// Finished without error, with or without a hit
    Succeeded,

    /// Fetch or parse failed
    Failed,
}

impl fmt::Display for QueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Builds the ordered source list described by a configuration
///
/// Sources that select the same strategy share one extractor instance.
pub fn build_sources(config: &Config) -> Vec<Arc<Source>> {
    let year_marker: Arc<dyn Extractor> = Arc::new(YearExtractor::new(
        config.marker.clone(),
        config.window,
    ));

    config
        .sources
        .iter()
        .map(|entry| {
            let extractor = match entry.extractor {
                ExtractorKind::YearMarker => Arc::clone(&year_marker),
            };
            Arc::new(Source::new(&entry.url, &entry.label, extractor))
        })
        .collect()
}
