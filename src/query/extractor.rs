//! Year extraction from listing pages
//!
//! A listing page marks each vehicle's model year with an element such as
//! `<span id="el3_yard_locations_Year"><span>1987</span></span>`. The
//! `YearExtractor` walks the page, reads the first text segment of every
//! marker element, and keeps the years that fall inside the target window.

use crate::config::MarkerConfig;
use crate::query::walker::{parse, walk_document, Visitor};
use scraper::ElementRef;
use serde::Deserialize;
use std::fmt;

/// Target year range, exclusive below and inclusive above: `(after, through]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct YearWindow {
    /// Years equal to or below this are rejected
    pub after: i32,

    /// Highest accepted year
    pub through: i32,
}

impl YearWindow {
    pub fn new(after: i32, through: i32) -> Self {
        Self { after, through }
    }

    pub fn contains(&self, year: i32) -> bool {
        year > self.after && year <= self.through
    }
}

impl fmt::Display for YearWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}]", self.after, self.through)
    }
}

/// The matched facts pulled out of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    years: Vec<i32>,
    description: String,
}

impl Finding {
    /// Builds a finding from accepted years, or `None` when there are none
    pub fn from_years(years: Vec<i32>) -> Option<Self> {
        if years.is_empty() {
            return None;
        }

        let description = years
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(" ");

        Some(Self { years, description })
    }

    /// Accepted years in document order, duplicates included
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Space-separated accepted years
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// An extraction strategy applied to a fetched page
pub trait Extractor: fmt::Debug + Send + Sync {
    /// Extracts a finding from a page body
    ///
    /// Returns `None` when nothing on the page matched; an empty or
    /// text-only body is a page with nothing on it, not an error.
    fn extract(&self, page: &str) -> Option<Finding>;
}

/// Extracts model years from marker elements and filters them by window
#[derive(Debug, Clone)]
pub struct YearExtractor {
    marker: MarkerConfig,
    window: YearWindow,
}

impl YearExtractor {
    pub fn new(marker: MarkerConfig, window: YearWindow) -> Self {
        Self { marker, window }
    }
}

impl Extractor for YearExtractor {
    fn extract(&self, page: &str) -> Option<Finding> {
        let document = parse(page);

        let mut collector = YearCollector::new(&self.marker, self.window);
        walk_document(&document, &mut collector);

        tracing::trace!(
            "{} marker elements, {} years in window {}",
            collector.markers_seen,
            collector.years.len(),
            self.window
        );

        Finding::from_years(collector.years)
    }
}

/// Accumulates accepted years during a document walk
struct YearCollector<'m> {
    marker: &'m MarkerConfig,
    window: YearWindow,
    markers_seen: usize,
    years: Vec<i32>,
}

impl<'m> YearCollector<'m> {
    fn new(marker: &'m MarkerConfig, window: YearWindow) -> Self {
        Self {
            marker,
            window,
            markers_seen: 0,
            years: Vec::new(),
        }
    }

    fn is_marker(&self, element: ElementRef<'_>) -> bool {
        let value = element.value();
        value.name().eq_ignore_ascii_case(&self.marker.tag)
            && value
                .attr(&self.marker.attribute)
                .is_some_and(|attr| attr.contains(self.marker.contains.as_str()))
    }
}

impl<'a> Visitor<'a> for YearCollector<'_> {
    fn visit_element(&mut self, element: ElementRef<'a>) {
        if !self.is_marker(element) {
            return;
        }
        self.markers_seen += 1;

        let Some(text) = first_text(element) else {
            return;
        };

        // Listings are hand-entered; a non-numeric year only skips this node.
        match text.parse::<i32>() {
            Ok(year) if self.window.contains(year) => self.years.push(year),
            Ok(year) => tracing::trace!("year {} outside window {}", year, self.window),
            Err(_) => tracing::trace!("skipping non-numeric year {:?}", text),
        }
    }
}

/// First non-blank text segment under an element, trimmed
fn first_text<'a>(element: ElementRef<'a>) -> Option<&'a str> {
    element.text().map(str::trim).find(|s| !s.is_empty())
}
