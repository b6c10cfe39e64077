//! Batch-level failure aggregation

use crate::QueryError;
use std::error::Error;
use std::fmt;

/// Sentinel text that ends every aggregate failure message
pub const QUERIES_FAILED: &str = "some queries failed";

/// One source's failure, tagged with the source it came from
#[derive(Debug)]
pub struct SourceFailure {
    pub label: String,
    pub url: String,
    pub error: QueryError,
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.label, self.error)
    }
}

/// Every per-source failure of a query run
///
/// Never empty: a run with no failures has no `QueriesFailed` at all.
#[derive(Debug)]
pub struct QueriesFailed {
    failures: Vec<SourceFailure>,
}

impl QueriesFailed {
    /// Folds recorded failures into an aggregate, `None` when nothing failed
    pub fn from_failures(failures: Vec<SourceFailure>) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(Self { failures })
        }
    }

    /// Failures in the order the sources were queried
    pub fn failures(&self) -> &[SourceFailure] {
        &self.failures
    }

    /// Labels of the failed sources, in query order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|f| f.label.as_str())
    }
}

impl fmt::Display for QueriesFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for failure in &self.failures {
            write!(f, "{}; ", failure)?;
        }
        f.write_str(QUERIES_FAILED)
    }
}

impl Error for QueriesFailed {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.failures
            .first()
            .map(|f| &f.error as &(dyn Error + 'static))
    }
}
