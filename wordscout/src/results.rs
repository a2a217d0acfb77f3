/// Result types for a batch of queries.
///
/// A [`BatchResult`] is built once, after every query has been searched, and
/// is not mutated afterwards. It owns its data outright: nothing in it
/// borrows from the haystack or from the query patterns, so it can outlive
/// both and be moved freely between threads.
use serde::Serialize;
use std::time::Duration;

use crate::errors::{QueryError, SearchResult};

/// Per-query match flags plus their aggregate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    /// One flag per query, in the original query order
    flags: Vec<bool>,
    /// Number of `true` flags
    total_matches: usize,
    /// Recoverable problems, ordered by query index
    issues: Vec<QueryError>,
}

impl BatchResult {
    /// Assembles a result from ordered flags and the issues seen while searching
    pub fn new(flags: Vec<bool>, total_matches: usize, mut issues: Vec<QueryError>) -> Self {
        debug_assert_eq!(total_matches, flags.iter().filter(|&&f| f).count());
        issues.sort_by_key(QueryError::index);
        Self {
            flags,
            total_matches,
            issues,
        }
    }

    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    pub fn total_matches(&self) -> usize {
        self.total_matches
    }

    pub fn issues(&self) -> &[QueryError] {
        &self.issues
    }

    pub fn query_count(&self) -> usize {
        self.flags.len()
    }

    /// Indices of the queries that matched
    pub fn matched_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(i, &matched)| matched.then_some(i))
    }

    /// Pretty-printed JSON for machine consumers
    pub fn to_json(&self) -> SearchResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Complete output of an end-to-end search run
#[derive(Debug, Clone)]
pub struct SearchOutput {
    pub batch: BatchResult,
    /// Time spent loading the haystack and the queries
    pub load_time: Duration,
    /// Time spent matching
    pub search_time: Duration,
    /// Size of the haystack in bytes
    pub haystack_len: usize,
}

impl SearchOutput {
    pub fn total_time(&self) -> Duration {
        self.load_time + self.search_time
    }
}
