use rayon::prelude::*;
use std::num::NonZeroUsize;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

use super::matcher::BoyerMoore;
use super::query::QueryRecord;
use crate::config::SearchConfig;
use crate::errors::{QueryError, SearchError, SearchResult};
use crate::loader::{load_queries, Haystack};
use crate::metrics::SearchMetrics;
use crate::results::{BatchResult, SearchOutput};

const MIN_CHUNK_SIZE: usize = 16;
const MAX_CHUNK_SIZE: usize = 256;

/// How the queries of a batch are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// One query after another on the calling thread
    Sequential,
    /// Fan out over a dedicated pool of `threads` workers
    Parallel { threads: NonZeroUsize },
}

impl Default for Execution {
    fn default() -> Self {
        Self::Parallel {
            threads: NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

/// Partial result for a contiguous run of queries
#[derive(Debug, Default)]
struct Partial {
    flags: Vec<bool>,
    matches: usize,
    issues: Vec<QueryError>,
}

impl Partial {
    fn with_capacity(n: usize) -> Self {
        Self {
            flags: Vec::with_capacity(n),
            ..Self::default()
        }
    }

    fn push(&mut self, haystack: &[u8], query: &QueryRecord, metrics: &SearchMetrics) {
        let matched = match &query.pattern {
            Ok(pattern) => {
                // Each query gets its own matcher and table.
                let matched = BoyerMoore::new(pattern.as_slice()).is_match(haystack);
                trace!("Query {}: {}", query.index, matched);
                metrics.record_search(matched);
                matched
            }
            Err(issue) => {
                metrics.record_skip();
                self.issues.push(issue.clone());
                false
            }
        };

        self.flags.push(matched);
        if matched {
            self.matches += 1;
        }
    }

    fn search_all(haystack: &[u8], queries: &[QueryRecord], metrics: &SearchMetrics) -> Self {
        let mut partial = Self::with_capacity(queries.len());
        for query in queries {
            partial.push(haystack, query, metrics);
        }
        partial
    }
}

/// Searches every query against `haystack`.
///
/// Flags come back in query order whatever the execution mode; the total is
/// summed from per-worker partial counts once all workers are done.
pub fn run_batch(
    haystack: &[u8],
    queries: &[QueryRecord],
    execution: Execution,
) -> SearchResult<BatchResult> {
    run_batch_with_metrics(haystack, queries, execution, &SearchMetrics::new())
}

pub fn run_batch_with_metrics(
    haystack: &[u8],
    queries: &[QueryRecord],
    execution: Execution,
    metrics: &SearchMetrics,
) -> SearchResult<BatchResult> {
    debug!(
        "Running {} queries against {} bytes ({:?})",
        queries.len(),
        haystack.len(),
        execution
    );

    let partials = match execution {
        Execution::Sequential => vec![Partial::search_all(haystack, queries, metrics)],
        Execution::Parallel { threads } => {
            let threads = threads.get();
            let chunk_size = (queries.len() / threads).clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE);

            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("wordscout-{}", i))
                .build()
                .map_err(|e| SearchError::thread_pool(e.to_string()))?;

            // `par_chunks` is indexed, so `collect` keeps chunks in query order.
            pool.install(|| {
                queries
                    .par_chunks(chunk_size)
                    .map(|chunk| Partial::search_all(haystack, chunk, metrics))
                    .collect::<Vec<_>>()
            })
        }
    };

    let mut flags = Vec::with_capacity(queries.len());
    let mut total_matches = 0;
    let mut issues = Vec::new();
    for partial in partials {
        flags.extend(partial.flags);
        total_matches += partial.matches;
        issues.extend(partial.issues);
    }

    Ok(BatchResult::new(flags, total_matches, issues))
}

/// Loads both inputs named by `config` and runs the batch.
///
/// Both inputs are loaded before any matching starts; if either cannot be
/// read the run fails and no partial result is produced.
pub fn search(config: &SearchConfig) -> SearchResult<SearchOutput> {
    config.validate()?;
    info!(
        "Searching {} for words from {}",
        config.words_file.display(),
        config.query_file.display()
    );

    let metrics = SearchMetrics::new();
    let limits = config.query_limits();
    let execution = config.execution();

    let load_start = Instant::now();
    let (haystack, queries) = match execution {
        Execution::Parallel { .. } => rayon::join(
            || Haystack::load_with_metrics(&config.words_file, &metrics),
            || load_queries(&config.query_file, &limits),
        ),
        Execution::Sequential => (
            Haystack::load_with_metrics(&config.words_file, &metrics),
            load_queries(&config.query_file, &limits),
        ),
    };
    let haystack = haystack?;
    let queries = queries?;
    let load_time = load_start.elapsed();
    metrics.record_queries_loaded(queries.len() as u64);
    debug!("Inputs loaded in {:?}", load_time);

    let search_start = Instant::now();
    let batch = run_batch_with_metrics(&haystack, &queries, execution, &metrics)?;
    let search_time = search_start.elapsed();

    if !batch.issues().is_empty() {
        warn!("{} queries could not be searched", batch.issues().len());
    }
    metrics.log_stats();
    info!(
        "Search complete. {} of {} queries matched",
        batch.total_matches(),
        batch.query_count()
    );

    Ok(SearchOutput {
        batch,
        load_time,
        search_time,
        haystack_len: haystack.len(),
    })
}
