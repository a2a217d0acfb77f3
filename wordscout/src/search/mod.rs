/// Substring search for batches of query words.
///
/// # Components
///
/// 1. **Bad-character table** ([`bad_char`]): last occurrence of every byte
///    value in a pattern, built fresh for each pattern.
/// 2. **Matcher** ([`matcher`]): Boyer-Moore with the bad-character
///    heuristic, comparing right to left and skipping ahead on mismatch.
/// 3. **Queries** ([`query`]): raw query lines and the word extracted from
///    each.
/// 4. **Batch runner** ([`engine`]): searches every query against one
///    shared haystack, sequentially or on a rayon pool.
///
/// # Sharing
///
/// The haystack is borrowed immutably by every worker. Patterns and tables
/// belong to a single query and never cross threads. Counts are reduced
/// from per-chunk partials after the fan-out, so there is no shared mutable
/// counter:
/// ```rust,ignore
/// let partials: Vec<Partial> = queries
///     .par_chunks(chunk_size)
///     .map(|chunk| Partial::search_all(haystack, chunk, metrics))
///     .collect();
/// ```
pub mod bad_char;
pub mod engine;
pub mod matcher;
pub mod query;

pub use bad_char::BadCharTable;
pub use engine::{run_batch, search, Execution};
pub use matcher::{contains, BoyerMoore};
pub use query::{first_token, EmptyQueryPolicy, QueryLimits, QueryRecord};
