pub mod config;
pub mod errors;
pub mod loader;
pub mod metrics;
pub mod results;
pub mod search;

pub use crate::config::{CliOverrides, SearchConfig};
pub use crate::errors::{QueryError, SearchError, SearchResult};
pub use crate::loader::{load_queries, read_queries, Haystack};
pub use crate::results::{BatchResult, SearchOutput};
pub use crate::search::{contains, run_batch, search, BoyerMoore, Execution};
