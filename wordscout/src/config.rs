use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::errors::{SearchError, SearchResult};
use crate::search::engine::Execution;
use crate::search::query::{EmptyQueryPolicy, QueryLimits, DEFAULT_MAX_PATTERN_LEN};

/// Configuration for a search run.
///
/// # Configuration Locations
///
/// Values are layered from these sources, later ones winning:
/// 1. Global `$CONFIG_DIR/wordscout/config.yaml`
/// 2. Local `.wordscout.yaml` in the current directory
/// 3. A file passed with `--config`
/// 4. Command-line arguments (see [`SearchConfig::merge_with_cli`])
///
/// # Configuration Format
///
/// ```yaml
/// # Reference text every query is looked up in
/// words_file: "words.txt"
///
/// # One query per line; the first word of each line is searched
/// query_file: "queries.txt"
///
/// # Fan queries out over a worker pool
/// parallel: true
///
/// # Worker count (default: CPU cores)
/// thread_count: 4
///
/// # Longest query word accepted, in bytes
/// max_pattern_len: 1000
///
/// # Blank query lines: "match" (found everywhere) or "skip"
/// empty_queries: match
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// File holding the reference text
    #[serde(default)]
    pub words_file: PathBuf,

    /// File holding the queries, one per line
    #[serde(default)]
    pub query_file: PathBuf,

    /// Whether to search queries concurrently
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Number of worker threads for parallel runs
    /// Defaults to number of CPU cores if not specified
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Longest query word, in bytes; longer words are reported and not searched
    #[serde(default = "default_max_pattern_len")]
    pub max_pattern_len: usize,

    /// Handling of query lines without a word
    #[serde(default)]
    pub empty_queries: EmptyQueryPolicy,

    /// Only report the match count
    #[serde(default)]
    pub stats_only: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_parallel() -> bool {
    true
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn default_max_pattern_len() -> usize {
    DEFAULT_MAX_PATTERN_LEN
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            words_file: PathBuf::new(),
            query_file: PathBuf::new(),
            parallel: default_parallel(),
            thread_count: default_thread_count(),
            max_pattern_len: default_max_pattern_len(),
            empty_queries: EmptyQueryPolicy::default(),
            stats_only: false,
            log_level: default_log_level(),
        }
    }
}

/// Values given on the command line; `None`/`false` leaves the file value alone
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub words_file: Option<PathBuf>,
    pub query_file: Option<PathBuf>,
    pub sequential: bool,
    pub thread_count: Option<NonZeroUsize>,
    pub max_pattern_len: Option<usize>,
    pub empty_queries: Option<EmptyQueryPolicy>,
    pub stats_only: bool,
    pub log_level: Option<String>,
}

impl SearchConfig {
    /// Default configuration for the two input files
    pub fn new(words_file: impl Into<PathBuf>, query_file: impl Into<PathBuf>) -> Self {
        Self {
            words_file: words_file.into(),
            query_file: query_file.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from the default locations
    pub fn load() -> SearchResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration from the default locations plus an explicit file.
    /// The explicit file must exist.
    pub fn load_from(config_path: Option<&Path>) -> SearchResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let defaults = [
            dirs::config_dir().map(|p| p.join("wordscout/config.yaml")),
            Some(PathBuf::from(".wordscout.yaml")),
        ];
        for path in defaults.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if let Some(words_file) = cli.words_file {
            self.words_file = words_file;
        }
        if let Some(query_file) = cli.query_file {
            self.query_file = query_file;
        }
        if cli.sequential {
            self.parallel = false;
        }
        if let Some(thread_count) = cli.thread_count {
            self.thread_count = thread_count;
        }
        if let Some(max_pattern_len) = cli.max_pattern_len {
            self.max_pattern_len = max_pattern_len;
        }
        if let Some(empty_queries) = cli.empty_queries {
            self.empty_queries = empty_queries;
        }
        if cli.stats_only {
            self.stats_only = true;
        }
        if let Some(log_level) = cli.log_level {
            self.log_level = log_level;
        }
        self
    }

    /// Rejects configurations that cannot drive a run
    pub fn validate(&self) -> SearchResult<()> {
        if self.words_file.as_os_str().is_empty() {
            return Err(SearchError::config_error("words_file is not set"));
        }
        if self.query_file.as_os_str().is_empty() {
            return Err(SearchError::config_error("query_file is not set"));
        }
        if self.max_pattern_len == 0 {
            return Err(SearchError::config_error(
                "max_pattern_len must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn query_limits(&self) -> QueryLimits {
        QueryLimits {
            max_pattern_len: self.max_pattern_len,
            empty_queries: self.empty_queries,
        }
    }

    pub fn execution(&self) -> Execution {
        if self.parallel {
            Execution::Parallel {
                threads: self.thread_count,
            }
        } else {
            Execution::Sequential
        }
    }

    /// Renders the effective configuration as YAML
    pub fn to_yaml(&self) -> SearchResult<String> {
        serde_yaml::to_string(self).map_err(|e| SearchError::config_error(e.to_string()))
    }
}
