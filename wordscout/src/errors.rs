/// Error types for wordscout.
///
/// There are two tiers of failure and they are kept in separate types:
///
/// 1. **Fatal errors** ([`SearchError`]): an input file cannot be opened or
///    read, the configuration is invalid, or the worker pool cannot be
///    built. These abort the run before any matching work starts and no
///    match count is produced.
///
/// 2. **Recoverable query errors** ([`QueryError`]): a single query line is
///    unreadable, empty or too long. The affected query is marked as not
///    matched and the batch carries on; the error is reported alongside the
///    result at that query's position.
///
/// ```rust,ignore
/// match wordscout::search(&config) {
///     Ok(output) => {
///         for issue in output.batch.issues() {
///             eprintln!("warning: {}", issue);
///         }
///         println!("{}", output.batch.total_matches());
///     }
///     Err(SearchError::FileNotFound(path)) => // input unavailable,
///     Err(e) => // any other fatal condition
/// }
/// ```
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Fatal errors that abort a whole batch
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SearchError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn thread_pool(msg: impl Into<String>) -> Self {
        Self::ThreadPool(msg.into())
    }

    /// Maps an I/O error raised while opening or reading `path`
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::file_not_found(path),
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(path),
            _ => Self::IoError(err),
        }
    }

    /// True when the error means an input could not be obtained at all
    pub fn is_input_unavailable(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound(_) | Self::PermissionDenied(_) | Self::IoError(_)
        )
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

/// Per-query errors; the query counts as not matched
#[derive(Error, Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryError {
    #[error("Query {index}: line could not be read: {reason}")]
    Unreadable { index: usize, reason: String },
    #[error("Query {index}: no search word on line")]
    EmptyPattern { index: usize },
    #[error("Query {index}: word is {len} bytes, limit is {max}")]
    PatternTooLong { index: usize, len: usize, max: usize },
}

impl QueryError {
    /// Position of the offending query in the input sequence
    pub fn index(&self) -> usize {
        match self {
            Self::Unreadable { index, .. }
            | Self::EmptyPattern { index }
            | Self::PatternTooLong { index, .. } => *index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_creation() {
        let path = Path::new("words.txt");
        let err = SearchError::file_not_found(path);
        assert!(matches!(err, SearchError::FileNotFound(_)));

        let err = SearchError::permission_denied(path);
        assert!(matches!(err, SearchError::PermissionDenied(_)));

        let err = SearchError::config_error("bad value");
        assert!(matches!(err, SearchError::ConfigError(_)));

        let err = SearchError::thread_pool("no threads");
        assert!(matches!(err, SearchError::ThreadPool(_)));
    }

    #[test]
    fn test_from_io_maps_kinds() {
        let path = Path::new("queries.txt");

        let err = SearchError::from_io(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, SearchError::FileNotFound(ref p) if p == path));

        let err = SearchError::from_io(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, SearchError::PermissionDenied(_)));

        let err = SearchError::from_io(path, io::Error::from(io::ErrorKind::UnexpectedEof));
        assert!(matches!(err, SearchError::IoError(_)));
        assert!(err.is_input_unavailable());
        assert!(!SearchError::config_error("x").is_input_unavailable());
    }

    #[test]
    fn test_error_messages() {
        let err = SearchError::file_not_found("words.txt");
        assert_eq!(err.to_string(), "File not found: words.txt");

        let err = SearchError::config_error("max_pattern_len must be at least 1");
        assert_eq!(
            err.to_string(),
            "Configuration error: max_pattern_len must be at least 1"
        );

        let err = QueryError::PatternTooLong {
            index: 3,
            len: 12,
            max: 8,
        };
        assert_eq!(err.to_string(), "Query 3: word is 12 bytes, limit is 8");
        assert_eq!(err.index(), 3);

        let err = QueryError::EmptyPattern { index: 0 };
        assert_eq!(err.to_string(), "Query 0: no search word on line");
    }
}
