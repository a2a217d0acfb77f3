use serde::{Deserialize, Serialize};

use crate::errors::QueryError;

/// Default upper bound on a query word, in bytes
pub const DEFAULT_MAX_PATTERN_LEN: usize = 1000;

/// What to do with a query line that has no word on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyQueryPolicy {
    /// Search for the empty pattern, which is found in every haystack
    #[default]
    Match,
    /// Mark the query as not matched and report it as an issue
    Skip,
}

/// Limits applied while turning raw lines into search patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    pub max_pattern_len: usize,
    pub empty_queries: EmptyQueryPolicy,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_pattern_len: DEFAULT_MAX_PATTERN_LEN,
            empty_queries: EmptyQueryPolicy::default(),
        }
    }
}

/// One query: its position, the raw line, and the pattern extracted from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord {
    pub index: usize,
    pub line: Vec<u8>,
    pub pattern: Result<Vec<u8>, QueryError>,
}

impl QueryRecord {
    /// Parses a raw line into a query record
    pub fn parse(index: usize, line: impl Into<Vec<u8>>, limits: &QueryLimits) -> Self {
        let line = line.into();
        let token = first_token(&line);

        let pattern = if token.is_empty() && limits.empty_queries == EmptyQueryPolicy::Skip {
            Err(QueryError::EmptyPattern { index })
        } else if token.len() > limits.max_pattern_len {
            Err(QueryError::PatternTooLong {
                index,
                len: token.len(),
                max: limits.max_pattern_len,
            })
        } else {
            Ok(token.to_vec())
        };

        Self {
            index,
            line,
            pattern,
        }
    }

    /// A query whose line the source could not deliver
    pub fn unreadable(index: usize, reason: impl Into<String>) -> Self {
        Self {
            index,
            line: Vec::new(),
            pattern: Err(QueryError::Unreadable {
                index,
                reason: reason.into(),
            }),
        }
    }

    /// Parses an ordered list of in-memory lines
    pub fn parse_all<I, L>(lines: I, limits: &QueryLimits) -> Vec<Self>
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| Self::parse(index, line, limits))
            .collect()
    }

    /// The pattern to search for, if the query is searchable
    pub fn pattern(&self) -> Option<&[u8]> {
        self.pattern.as_deref().ok()
    }

    pub fn error(&self) -> Option<&QueryError> {
        self.pattern.as_ref().err()
    }
}

/// Returns the first whitespace-delimited token of `line`, or an empty slice
pub fn first_token(line: &[u8]) -> &[u8] {
    let start = match line.iter().position(|b| !is_delimiter(*b)) {
        Some(start) => start,
        None => return &[],
    };
    let rest = &line[start..];
    let end = rest.iter().position(|b| is_delimiter(*b)).unwrap_or(rest.len());
    &rest[..end]
}

#[inline]
fn is_delimiter(byte: u8) -> bool {
    // ASCII whitespace plus vertical tab, which `u8::is_ascii_whitespace` leaves out.
    byte.is_ascii_whitespace() || byte == 0x0B
}
