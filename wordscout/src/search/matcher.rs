use super::bad_char::BadCharTable;

/// Boyer-Moore matcher using the bad-character heuristic.
///
/// The matcher owns both the pattern and the table built from it, so a
/// table can never be paired with a pattern other than its own. Build one
/// matcher per query; matchers are `Send + Sync` and can be searched from
/// several threads at once.
#[derive(Debug, Clone)]
pub struct BoyerMoore {
    pattern: Vec<u8>,
    table: BadCharTable,
}

impl BoyerMoore {
    /// Creates a matcher for `pattern`, building its bad-character table
    pub fn new(pattern: impl Into<Vec<u8>>) -> Self {
        let pattern = pattern.into();
        let table = BadCharTable::build(&pattern);
        Self { pattern, table }
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    pub fn table(&self) -> &BadCharTable {
        &self.table
    }

    /// Returns the first shift at which the pattern occurs in `haystack`.
    ///
    /// An empty pattern is found at shift 0 of any haystack, including an
    /// empty one.
    pub fn find(&self, haystack: &[u8]) -> Option<usize> {
        let m = self.pattern.len();
        let n = haystack.len();

        if m == 0 {
            return Some(0);
        }
        if m > n {
            return None;
        }

        let mut shift = 0usize;
        while shift + m <= n {
            // Compare right to left; `j` counts the still-unmatched prefix.
            let mut j = m;
            while j > 0 && self.pattern[j - 1] == haystack[shift + j - 1] {
                j -= 1;
            }
            if j == 0 {
                return Some(shift);
            }

            let mismatch = j - 1;
            shift += self.skip(mismatch, haystack[shift + mismatch]);
        }

        None
    }

    /// Whether the pattern occurs anywhere in `haystack`
    #[inline]
    pub fn is_match(&self, haystack: &[u8]) -> bool {
        self.find(haystack).is_some()
    }

    /// Shift after a mismatch at pattern index `mismatch` against haystack byte `bad`.
    /// Always at least 1.
    #[inline]
    fn skip(&self, mismatch: usize, bad: u8) -> usize {
        match self.table.last_occurrence(bad) {
            Some(last) if last < mismatch => mismatch - last,
            Some(_) => 1,
            None => mismatch + 1,
        }
    }
}

/// Reports whether `pattern` occurs as a contiguous substring of `haystack`.
///
/// Builds a fresh table for the pattern on every call.
pub fn contains(haystack: &[u8], pattern: &[u8]) -> bool {
    BoyerMoore::new(pattern).is_match(haystack)
}
