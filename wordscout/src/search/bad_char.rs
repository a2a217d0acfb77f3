/// Number of distinct byte values
pub const ALPHABET_SIZE: usize = 256;

/// Bad-character table for a single pattern.
///
/// Maps every byte value to the index of its last occurrence in the pattern,
/// or `None` when the byte does not occur. Using `Option` instead of a `-1`
/// sentinel keeps "absent" and "present at index 0" distinct.
#[derive(Clone, PartialEq, Eq)]
pub struct BadCharTable {
    last: [Option<usize>; ALPHABET_SIZE],
}

impl BadCharTable {
    /// Builds the table for `pattern`. Later occurrences overwrite earlier ones.
    pub fn build(pattern: &[u8]) -> Self {
        let mut last = [None; ALPHABET_SIZE];
        for (i, &byte) in pattern.iter().enumerate() {
            last[byte as usize] = Some(i);
        }
        Self { last }
    }

    /// Index of the last occurrence of `byte` in the pattern
    #[inline]
    pub fn last_occurrence(&self, byte: u8) -> Option<usize> {
        self.last[byte as usize]
    }

    /// Number of distinct bytes present in the pattern
    pub fn distinct_bytes(&self) -> usize {
        self.last.iter().filter(|entry| entry.is_some()).count()
    }
}

impl std::fmt::Debug for BadCharTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only the present bytes; 256 `None`s are noise.
        f.debug_map()
            .entries(
                self.last
                    .iter()
                    .enumerate()
                    .filter_map(|(byte, idx)| idx.map(|i| (byte as u8, i))),
            )
            .finish()
    }
}
