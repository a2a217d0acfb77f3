use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::ops::Deref;
use std::path::Path;
use tracing::{debug, trace, warn};

use crate::errors::{SearchError, SearchResult};
use crate::metrics::SearchMetrics;
use crate::search::query::{QueryLimits, QueryRecord};

// Constants for file loading
const BUFFER_CAPACITY: usize = 65536;
pub(crate) const LARGE_FILE_THRESHOLD: u64 = 10 * 1024 * 1024; // 10MB

/// The text every query is searched in.
///
/// Read once and never mutated; dereferences to `[u8]` so it can be shared
/// by reference across worker threads.
#[derive(Debug)]
pub enum Haystack {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl Haystack {
    /// Wraps an in-memory buffer
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Owned(bytes.into())
    }

    /// Loads the whole file at `path`, memory mapping large files
    pub fn load(path: &Path) -> SearchResult<Self> {
        Self::load_with_metrics(path, &SearchMetrics::new())
    }

    pub fn load_with_metrics(path: &Path, metrics: &SearchMetrics) -> SearchResult<Self> {
        let file = File::open(path).map_err(|e| SearchError::from_io(path, e))?;

        let size = match file.metadata() {
            Ok(metadata) => Some(metadata.len()),
            Err(e) => {
                warn!("Failed to get metadata for {}: {}", path.display(), e);
                None
            }
        };

        let haystack = match size {
            Some(size) if size >= LARGE_FILE_THRESHOLD => {
                trace!("Memory mapping haystack: {}", path.display());
                // The mapping is read-only and dropped with the haystack.
                let mmap = unsafe { Mmap::map(&file) }.map_err(SearchError::IoError)?;
                Self::Mapped(mmap)
            }
            _ => {
                trace!("Reading haystack into memory: {}", path.display());
                let mut reader = BufReader::with_capacity(BUFFER_CAPACITY, file);
                let mut bytes = Vec::with_capacity(size.unwrap_or(0) as usize);
                reader
                    .read_to_end(&mut bytes)
                    .map_err(|e| SearchError::from_io(path, e))?;
                Self::Owned(bytes)
            }
        };

        metrics.record_haystack(haystack.len() as u64, haystack.is_mapped());
        Ok(haystack)
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }
}

impl Deref for Haystack {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Owned(bytes) => bytes.as_slice(),
            Self::Mapped(mmap) => &mmap[..],
        }
    }
}

impl AsRef<[u8]> for Haystack {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

/// Reads every query line from `reader` in a single pass.
///
/// Lines are split on `\n`; a trailing line without a newline is still a
/// query. A read failure mid-stream records the query at that position as
/// unreadable and ends the stream, since the reader's position is unknown
/// after the error.
pub fn read_queries<R: BufRead>(mut reader: R, limits: &QueryLimits) -> Vec<QueryRecord> {
    let mut records = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        let index = records.len();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {
                if line.last() == Some(&b'\n') {
                    line.pop();
                }
                let record = QueryRecord::parse(index, line.as_slice(), limits);
                if let Some(issue) = record.error() {
                    warn!("{}", issue);
                }
                records.push(record);
            }
            Err(e) => {
                warn!("Query source failed at line {}: {}", index, e);
                records.push(QueryRecord::unreadable(index, e.to_string()));
                break;
            }
        }
    }

    debug!("Read {} query lines", records.len());
    records
}

/// Opens the query file and reads all of its lines
pub fn load_queries(path: &Path, limits: &QueryLimits) -> SearchResult<Vec<QueryRecord>> {
    let file = File::open(path).map_err(|e| SearchError::from_io(path, e))?;
    let reader = BufReader::with_capacity(BUFFER_CAPACITY, file);
    Ok(read_queries(reader, limits))
}
