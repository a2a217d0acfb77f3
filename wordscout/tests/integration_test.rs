use anyhow::Result;
use std::fs::File;
use std::io::Write;
use std::num::NonZeroUsize;
use tempfile::tempdir;
use wordscout::search::{EmptyQueryPolicy, QueryLimits, QueryRecord};
use wordscout::{run_batch, search, Execution, Haystack, SearchConfig, SearchError};

fn create_inputs(
    dir: &tempfile::TempDir,
    words: &str,
    queries: &str,
) -> Result<(std::path::PathBuf, std::path::PathBuf)> {
    let words_path = dir.path().join("words.txt");
    let query_path = dir.path().join("queries.txt");
    File::create(&words_path)?.write_all(words.as_bytes())?;
    File::create(&query_path)?.write_all(queries.as_bytes())?;
    Ok((words_path, query_path))
}

fn config_for(words: &std::path::Path, queries: &std::path::Path, threads: usize) -> SearchConfig {
    SearchConfig {
        thread_count: NonZeroUsize::new(threads).unwrap(),
        ..SearchConfig::new(words, queries)
    }
}

#[test]
fn test_end_to_end_sequential_and_parallel() -> Result<()> {
    let dir = tempdir()?;
    let (words, queries) = create_inputs(
        &dir,
        "the quick brown fox jumps over the lazy dog\n",
        "fox 12\ncat\nthe\njump\n",
    )?;

    let mut config = config_for(&words, &queries, 4);
    let parallel = search(&config)?;
    assert_eq!(parallel.batch.flags(), &[true, false, true, true]);
    assert_eq!(parallel.batch.total_matches(), 3);
    assert_eq!(parallel.haystack_len, 44);

    config.parallel = false;
    let sequential = search(&config)?;
    assert_eq!(sequential.batch, parallel.batch);
    Ok(())
}

#[test]
fn test_words_span_lines_of_haystack() -> Result<()> {
    let dir = tempdir()?;
    let (words, queries) = create_inputs(&dir, "apple\nbanana\ncherry", "e\nb\nana\nrry\nzebra")?;

    let output = search(&config_for(&words, &queries, 2))?;
    assert_eq!(output.batch.flags(), &[true, true, true, true, false]);
    assert_eq!(output.batch.total_matches(), 4);
    Ok(())
}

#[test]
fn test_blank_query_lines_follow_policy() -> Result<()> {
    let dir = tempdir()?;
    let (words, queries) = create_inputs(&dir, "abc", "a\n\n   \nz\n")?;

    let mut config = config_for(&words, &queries, 2);
    let matched = search(&config)?;
    assert_eq!(matched.batch.flags(), &[true, true, true, false]);
    assert!(matched.batch.issues().is_empty());

    config.empty_queries = EmptyQueryPolicy::Skip;
    let skipped = search(&config)?;
    assert_eq!(skipped.batch.flags(), &[true, false, false, false]);
    assert_eq!(skipped.batch.total_matches(), 1);
    assert_eq!(skipped.batch.issues().len(), 2);
    Ok(())
}

#[test]
fn test_overlong_word_is_recoverable() -> Result<()> {
    let dir = tempdir()?;
    let (words, queries) = create_inputs(&dir, "aaaaaaaaaa", "aaaa\naaaaaaaa\naa\n")?;

    let config = SearchConfig {
        max_pattern_len: 5,
        ..config_for(&words, &queries, 2)
    };
    let output = search(&config)?;
    assert_eq!(output.batch.flags(), &[true, false, true]);
    assert_eq!(output.batch.issues()[0].index(), 1);
    Ok(())
}

#[test]
fn test_missing_inputs_abort() -> Result<()> {
    let dir = tempdir()?;
    let (words, queries) = create_inputs(&dir, "text", "t\n")?;
    let missing = dir.path().join("missing.txt");

    let err = search(&config_for(&missing, &queries, 2)).unwrap_err();
    assert!(matches!(err, SearchError::FileNotFound(ref p) if p == &missing));
    assert!(err.is_input_unavailable());

    let err = search(&config_for(&words, &missing, 2)).unwrap_err();
    assert!(matches!(err, SearchError::FileNotFound(_)));
    Ok(())
}

#[test]
fn test_unset_inputs_rejected() {
    let err = search(&SearchConfig::default()).unwrap_err();
    assert!(matches!(err, SearchError::ConfigError(_)));
}

#[test]
fn test_binary_haystack_and_patterns() -> Result<()> {
    let haystack = Haystack::from_bytes(vec![0xFF, 0x00, 0x80, 0xFF, 0xFE, b'\n']);
    assert!(!haystack.is_mapped());
    let lines: Vec<Vec<u8>> = vec![vec![0xFF, 0xFE], vec![0xFE, 0xFF], vec![0x80], vec![0xFF]];
    let queries = QueryRecord::parse_all(lines, &QueryLimits::default());

    let result = run_batch(&haystack, &queries, Execution::Sequential)?;
    assert_eq!(result.flags(), &[true, false, true, true]);
    Ok(())
}

#[test]
fn test_repeated_runs_are_identical() -> Result<()> {
    let dir = tempdir()?;
    let words: String = (0..3000).map(|i| format!("w{:05}\n", i * 7)).collect();
    let queries: String = (0..1500).map(|i| format!("w{:05} x\n", i * 5)).collect();
    let (words, queries) = create_inputs(&dir, &words, &queries)?;

    let config = config_for(&words, &queries, 8);
    let first = search(&config)?;
    for _ in 0..3 {
        assert_eq!(search(&config)?.batch, first.batch);
    }
    // Multiples of 35 below 7500 are the only common values
    assert_eq!(first.batch.total_matches(), (0..1500).filter(|i| (i * 5) % 7 == 0).count());
    Ok(())
}
