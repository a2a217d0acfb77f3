use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::{num::NonZeroUsize, path::PathBuf, process::ExitCode, time::Instant};
use tracing_subscriber::EnvFilter;
use wordscout::{
    config::CliOverrides, search, search::EmptyQueryPolicy, SearchConfig, SearchError,
    SearchOutput,
};

type Result<T> = std::result::Result<T, SearchError>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File holding the reference text
    words_file: PathBuf,

    /// File holding the queries, one per line
    query_file: PathBuf,

    /// Search queries one after another instead of on a worker pool
    #[arg(long)]
    sequential: bool,

    /// Number of worker threads
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Longest query word in bytes
    #[arg(long)]
    max_pattern_len: Option<usize>,

    /// What to do with blank query lines
    #[arg(long, value_enum)]
    empty_queries: Option<EmptyQueries>,

    /// Configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print only the match count
    #[arg(short, long)]
    stats: bool,

    /// Print one result line per query
    #[arg(long, conflicts_with = "json")]
    flags: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum EmptyQueries {
    Match,
    Skip,
}

impl From<EmptyQueries> for EmptyQueryPolicy {
    fn from(value: EmptyQueries) -> Self {
        match value {
            EmptyQueries::Match => EmptyQueryPolicy::Match,
            EmptyQueries::Skip => EmptyQueryPolicy::Skip,
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let start = Instant::now();
    let cli = Cli::parse();

    let config = SearchConfig::load_from(cli.config.as_deref())?.merge_with_cli(CliOverrides {
        words_file: Some(cli.words_file),
        query_file: Some(cli.query_file),
        sequential: cli.sequential,
        thread_count: cli.threads,
        max_pattern_len: cli.max_pattern_len,
        empty_queries: cli.empty_queries.map(Into::into),
        stats_only: cli.stats,
        log_level: cli.log_level,
    });

    if cli.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    init_logging(&config.log_level);
    tracing::debug!("Effective configuration: {:?}", config);

    let output = search(&config)?;
    for issue in output.batch.issues() {
        eprintln!("{} {}", "warning:".yellow(), issue);
    }

    if cli.json {
        println!("{}", output.batch.to_json()?);
    } else {
        print_search_results(&output, config.stats_only, cli.flags, start);
    }
    Ok(())
}

fn init_logging(level: &str) {
    // RUST_LOG takes precedence over the configured level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_search_results(output: &SearchOutput, stats_only: bool, flags: bool, start: Instant) {
    if stats_only {
        println!("{}", output.batch.total_matches());
        return;
    }

    if flags {
        for (i, matched) in output.batch.flags().iter().enumerate() {
            let verdict = if *matched {
                "found".green()
            } else {
                "not found".red()
            };
            println!("{}: {}", i.to_string().blue(), verdict);
        }
        println!();
    }

    println!(
        "Time to read input files: {}",
        humantime::format_duration(output.load_time)
    );
    println!(
        "Time to search queries: {}",
        humantime::format_duration(output.search_time)
    );
    println!(
        "Total matches found: {}",
        output.batch.total_matches().to_string().green()
    );
    println!(
        "Total execution time: {}",
        humantime::format_duration(start.elapsed())
    );
}
