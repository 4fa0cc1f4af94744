// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Threadsift CLI - batch scraper for Reddit's public JSON API.
//!
//! # Examples
//!
//! ```bash
//! # Scrape two subreddits, newest first
//! threadsift -s rust -s programming
//!
//! # Top posts of the week, with comments
//! threadsift -s rust --sort top --time-filter week --comments
//!
//! # Site-wide search
//! threadsift -q "borrow checker" --limit 50
//!
//! # Run from a JSON input file, write NDJSON to a file
//! threadsift --input run.json --output posts.jsonl
//!
//! # Also export a flat CSV with comment rows
//! threadsift -s rust --comments --csv posts.csv --csv-comments
//! ```

mod output;
mod run;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use threadsift_core::config::DELAY_BETWEEN_SUBREDDITS_SECS;
use threadsift_core::{RunConfig, Sort, TimeFilter, export};
use threadsift_fetch::RedditService;

use output::JsonlSink;
use output::csv::write_csv;

// ============================================================================
// CLI Definition
// ============================================================================

/// Threadsift - batch Reddit scraper.
#[derive(Parser)]
#[command(name = "threadsift")]
#[command(about = "Scrape posts and comments from Reddit's public JSON API")]
#[command(version)]
pub struct Cli {
    /// Path to a JSON input file with the run configuration.
    /// Flags below override its values.
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Subreddit to scrape (repeatable, `r/` prefix optional).
    #[arg(long = "subreddit", short = 's')]
    pub subreddits: Vec<String>,

    /// Site-wide search query.
    #[arg(long = "query", short = 'q')]
    pub search_query: Option<String>,

    /// Sort order: new, hot, top, rising.
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<Sort>,

    /// Time window for the top sort: hour, day, week, month, year, all.
    #[arg(long, value_parser = parse_time_filter)]
    pub time_filter: Option<TimeFilter>,

    /// Maximum posts per subreddit/search (1-100).
    #[arg(long)]
    pub limit: Option<i64>,

    /// Fetch and attach comments to each post.
    #[arg(long)]
    pub comments: bool,

    /// Maximum comments fetched per post.
    #[arg(long)]
    pub max_comments: Option<i64>,

    /// NDJSON output file (stdout when omitted).
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Write flattened rows as CSV to this path.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Use the post+comment expanded CSV layout.
    #[arg(long)]
    pub csv_comments: bool,

    /// Verbose output (show debug info).
    #[arg(long, short)]
    pub verbose: bool,

    /// Quiet mode (no logging).
    #[arg(long)]
    pub quiet: bool,
}

fn parse_sort(s: &str) -> Result<Sort, threadsift_core::CoreError> {
    s.parse()
}

fn parse_time_filter(s: &str) -> Result<TimeFilter, threadsift_core::CoreError> {
    s.parse()
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Invalid configuration; nothing was fetched.
    ConfigError = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("threadsift=debug,info")
    } else {
        EnvFilter::new("threadsift=info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Configuration
// ============================================================================

/// Builds the run configuration: input file first, flags override.
fn build_config(cli: &Cli) -> Result<RunConfig> {
    let mut config = match &cli.input {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file {}", path.display()))?;
            RunConfig::from_json(&json)
                .with_context(|| format!("Invalid input file {}", path.display()))?
        }
        None => RunConfig::default(),
    };

    if !cli.subreddits.is_empty() {
        config.subreddits.clone_from(&cli.subreddits);
    }
    if let Some(query) = &cli.search_query {
        config.search_query.clone_from(query);
    }
    if let Some(sort) = cli.sort {
        config.sort_by = sort;
    }
    if let Some(time_filter) = cli.time_filter {
        config.time_filter = time_filter;
    }
    if let Some(limit) = cli.limit {
        config.limit = limit;
    }
    if cli.comments {
        config.include_comments = true;
    }
    if let Some(max_comments) = cli.max_comments {
        config.max_comments_per_post = max_comments;
    }

    Ok(config)
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Configuration problems abort before any network activity.
    let config = match build_config(&cli).and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Input validation failed");
            eprintln!("Error: {e}");
            std::process::exit(ExitCode::ConfigError as i32);
        }
    };

    if let Err(e) = execute(&cli, &config).await {
        error!(error = %e, "Fatal error in scraper run");
        eprintln!("Error: {e}");
        std::process::exit(ExitCode::Error as i32);
    }
}

async fn execute(cli: &Cli, config: &RunConfig) -> Result<()> {
    let service = RedditService::new()?;

    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout()),
    };
    let mut sink = JsonlSink::new(writer);

    let delay = Duration::from_secs_f64(DELAY_BETWEEN_SUBREDDITS_SECS);
    let posts = run::run(config, &service, &mut sink, delay).await?;

    if let Some(path) = &cli.csv {
        let mut file = BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create CSV file {}", path.display()))?,
        );
        if cli.csv_comments {
            let rows = export::post_comment_rows(&posts);
            write_csv(&mut file, &export::POST_COMMENT_COLUMNS, &rows)?;
        } else {
            let rows = export::post_rows(&posts);
            write_csv(&mut file, &export::POST_COLUMNS, &rows)?;
        }
        file.flush()?;
    }

    Ok(())
}
