mod catalog;
mod cli;
mod commands;
mod downloader;
mod logging;
mod outcome;
mod progress;
mod stats;
mod utils;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::cli::SummaryFormat;
use crate::commands::FetcherConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Download a range of books from a numbered digital-library catalog", long_about = None)]
struct Args {
    /// Starting book ID
    #[arg(long, default_value_t = 1)]
    start: u64,

    /// Ending book ID (inclusive)
    #[arg(long, default_value_t = 1_000_000)]
    stop: u64,

    /// Output directory
    #[arg(short = 'o', long, default_value = "gutenberg_books")]
    output: PathBuf,

    /// Comma-separated list of formats to download, in preference order (e.g. txt,pdf,epub)
    #[arg(short = 'f', long, default_value = "txt")]
    formats: String,

    /// Pause between catalog requests, in milliseconds
    #[arg(long = "delay-ms", default_value_t = 200)]
    delay_ms: u64,

    /// Catalog site serving /ebooks/<id> pages
    #[arg(long = "catalog-base", default_value = "https://www.gutenberg.org")]
    catalog_base: String,

    /// Log file for per-book outcomes
    #[arg(long = "log-file", default_value = "bookfetch.log")]
    log_file: PathBuf,

    /// Format of the final summary
    #[arg(long, value_enum, default_value = "text")]
    summary: SummaryFormat,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let formats = crate::cli::parse_formats(&args.formats)?;
    let config = FetcherConfig::new(&args.catalog_base, args.output, formats, args.delay_ms)?;
    let _log_guard = crate::logging::init_logging(&args.log_file)?;

    // Per-item failures only show up in the summary and the log; exit code stays 0.
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        crate::commands::run_range(config, args.start, args.stop, args.summary)
            .await
            .map(|_| ())
    })
}
