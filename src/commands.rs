use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use url::Url;

use crate::catalog::{ReqwestSource, USER_AGENT};
use crate::cli::SummaryFormat;
use crate::downloader::RangeFetcher;
use crate::progress::StatusBar;
use crate::stats::RunStatistics;

pub struct FetcherConfig {
    pub catalog_base: Url,
    pub output_dir: PathBuf,
    pub formats: Vec<String>,
    pub delay: Duration,
    pub user_agent: String,
}

impl FetcherConfig {
    pub fn new(catalog_base: &str, output_dir: PathBuf, formats: Vec<String>, delay_ms: u64) -> Result<Self> {
        let catalog_base = Url::parse(catalog_base).context(format!("Invalid catalog base URL: {}", catalog_base))?;
        if catalog_base.cannot_be_a_base() {
            bail!("Catalog base URL cannot hold paths: {}", catalog_base);
        }
        Ok(Self {
            catalog_base,
            output_dir,
            formats,
            delay: Duration::from_millis(delay_ms),
            user_agent: USER_AGENT.to_string(),
        })
    }
}

pub async fn run_range(config: FetcherConfig, start: u64, stop: u64, summary: SummaryFormat) -> Result<RunStatistics> {
    if start > stop {
        bail!("--start ({}) must not be greater than --stop ({})", start, stop);
    }
    if !config.output_dir.exists() {
        fs::create_dir_all(&config.output_dir)
            .await
            .context("Failed to create output directory")?;
    }

    let source = ReqwestSource::new(&config.user_agent).context("Failed to build HTTP client")?;
    let fetcher = RangeFetcher::new(source, config.catalog_base.clone(), config.delay);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, abandoning current item");
            on_interrupt.cancel();
        }
    });

    info!(
        start,
        stop,
        formats = ?config.formats,
        output = %config.output_dir.display(),
        "starting range"
    );
    let status_bar = StatusBar::new((stop - start).saturating_add(1));
    let stats = fetcher
        .fetch_range(start, stop, &config.formats, &config.output_dir, &status_bar, &cancel)
        .await;

    match summary {
        SummaryFormat::Text => println!("\n{}", stats),
        SummaryFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
    }
    Ok(stats)
}
