use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::catalog::page::{find_download_link, resolve_link};
use crate::catalog::{catalog_url, HttpSource};
use crate::outcome::{DownloadOutcome, FetchError};
use crate::progress::ProgressObserver;
use crate::stats::RunStatistics;
use crate::utils::{find_existing, part_path, target_path};

/// Walks an id range one item at a time: skip what is on disk, otherwise
/// catalog page -> matching link -> file.
pub struct RangeFetcher<S> {
    source: S,
    catalog_base: Url,
    delay: Duration,
}

impl<S: HttpSource> RangeFetcher<S> {
    /// `delay` is paused before every catalog request; zero disables it.
    pub fn new(source: S, catalog_base: Url, delay: Duration) -> Self {
        Self {
            source,
            catalog_base,
            delay,
        }
    }

    pub async fn fetch_one(&self, id: u64, formats: &[String], output_dir: &Path) -> DownloadOutcome {
        if let Some(path) = find_existing(output_dir, id, formats) {
            info!(id, path = %path.display(), "already exists, skipping");
            return DownloadOutcome::AlreadyExists { path };
        }

        match self.download(id, formats, output_dir).await {
            Ok((path, bytes)) => {
                info!(id, path = %path.display(), bytes, "downloaded");
                DownloadOutcome::Saved { path, bytes }
            }
            Err(err) => {
                match &err {
                    FetchError::LinkNotFound { .. } => warn!(id, "{}", err),
                    _ => error!(id, "{}", err),
                }
                DownloadOutcome::Failed(err)
            }
        }
    }

    /// Processes every id in `start..=end` in ascending order. An empty range
    /// (`start > end`) yields empty statistics.
    pub async fn fetch_range(
        &self,
        start: u64,
        end: u64,
        formats: &[String],
        output_dir: &Path,
        observer: &dyn ProgressObserver,
        cancel: &CancellationToken,
    ) -> RunStatistics {
        let mut stats = RunStatistics::default();

        for id in start..=end {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    warn!(id, "interrupted before completing id");
                    stats.interrupted = true;
                    break;
                }
                outcome = self.fetch_one(id, formats, output_dir) => outcome,
            };
            debug!(
                id,
                path = ?outcome.path(),
                failure = ?outcome.error().map(FetchError::kind),
                "item finished"
            );
            stats = stats.record(&outcome);
            observer.on_item(id, &stats);
        }

        info!(
            successful = stats.successful,
            failed = stats.failed,
            skipped = stats.skipped,
            bytes = stats.bytes_saved,
            interrupted = stats.interrupted,
            "range finished"
        );
        observer.finish(&stats);
        stats
    }

    async fn download(&self, id: u64, formats: &[String], output_dir: &Path) -> Result<(PathBuf, u64), FetchError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let page_url = catalog_url(&self.catalog_base, id)
            .map_err(|e| FetchError::CatalogUnreachable(e.to_string()))?;
        debug!(id, url = %page_url, "fetching catalog page");
        let page = self
            .source
            .get(&page_url)
            .await
            .map_err(|e| FetchError::CatalogUnreachable(e.0))?;
        if !page.is_success() {
            return Err(FetchError::CatalogStatus(page.status));
        }

        let link = find_download_link(&page.text(), formats).ok_or_else(|| FetchError::LinkNotFound {
            formats: formats.to_vec(),
        })?;
        let file_url = resolve_link(&self.catalog_base, &link.href).map_err(|e| FetchError::FileUnreachable {
            url: link.href.clone(),
            reason: e.to_string(),
        })?;

        debug!(id, url = %file_url, format = %link.format, "fetching file");
        let file = self
            .source
            .get(&file_url)
            .await
            .map_err(|e| FetchError::FileUnreachable {
                url: file_url.to_string(),
                reason: e.0,
            })?;
        if !file.is_success() {
            return Err(FetchError::FileUnreachable {
                url: file_url.to_string(),
                reason: format!("status {}", file.status),
            });
        }

        let path = target_path(output_dir, id, &link.format);
        save(&path, &file.body).await?;
        Ok((path, file.body.len() as u64))
    }
}

/// Writes through a `.part` sibling so an interrupted write never leaves a
/// truncated file under the final name.
async fn save(path: &Path, body: &[u8]) -> Result<(), FetchError> {
    let part = part_path(path);
    let result = async {
        fs::write(&part, body).await?;
        fs::rename(&part, path).await
    }
    .await;

    match result {
        Ok(()) => Ok(()),
        Err(source) => {
            let _ = fs::remove_file(&part).await;
            Err(FetchError::FileWrite {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}
