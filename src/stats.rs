use indicatif::HumanBytes;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::outcome::{DownloadOutcome, FailureKind};

/// Tallies for one range run. Built fresh per run and folded item by item.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    pub successful: u64,
    pub failed: u64,
    pub skipped: u64,
    /// Bytes written by this run (files found on disk are not counted).
    pub bytes_saved: u64,
    pub failures: BTreeMap<FailureKind, u64>,
    pub interrupted: bool,
}

impl RunStatistics {
    pub fn record(mut self, outcome: &DownloadOutcome) -> Self {
        match outcome {
            DownloadOutcome::Saved { bytes, .. } => {
                self.successful += 1;
                self.bytes_saved += bytes;
            }
            DownloadOutcome::AlreadyExists { .. } => self.skipped += 1,
            DownloadOutcome::Failed(err) => {
                self.failed += 1;
                *self.failures.entry(err.kind()).or_default() += 1;
            }
        }
        self
    }

    pub fn processed(&self) -> u64 {
        self.successful + self.failed + self.skipped
    }

    /// One-line form used by the progress bar.
    pub fn status_line(&self) -> String {
        format!(
            "Success: {}, Failed: {}, Skipped: {}, Total: {}",
            self.successful,
            self.failed,
            self.skipped,
            HumanBytes(self.bytes_saved)
        )
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.interrupted {
            writeln!(f, "Download interrupted!")?;
        } else {
            writeln!(f, "Download completed!")?;
        }
        writeln!(f, "Total successful downloads: {}", self.successful)?;
        writeln!(f, "Total failed downloads: {}", self.failed)?;
        for (kind, count) in &self.failures {
            writeln!(f, "  {:<20} {}", kind.label(), count)?;
        }
        writeln!(f, "Total skipped (already existed): {}", self.skipped)?;
        write!(f, "Total collection size: {}", HumanBytes(self.bytes_saved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::FetchError;
    use std::path::PathBuf;

    fn saved(bytes: u64) -> DownloadOutcome {
        DownloadOutcome::Saved {
            path: PathBuf::from("x.txt"),
            bytes,
        }
    }

    #[test]
    fn record_classifies_by_outcome_tag() {
        let stats = [
            saved(1024),
            DownloadOutcome::AlreadyExists {
                path: PathBuf::from("y.txt"),
            },
            DownloadOutcome::Failed(FetchError::CatalogStatus(503)),
            DownloadOutcome::Failed(FetchError::LinkNotFound { formats: vec!["txt".into()] }),
            saved(1024),
        ]
        .iter()
        .fold(RunStatistics::default(), RunStatistics::record);

        assert_eq!(stats.successful, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.failed, 2);
        assert_eq!(stats.bytes_saved, 2048);
        assert_eq!(stats.processed(), 5);
        assert_eq!(stats.failures.get(&FailureKind::CatalogStatus), Some(&1));
        assert_eq!(stats.failures.get(&FailureKind::LinkNotFound), Some(&1));
    }

    #[test]
    fn skipped_files_do_not_add_bytes() {
        let stats = RunStatistics::default().record(&DownloadOutcome::AlreadyExists {
            path: PathBuf::from("1.txt"),
        });
        assert_eq!(stats.bytes_saved, 0);
    }

    #[test]
    fn status_line_uses_human_sizes() {
        let stats = RunStatistics::default().record(&saved(2048));
        assert_eq!(stats.status_line(), "Success: 1, Failed: 0, Skipped: 0, Total: 2.00 KiB");
    }

    #[test]
    fn summary_serializes_failure_kinds_in_snake_case() {
        let stats = RunStatistics::default()
            .record(&DownloadOutcome::Failed(FetchError::CatalogUnreachable("dns".into())));
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["failed"], 1);
        assert_eq!(json["failures"]["catalog_unreachable"], 1);
        assert_eq!(json["interrupted"], false);
    }
}
