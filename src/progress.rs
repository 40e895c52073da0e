use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::stats::RunStatistics;

/// Receives a statistics snapshot after every processed id.
pub trait ProgressObserver {
    fn on_item(&self, id: u64, stats: &RunStatistics);

    fn finish(&self, _stats: &RunStatistics) {}
}

/// Headless runs and tests.
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_item(&self, _id: u64, _stats: &RunStatistics) {}
}

/// Live status bar on stderr.
pub struct StatusBar {
    pb: ProgressBar,
}

impl StatusBar {
    pub fn new(total_ids: u64) -> Self {
        let pb = ProgressBar::with_draw_target(Some(total_ids), ProgressDrawTarget::stderr_with_hz(5));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg} {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}<{eta_precise}]")
                .unwrap()
                .progress_chars("=>-"),
        );
        pb.set_message(RunStatistics::default().status_line());
        Self { pb }
    }
}

impl ProgressObserver for StatusBar {
    fn on_item(&self, _id: u64, stats: &RunStatistics) {
        self.pb.set_message(stats.status_line());
        self.pb.set_position(stats.processed());
    }

    fn finish(&self, stats: &RunStatistics) {
        if stats.interrupted {
            self.pb.abandon_with_message(stats.status_line());
        } else {
            self.pb.finish_with_message(stats.status_line());
        }
    }
}
