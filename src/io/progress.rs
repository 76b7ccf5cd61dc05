//! Terminal progress for batch searches: a partition bar and a running-statistics line

use crate::analysis::statistics::SearchStats;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PARTITION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] {{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} ({{eta}})"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static STATS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Coordinates the progress display of one batch run
pub struct ProgressManager {
    multi_progress: MultiProgress,
    partition_bar: Option<ProgressBar>,
    stats_line: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager with nothing displayed yet
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            partition_bar: None,
            stats_line: None,
        }
    }

    /// Show a bar over `partitions` work partitions labelled `label`
    pub fn initialize(&mut self, label: &str, partitions: u64) {
        let bar = ProgressBar::new(partitions);
        bar.set_style(PARTITION_STYLE.clone());
        bar.set_prefix(label.to_string());
        self.partition_bar = Some(self.multi_progress.add(bar));

        let line = ProgressBar::new_spinner();
        line.set_style(STATS_STYLE.clone());
        self.stats_line = Some(self.multi_progress.add(line));
    }

    /// Reflect the latest statistics
    pub fn update(&self, stats: &SearchStats) {
        if let Some(ref bar) = self.partition_bar {
            bar.set_length(stats.partitions_total);
            bar.set_position(stats.partitions_done);
        }
        if let Some(ref line) = self.stats_line {
            line.set_message(stats.to_string());
            line.tick();
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref bar) = self.partition_bar {
            bar.finish_and_clear();
        }
        if let Some(ref line) = self.stats_line {
            line.finish_and_clear();
        }
        let _ = self.multi_progress.clear();
    }
}
