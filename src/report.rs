use std::time::Duration;

use tracing::info;

use crate::classify::Categorized;

/// Counters for one harvest, threaded through every stage and returned at the end
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestReport {
    pub total_contributions: usize,
    pub oral_presentations: usize,
    pub posters: usize,
    pub others: usize,
    pub downloaded_files: usize,
    /// Attachments already present on disk
    pub skipped_files: usize,
    pub errors: usize,
    pub elapsed: Duration,
}

impl HarvestReport {
    pub fn record_categories(&mut self, categorized: &Categorized<'_>) {
        self.total_contributions = categorized.total();
        self.oral_presentations = categorized.oral.len();
        self.posters = categorized.posters.len();
        self.others = categorized.others.len();
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    pub fn log_summary(&self) {
        info!(elapsed = ?self.elapsed, "Harvest completed");
        info!(
            total = self.total_contributions,
            oral = self.oral_presentations,
            posters = self.posters,
            others = self.others,
            downloaded = self.downloaded_files,
            skipped = self.skipped_files,
            errors = self.errors,
            "Final statistics"
        );
    }
}
