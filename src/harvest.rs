//! End-to-end harvest: fetch, normalize, classify, download, export.

use std::path::Path;
use std::time::Instant;

use chrono::Local;
use reqwest::blocking::Client;
use tracing::info;

use crate::classify::Categorized;
use crate::config::HarvestConfig;
use crate::error::HarvestError;
use crate::export::{export_all, ExportContext};
use crate::fetch::{fetch_event, http_client};
use crate::materialize::Materializer;
use crate::report::HarvestReport;
use crate::utils::normalize_event;

/// Subdirectories created under the output root before anything is written.
/// `Sessions` is reserved and stays empty.
pub const OUTPUT_SUBDIRS: [&str; 5] = ["Attachments", "Oral_Presentations", "Posters", "Sessions", "By_Date"];

/// Create the output root and its fixed subdirectories.
pub fn create_directories(output_dir: &Path) -> Result<(), HarvestError> {
    for sub in OUTPUT_SUBDIRS {
        let path = output_dir.join(sub);
        std::fs::create_dir_all(&path).map_err(|source| HarvestError::Layout { path, source })?;
    }
    Ok(())
}

pub struct Harvester {
    config: HarvestConfig,
    client: Client,
}

impl Harvester {
    pub fn new(config: HarvestConfig) -> Result<Self, HarvestError> {
        let client = http_client().map_err(HarvestError::Client)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Run every stage once.
    ///
    /// Only the layout setup and the event fetch can fail the run; download
    /// and export failures are counted in the returned report.
    pub fn run(&self) -> Result<HarvestReport, HarvestError> {
        let started = Instant::now();
        let config = &self.config;
        info!(event_id = %config.event_id, "Starting conference data harvest");
        info!(url = %config.event_url(), "Event URL");

        create_directories(&config.output_dir)?;

        let raw = fetch_event(&self.client, &config.api_url(), config.api_timeout)?;
        let event = normalize_event(&raw);
        info!(
            title = event.display_title(),
            contributions = event.contributions.len(),
            "Normalized event"
        );

        let categorized = Categorized::partition(&event.contributions);
        let mut report = HarvestReport::default();
        report.record_categories(&categorized);
        info!(
            total = report.total_contributions,
            oral = report.oral_presentations,
            posters = report.posters,
            others = report.others,
            "Classified contributions"
        );

        Materializer::new(
            &self.client,
            &config.output_dir,
            config.download_timeout,
            config.download_delay,
        )
        .materialize_all(&categorized, &mut report);

        let ctx = ExportContext {
            event: &event,
            categorized: &categorized,
            output_dir: &config.output_dir,
            prefix: &config.export_prefix,
            scrape_time: Local::now(),
        };
        export_all(&ctx, &mut report);

        report.elapsed = started.elapsed();
        report.log_summary();
        info!(output_dir = %config.output_dir.display(), "Output directory");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_directories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("out");
        create_directories(&root).unwrap();
        for sub in OUTPUT_SUBDIRS {
            assert!(root.join(sub).is_dir(), "{} missing", sub);
        }
        // idempotent
        create_directories(&root).unwrap();
    }

    #[test]
    fn test_create_directories_blocked_by_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("out");
        std::fs::write(&root, "not a directory").unwrap();
        let err = create_directories(&root).unwrap_err();
        assert!(matches!(err, HarvestError::Layout { .. }));
    }
}
