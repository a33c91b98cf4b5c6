use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

pub const DEFAULT_EVENT_ID: &str = "939";
pub const DEFAULT_BASE_URL: &str = "https://indico.jlab.org";
pub const DEFAULT_OUTPUT_DIR: &str = "LLRF2025_Data";
pub const DEFAULT_LOG_FILE: &str = "llrf2025_harvest.log";
pub const DEFAULT_EXPORT_PREFIX: &str = "LLRF2025";

/// Runtime settings for one harvest.
///
/// `Default` carries the compiled-in values; override fields with struct
/// update syntax when driving the harvester programmatically.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub event_id: String,
    pub base_url: String,
    pub output_dir: PathBuf,
    pub log_file: PathBuf,
    /// File name prefix for the top-level exports
    pub export_prefix: String,
    pub api_timeout: Duration,
    pub download_timeout: Duration,
    /// Pause after every attachment
    pub download_delay: Duration,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            event_id: DEFAULT_EVENT_ID.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
            api_timeout: Duration::from_secs(30),
            download_timeout: Duration::from_secs(60),
            download_delay: Duration::from_millis(500),
        }
    }
}

impl HarvestConfig {
    /// Export endpoint returning the event with its contributions.
    pub fn api_url(&self) -> String {
        format!(
            "{}/export/event/{}.json?detail=contributions",
            self.base_url.trim_end_matches('/'),
            self.event_id
        )
    }

    /// Public event page.
    pub fn event_url(&self) -> String {
        format!("{}/event/{}/", self.base_url.trim_end_matches('/'), self.event_id)
    }

    pub fn trace_loaded(&self) {
        info!(
            event_id = %self.event_id,
            base_url = %self.base_url,
            output_dir = %self.output_dir.display(),
            "Loaded harvest config"
        );
        debug!(?self, "Harvest config (full debug)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url() {
        let config = HarvestConfig::default();
        assert_eq!(
            config.api_url(),
            "https://indico.jlab.org/export/event/939.json?detail=contributions"
        );
        assert_eq!(config.event_url(), "https://indico.jlab.org/event/939/");
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let config = HarvestConfig {
            base_url: "http://127.0.0.1:8080/".into(),
            event_id: "12".into(),
            ..Default::default()
        };
        assert_eq!(
            config.api_url(),
            "http://127.0.0.1:8080/export/event/12.json?detail=contributions"
        );
    }
}
