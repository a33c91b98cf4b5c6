pub mod classify;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod harvest;
pub mod logging;
pub mod materialize;
pub mod models;
pub mod report;
pub mod staging;
pub mod utils;

// Re-export commonly used items
pub use classify::{Categorized, Category};
pub use config::HarvestConfig;
pub use error::{DownloadError, ExportError, FetchError, HarvestError};
pub use harvest::Harvester;
pub use models::{Attachment, Contribution, Event, Person, Schedule};
pub use report::HarvestReport;
pub use utils::{normalize_contribution, normalize_event, sanitize_filename};
