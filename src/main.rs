use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use indico_harvest::logging::init_logging;
use indico_harvest::{HarvestConfig, Harvester};

#[derive(Parser, Debug)]
#[command(name = "indico-harvest")]
#[command(about = "Harvest contributions, attachments and reports from an Indico event")]
struct Args {
    /// Indico event id
    #[arg(long, env = "HARVEST_EVENT_ID")]
    event_id: Option<String>,

    /// Indico instance base URL
    #[arg(long, env = "HARVEST_BASE_URL")]
    base_url: Option<String>,

    /// Output root directory
    #[arg(long, env = "HARVEST_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Append-only log file
    #[arg(long, env = "HARVEST_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Pause after each attachment, in milliseconds
    #[arg(long, env = "HARVEST_DELAY_MS")]
    delay_ms: Option<u64>,

    /// File name prefix for the top-level exports
    #[arg(long, env = "HARVEST_PREFIX")]
    prefix: Option<String>,
}

impl Args {
    fn into_config(self) -> HarvestConfig {
        let defaults = HarvestConfig::default();
        HarvestConfig {
            event_id: self.event_id.unwrap_or(defaults.event_id),
            base_url: self.base_url.unwrap_or(defaults.base_url),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            log_file: self.log_file.unwrap_or(defaults.log_file),
            export_prefix: self.prefix.unwrap_or(defaults.export_prefix),
            download_delay: self
                .delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.download_delay),
            ..defaults
        }
    }
}

fn main() -> Result<()> {
    // Load environment variables before clap reads them
    dotenvy::dotenv().ok();

    let config = Args::parse().into_config();
    init_logging(&config.log_file)?;
    config.trace_loaded();

    println!("{} Conference Harvester", config.export_prefix);
    println!("{}", "=".repeat(60));
    println!("Event: {}", config.event_url());
    println!();

    let harvester = Harvester::new(config).context("failed to set up harvester")?;
    let report = harvester.run().context("harvest failed")?;
    info!(errors = report.errors, "Harvester finished");

    let config = harvester.config();
    let prefix = &config.export_prefix;
    let output_dir = std::fs::canonicalize(&config.output_dir).unwrap_or_else(|_| config.output_dir.clone());
    println!();
    println!("{}", "=".repeat(60));
    println!("Harvest completed in {:.2?}", report.elapsed);
    println!(
        "Contributions: {} ({} oral, {} posters, {} others)",
        report.total_contributions, report.oral_presentations, report.posters, report.others
    );
    println!(
        "Files: {} downloaded, {} already present, {} errors",
        report.downloaded_files, report.skipped_files, report.errors
    );
    println!("Output directory: {}", output_dir.display());
    println!();
    println!("Main output files:");
    println!("  {}_Summary.txt - Complete harvest report", prefix);
    println!("  {}_All_Contributions.csv - All contributions as a spreadsheet", prefix);
    println!("  {}_All_Contributions.json - Complete data in JSON", prefix);
    println!("  Oral_Presentations/ - Oral presentation attachments");
    println!("  Posters/ - Poster attachments");
    println!("  Attachments/ - Other attachments");
    println!("  By_Date/ - Contributions grouped by date");

    Ok(())
}
