//! Exporters for the normalized, classified contribution set.
//!
//! Each exporter is independent of the others. A failing exporter is logged
//! and counted as an error; the remaining ones still run.

pub mod by_date;
pub mod csv;
pub mod json;
pub mod text;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{error, info};

use crate::classify::Categorized;
use crate::error::ExportError;
use crate::models::Event;
use crate::report::HarvestReport;
use crate::staging::StagedFile;

/// Everything an exporter reads
pub struct ExportContext<'a> {
    pub event: &'a Event,
    pub categorized: &'a Categorized<'a>,
    pub output_dir: &'a Path,
    /// File name prefix, e.g. `LLRF2025`
    pub prefix: &'a str,
    pub scrape_time: DateTime<Local>,
}

impl ExportContext<'_> {
    pub fn json_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_All_Contributions.json", self.prefix))
    }

    pub fn csv_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_All_Contributions.csv", self.prefix))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}_Summary.txt", self.prefix))
    }

    /// ISO-8601 local time, as stored in JSON exports
    pub fn scrape_time_iso(&self) -> String {
        self.scrape_time.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }

    /// Human-readable local time, as shown in text reports
    pub fn scrape_time_display(&self) -> String {
        self.scrape_time.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Run every exporter. The text summary reads the counters in `report`, so
/// attachments should be materialized first.
pub fn export_all(ctx: &ExportContext<'_>, report: &mut HarvestReport) {
    let path = ctx.json_path();
    finish("JSON", &path, json::write_all_contributions(ctx, &path), report);

    let path = ctx.csv_path();
    finish("CSV", &path, csv::write_contributions_csv(ctx, &path), report);

    let path = ctx.summary_path();
    let summary = text::write_summary_file(ctx, report, &path);
    finish("text summary", &path, summary, report);

    info!("Grouping contributions by date");
    by_date::write_by_date(ctx, report);
}

fn finish(kind: &str, path: &Path, result: Result<(), ExportError>, report: &mut HarvestReport) {
    match result {
        Ok(()) => info!(path = %path.display(), "Saved {}", kind),
        Err(e) => {
            error!(error = %e, "Failed to save {}", kind);
            report.record_error();
        }
    }
}

/// Write `path` through a staged temp file and a buffered writer.
pub(crate) fn write_staged<F>(path: &Path, write: F) -> Result<(), ExportError>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<(), ExportError>,
{
    let io_err = io_error(path);

    let mut staged = StagedFile::create(path).map_err(&io_err)?;
    {
        let mut out = BufWriter::new(staged.file());
        write(&mut out)?;
        out.flush().map_err(&io_err)?;
    }
    staged.commit().map_err(&io_err)
}

/// Serialize `value` as pretty JSON into `path`. Non-ASCII text is kept as-is.
pub(crate) fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), ExportError> {
    write_staged(path, |out| {
        serde_json::to_writer_pretty(&mut *out, value).map_err(|source| ExportError::Json {
            path: path.to_path_buf(),
            source,
        })
    })
}

pub(crate) fn io_error(path: &Path) -> impl Fn(std::io::Error) -> ExportError + '_ {
    move |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    }
}
