//! Attachment downloads into the per-category directory tree.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{error, info};

use crate::classify::{Categorized, Category};
use crate::error::DownloadError;
use crate::models::{Attachment, Contribution};
use crate::report::HarvestReport;
use crate::staging::StagedFile;
use crate::utils::{ellipsize, sanitize_filename};

/// Bytes read from the response per write
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Result of one successful attachment step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded { bytes: u64 },
    /// The target file already existed and was left untouched
    Skipped,
}

/// Directory for one contribution's attachments:
/// `<output_dir>/<category folder>/<id> - <sanitized title>`.
pub fn contribution_dir(output_dir: &Path, category: Category, contribution: &Contribution) -> PathBuf {
    // ids come from the server too, so they get the same treatment as titles
    let id = sanitize_filename(contribution.display_id().unwrap_or_default());
    let folder = format!("{} - {}", id, sanitize_filename(&contribution.title));
    output_dir.join(category.folder()).join(folder)
}

/// File name for an attachment: its file name, else its title, else `attachment`.
pub fn attachment_filename(attachment: &Attachment) -> String {
    if !attachment.filename.is_empty() {
        sanitize_filename(&attachment.filename)
    } else if !attachment.title.is_empty() {
        sanitize_filename(&attachment.title)
    } else {
        "attachment".to_string()
    }
}

/// Sequential, throttled downloader for contribution attachments.
pub struct Materializer<'a> {
    client: &'a Client,
    output_dir: &'a Path,
    timeout: Duration,
    delay: Duration,
}

impl<'a> Materializer<'a> {
    pub fn new(client: &'a Client, output_dir: &'a Path, timeout: Duration, delay: Duration) -> Self {
        Self {
            client,
            output_dir,
            timeout,
            delay,
        }
    }

    /// Download every attachment of every contribution, category by category.
    ///
    /// Failures are logged and counted in `report`; processing always continues.
    pub fn materialize_all(&self, categorized: &Categorized<'_>, report: &mut HarvestReport) {
        for category in Category::ALL {
            let contributions = categorized.get(category);
            info!(
                count = contributions.len(),
                folder = category.folder(),
                "Processing contributions"
            );

            for (i, contribution) in contributions.iter().enumerate() {
                info!(
                    "  [{}/{}] {}: {}",
                    i + 1,
                    contributions.len(),
                    contribution.display_id().unwrap_or("unknown"),
                    ellipsize(&contribution.title, 60)
                );

                for attachment in &contribution.attachments {
                    match self.download(attachment, contribution, category) {
                        Ok(DownloadOutcome::Downloaded { .. }) => report.downloaded_files += 1,
                        Ok(DownloadOutcome::Skipped) => report.skipped_files += 1,
                        Err(e) => {
                            error!(
                                error = %e,
                                filename = %attachment.filename,
                                "Failed to download attachment"
                            );
                            report.record_error();
                        }
                    }
                    if !self.delay.is_zero() {
                        thread::sleep(self.delay);
                    }
                }
            }
        }
    }

    /// Download one attachment unless a file already sits at its target path.
    pub fn download(
        &self,
        attachment: &Attachment,
        contribution: &Contribution,
        category: Category,
    ) -> Result<DownloadOutcome, DownloadError> {
        let dir = contribution_dir(self.output_dir, category, contribution);
        std::fs::create_dir_all(&dir).map_err(|source| DownloadError::Io {
            path: dir.clone(),
            source,
        })?;

        let name = attachment_filename(attachment);
        let path = dir.join(&name);
        if path.exists() {
            info!(file = %name, "File already exists, skipping");
            return Ok(DownloadOutcome::Skipped);
        }

        if attachment.download_url.is_empty() {
            return Err(DownloadError::MissingUrl);
        }

        info!(file = %name, "Downloading");
        let mut response = self
            .client
            .get(&attachment.download_url)
            .timeout(self.timeout)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status));
        }

        let bytes = stream_to(&mut response, &path)?;
        info!(file = %name, bytes, "Downloaded");
        Ok(DownloadOutcome::Downloaded { bytes })
    }
}

/// Copy `body` into a new file at `path` in `CHUNK_SIZE` pieces.
fn stream_to<R: Read>(body: &mut R, path: &Path) -> Result<u64, DownloadError> {
    let io_err = |source| DownloadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut staged = StagedFile::create(path).map_err(io_err)?;
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        let n = match body.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(io_err(e)),
        };
        staged.file().write_all(&buf[..n]).map_err(io_err)?;
        total += n as u64;
    }
    staged.commit_new().map_err(io_err)?;
    Ok(total)
}
