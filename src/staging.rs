//! Temp-file-then-rename writes.
//!
//! Every output file is written to a temporary file next to its final path
//! and renamed into place only once complete, so an interrupted run never
//! leaves a truncated file under the final name.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// A file being written that becomes visible at `target` on commit.
///
/// Dropping it without committing removes the temporary file.
#[derive(Debug)]
pub struct StagedFile {
    tmp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    /// Stage a new file for `target`. The parent directory must exist.
    pub fn create(target: &Path) -> io::Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let tmp = tempfile::Builder::new()
            .prefix(".partial-")
            .tempfile_in(dir)?;
        Ok(Self {
            tmp,
            target: target.to_path_buf(),
        })
    }

    pub fn file(&mut self) -> &mut File {
        self.tmp.as_file_mut()
    }

    /// Move the file into place, replacing anything already at the target.
    pub fn commit(self) -> io::Result<()> {
        self.tmp.as_file().sync_all()?;
        self.tmp.persist(&self.target).map_err(|e| e.error)?;
        Ok(())
    }

    /// Move the file into place, failing with `AlreadyExists` if the target exists.
    pub fn commit_new(self) -> io::Result<()> {
        self.tmp.as_file().sync_all()?;
        self.tmp.persist_noclobber(&self.target).map_err(|e| e.error)?;
        Ok(())
    }
}
