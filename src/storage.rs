//! Report persistence: a flat, append-only text file.
//!
//! Each program run appends one rendered session, preceded by a header line:
//!
//! ```text
//! Session: 2026-10-18T09:12:44Z
//! Shapes drawn: Square: 40 (time: 19.00 seconds), ...
//! Largest shape: Square: 40
//! Most frequent shape: Square: 1 times
//! Average time: 19.00 seconds
//!
//! Session: ...
//! ```

use std::{fs, io, path::Path, path::PathBuf};

// Trait must be in scope for `.write_all()` on `File`.
use io::Write;

use jiff::Timestamp;

/// Errors that can occur while reading or appending the report.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// The append-only session report file.
pub struct ReportLog {
    path: PathBuf,
}

impl ReportLog {
    /// Opens the report at `path`, creating its parent directory if needed.
    ///
    /// The file itself is created on the first append.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one rendered session, stamped with `started_at`.
    pub fn append_session(&self, started_at: Timestamp, report: &str) -> Result<()> {
        let mut entry = format!("Session: {started_at}\n{report}");
        if !entry.ends_with('\n') {
            entry.push('\n');
        }
        entry.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        file.write_all(entry.as_bytes())
            .map_err(|source| self.io_error(source))?;
        tracing::info!(path = %self.path.display(), "appended session report");
        Ok(())
    }

    /// Reads the whole report. A report that was never written is empty.
    pub fn read(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
