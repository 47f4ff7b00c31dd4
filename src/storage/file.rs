//! File-backed storage backend.
//!
//! Stores exactly one logical value in a single file at a fixed,
//! constructor-provided name. The `key` arguments exist for interface
//! uniformity only and never select a file.

use crate::storage::traits::StorageBackend;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed storage backend.
///
/// Every write overwrites the whole file; there is no append and no
/// atomic-rename step, so a crash mid-write can leave a corrupt file. A
/// corrupt file surfaces as a `Decode` error on the next load.
#[derive(Debug, Clone)]
pub struct FileBackend {
    /// Full path of the backing file.
    path: PathBuf,
}

impl FileBackend {
    /// Creates a backend storing its value at `dir`/`file_name`.
    pub fn new(dir: impl Into<PathBuf>, file_name: impl AsRef<str>) -> Self {
        Self {
            path: dir.into().join(file_name.as_ref()),
        }
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    /// `key` is ignored: this backend holds one value per instance.
    fn write(&mut self, _key: &str, bytes: &[u8]) -> Result<()> {
        // Best effort; a missing directory surfaces from the write below.
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        fs::write(&self.path, bytes).map_err(|e| Error::MediumUnavailable {
            operation: "write_settings_file".to_string(),
            cause: e.to_string(),
        })
    }

    /// `key` is ignored: this backend holds one value per instance.
    fn read(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        fs::read(&self.path)
            .map(Some)
            .map_err(|e| Error::MediumUnavailable {
                operation: "read_settings_file".to_string(),
                cause: e.to_string(),
            })
    }
}
