//! Directory-backed store: one file per identifier.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::backing::BackingStore;
use crate::error::{CacheError, Result};

const BLOB_EXTENSION: &str = "json";

/// Stores each blob as `<dir>/<identifier>.json`.
///
/// Writes land in a temporary sibling file, are flushed with `sync_all` and
/// then renamed over the target, so a crash never leaves a torn blob behind.
#[derive(Debug, Clone)]
pub struct FileBackingStore {
    dir: PathBuf,
}

impl FileBackingStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn blob_path(&self, identifier: &str) -> Result<PathBuf> {
        if identifier.is_empty()
            || identifier.starts_with('.')
            || identifier.contains(['/', '\\'])
        {
            return Err(CacheError::Persistence(format!(
                "Invalid blob identifier: {identifier:?}"
            )));
        }
        Ok(self.dir.join(format!("{identifier}.{BLOB_EXTENSION}")))
    }
}

impl BackingStore for FileBackingStore {
    fn write(&mut self, identifier: &str, blob: &[u8]) -> Result<()> {
        let path = self.blob_path(identifier)?;
        fs::create_dir_all(&self.dir)?;

        let tmp_path = self.dir.join(format!(".{identifier}.tmp"));
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(blob)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &path)?;

        // Persist the rename itself.
        #[cfg(unix)]
        File::open(&self.dir)?.sync_all()?;

        debug!("Wrote {} bytes to {}", blob.len(), path.display());
        Ok(())
    }

    fn read(&self, identifier: &str) -> Result<Option<Vec<u8>>> {
        let path = self.blob_path(identifier)?;
        match fs::read(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
