//! Parse cache for station files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use tracing::debug;

use crate::error::IoError;
use crate::reader::{StationFile, read_station};

type Entry = (SystemTime, Arc<StationFile>);

/// Thread-safe cache of parsed station files keyed by path.
///
/// An entry is reused only while the file's modification time is
/// unchanged. Cached values are immutable and shared through [`Arc`].
#[derive(Debug, Default)]
pub struct StationCache {
    entries: RwLock<HashMap<PathBuf, Entry>>,
}

impl StationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the parsed file, reading it on a miss or after a change.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`read_station`], or [`IoError::FileNotFound`]
    /// if the file's metadata cannot be read.
    pub fn load(&self, path: &Path) -> Result<Arc<StationFile>, IoError> {
        let modified = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|e| IoError::from_io(path, &e))?;

        if let Ok(entries) = self.entries.read()
            && let Some((stamp, file)) = entries.get(path)
            && *stamp == modified
        {
            debug!(path = %path.display(), "station cache hit");
            return Ok(Arc::clone(file));
        }

        let file = Arc::new(read_station(path)?);
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(path.to_path_buf(), (modified, Arc::clone(&file)));
        }
        Ok(file)
    }

    /// Number of cached files.
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |e| e.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops the entry for `path`, if any.
    pub fn evict(&self, path: &Path) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(path);
        }
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}
