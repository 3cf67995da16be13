//! Station file lookup across data directories.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::IoError;

/// File-name prefix shared by all station files.
const FILE_PREFIX: &str = "dados_";

/// Resolves station codes to files named `dados_<code>_*.<ext>`.
///
/// Directories are searched in order; within a directory, candidates are
/// sorted by file name and the first match wins.
#[derive(Debug, Clone)]
pub struct StationCatalog {
    dirs: Vec<PathBuf>,
    extensions: Vec<String>,
}

impl StationCatalog {
    /// Creates a catalog over `dirs` accepting `csv` and `txt` files.
    pub fn new<P: Into<PathBuf>>(dirs: impl IntoIterator<Item = P>) -> Self {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
            extensions: vec!["csv".into(), "txt".into()],
        }
    }

    /// Replaces the accepted file extensions (without the dot).
    pub fn with_extensions<S: Into<String>>(mut self, exts: impl IntoIterator<Item = S>) -> Self {
        self.extensions = exts.into_iter().map(Into::into).collect();
        self
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Validates this catalog.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if no directory or no extension is
    /// configured.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut c = crate::validate::ValidationCollector::new();
        if self.dirs.is_empty() {
            c.push("at least one data directory is required");
        }
        if self.extensions.is_empty() {
            c.push("at least one file extension is required");
        }
        c.finish()
    }

    /// Finds the data file for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::StationNotFound`] when no directory holds a
    /// matching file, or [`IoError::Access`] if a directory cannot be
    /// listed.
    pub fn resolve(&self, code: &str) -> Result<PathBuf, IoError> {
        let prefix = format!("{FILE_PREFIX}{code}_");
        for dir in &self.dirs {
            let found = self
                .station_files_in(dir)?
                .into_iter()
                .find(|p| file_name(p).is_some_and(|n| n.starts_with(&prefix)));
            if let Some(path) = found {
                debug!(code, path = %path.display(), "station resolved");
                return Ok(path);
            }
        }
        Err(IoError::StationNotFound {
            code: code.to_string(),
        })
    }

    /// Every station file in every directory, sorted by name per directory.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Access`] if an existing directory cannot be
    /// listed.
    pub fn list(&self) -> Result<Vec<PathBuf>, IoError> {
        let mut all = Vec::new();
        for dir in &self.dirs {
            all.extend(self.station_files_in(dir)?);
        }
        Ok(all)
    }

    /// Station files in one directory. A missing directory yields none.
    fn station_files_in(&self, dir: &Path) -> Result<Vec<PathBuf>, IoError> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(dir = %dir.display(), "data directory does not exist");
                return Ok(Vec::new());
            }
            Err(e) => return Err(IoError::from_io(dir, &e)),
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && self.is_station_file(p))
            .collect();
        files.sort();
        Ok(files)
    }

    fn is_station_file(&self, path: &Path) -> bool {
        let has_prefix = file_name(path).is_some_and(|n| n.starts_with(FILE_PREFIX));
        let has_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)));
        has_prefix && has_ext
    }
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// Extracts the station code from a file named `dados_<code>_*`.
///
/// Falls back to the file stem for other names.
///
/// ```
/// use std::path::Path;
/// use pluvio_io::station_code;
///
/// assert_eq!(station_code(Path::new("data/dados_A001_D_2000-01-01.csv")), "A001");
/// assert_eq!(station_code(Path::new("other.csv")), "other");
/// ```
pub fn station_code(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    stem.strip_prefix(FILE_PREFIX)
        .and_then(|rest| rest.split('_').next())
        .filter(|code| !code.is_empty())
        .unwrap_or(stem)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_from_file_name() {
        assert_eq!(station_code(Path::new("dados_83377_D_1961-01-01.csv")), "83377");
        assert_eq!(station_code(Path::new("dados_A652.csv")), "A652");
        assert_eq!(station_code(Path::new("dados_.csv")), "dados_");
    }

    #[test]
    fn extension_filter_is_case_insensitive() {
        let cat = StationCatalog::new(["."]);
        assert!(cat.is_station_file(Path::new("dados_1_x.CSV")));
        assert!(cat.is_station_file(Path::new("dados_1_x.txt")));
        assert!(!cat.is_station_file(Path::new("dados_1_x.parquet")));
        assert!(!cat.is_station_file(Path::new("station_1.csv")));
    }

    #[test]
    fn validate_rejects_empty() {
        let cat = StationCatalog::new(Vec::<PathBuf>::new()).with_extensions(Vec::<String>::new());
        match cat.validate().unwrap_err() {
            IoError::Validation { count, .. } => assert_eq!(count, 2),
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
