//! Writes the three result tables into an output directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use pluvio_idf::{StationIdf, tables};
use pluvio_io::{Table, WriterConfig, write_csv, write_parquet};

use crate::convert::OutputFormat;

/// Output settings shared by `run` and `batch`.
pub struct OutputSettings {
    pub dir: PathBuf,
    pub format: OutputFormat,
    pub writer: WriterConfig,
}

/// Writes annual maxima, return periods and the intensity matrix for
/// `results`. Returns the files written.
pub fn write_tables(results: &[StationIdf], settings: &OutputSettings) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&settings.dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            settings.dir.display()
        )
    })?;

    let named = [
        (
            "annual_maxima",
            tables::annual_maxima(results).context("failed to build annual maxima table")?,
        ),
        (
            "return_periods",
            tables::return_periods(results).context("failed to build return period table")?,
        ),
        (
            "idf_intensities",
            tables::intensities(results).context("failed to build intensity table")?,
        ),
    ];

    let mut written = Vec::new();
    for (stem, table) in &named {
        written.extend(write_one(&settings.dir, stem, table, settings)?);
    }
    info!(dir = %settings.dir.display(), n_files = written.len(), "tables written");
    Ok(written)
}

fn write_one(
    dir: &Path,
    stem: &str,
    table: &Table,
    settings: &OutputSettings,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    if settings.format.csv() {
        let path = dir.join(format!("{stem}.csv"));
        write_csv(&path, table).with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }
    if settings.format.parquet() {
        let path = dir.join(format!("{stem}.parquet"));
        write_parquet(&path, table, &settings.writer)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}
