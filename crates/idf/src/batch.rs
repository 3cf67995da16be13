//! Parallel batch runs over many stations.

use std::collections::BTreeMap;
use std::path::PathBuf;

use pluvio_io::{StationCache, StationCatalog};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::IdfConfig;
use crate::error::{ErrorKind, IdfError};
use crate::pipeline::{StationIdf, run_station_file};

/// Where a batch entry comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationSource {
    /// A station file on disk.
    Path(PathBuf),
    /// A station code resolved through a [`StationCatalog`].
    Code(String),
}

impl StationSource {
    /// Identifier used in failure reports.
    pub fn label(&self) -> String {
        match self {
            Self::Path(p) => pluvio_io::station_code(p),
            Self::Code(c) => c.clone(),
        }
    }
}

/// A station that could not be processed.
#[derive(Debug, Clone, PartialEq)]
pub struct StationFailure {
    pub station: String,
    pub kind: ErrorKind,
    pub cause: String,
}

impl From<IdfError> for StationFailure {
    fn from(err: IdfError) -> Self {
        Self {
            station: err.station().unwrap_or_default().to_string(),
            kind: err.kind(),
            cause: err.reason().to_string(),
        }
    }
}

/// Counts per outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub by_kind: BTreeMap<ErrorKind, usize>,
}

/// Result of a batch run, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub results: Vec<StationIdf>,
    pub failures: Vec<StationFailure>,
    pub summary: BatchSummary,
}

impl BatchOutcome {
    /// `true` when at least one station was requested and none succeeded.
    pub fn all_failed(&self) -> bool {
        self.summary.total > 0 && self.summary.succeeded == 0
    }

    fn from_results(results: Vec<Result<StationIdf, StationFailure>>) -> Self {
        let mut outcome = Self::default();
        outcome.summary.total = results.len();
        for result in results {
            match result {
                Ok(idf) => outcome.results.push(idf),
                Err(failure) => {
                    *outcome.summary.by_kind.entry(failure.kind).or_insert(0) += 1;
                    outcome.failures.push(failure);
                }
            }
        }
        outcome.summary.succeeded = outcome.results.len();
        outcome.summary.failed = outcome.failures.len();
        outcome
    }
}

/// Runs every station in parallel. A failing station never aborts the
/// batch; it is reported in [`BatchOutcome::failures`].
///
/// Codes need a `catalog`; without one they fail as lookups. Each parsed
/// file is evicted from `cache` once its station is done, so memory does
/// not grow with the size of the batch.
///
/// # Errors
///
/// Returns [`IdfError::InvalidConfig`] if `config` is invalid or the
/// worker pool cannot be built.
pub fn run_batch(
    sources: &[StationSource],
    catalog: Option<&StationCatalog>,
    cache: &StationCache,
    config: &IdfConfig,
) -> Result<BatchOutcome, IdfError> {
    config.validate()?;

    let work = || -> Vec<Result<StationIdf, StationFailure>> {
        sources
            .par_iter()
            .map(|source| run_source(source, catalog, cache, config).map_err(StationFailure::from))
            .collect()
    };

    let results = match config.threads() {
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .map_err(|e| IdfError::InvalidConfig {
                reason: e.to_string(),
            })?
            .install(work),
        None => work(),
    };

    let outcome = BatchOutcome::from_results(results);
    for failure in &outcome.failures {
        warn!(
            station = %failure.station,
            kind = %failure.kind,
            cause = %failure.cause,
            "station failed"
        );
    }
    info!(
        total = outcome.summary.total,
        succeeded = outcome.summary.succeeded,
        failed = outcome.summary.failed,
        "batch finished"
    );
    Ok(outcome)
}

fn run_source(
    source: &StationSource,
    catalog: Option<&StationCatalog>,
    cache: &StationCache,
    config: &IdfConfig,
) -> Result<StationIdf, IdfError> {
    let path = match source {
        StationSource::Path(p) => p.clone(),
        StationSource::Code(code) => {
            let catalog = catalog.ok_or_else(|| IdfError::Lookup {
                station: code.clone(),
                reason: "no data directories configured".to_string(),
            })?;
            catalog
                .resolve(code)
                .map_err(|e| IdfError::from_io(code, &e))?
        }
    };
    // Each file is read once per batch; release it as soon as it is done.
    let result = run_station_file(&path, cache, config);
    cache.evict(&path);
    result
}
