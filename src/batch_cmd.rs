//! Batch command: many stations in parallel, combined tables and a JSON
//! summary.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, info_span};

use pluvio_idf::{BatchOutcome, StationSource, run_batch};
use pluvio_io::{StationCache, StationCatalog};

use crate::cli::BatchArgs;
use crate::config::PluvioConfig;
use crate::convert;
use crate::output::{OutputSettings, write_tables};

/// Exit code when every requested station failed.
pub const EXIT_ALL_FAILED: i32 = 2;

/// Per-station status written to `summary.json`.
#[derive(Debug, Serialize)]
struct StationStatus {
    station: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    n_years: Option<usize>,
}

#[derive(Debug, Serialize)]
struct BatchReport {
    total: usize,
    succeeded: usize,
    failed: usize,
    by_kind: BTreeMap<&'static str, usize>,
    stations: Vec<StationStatus>,
}

impl From<&BatchOutcome> for BatchReport {
    fn from(outcome: &BatchOutcome) -> Self {
        let ok = outcome.results.iter().map(|idf| StationStatus {
            station: idf.station().to_string(),
            status: "ok",
            kind: None,
            cause: None,
            n_years: Some(idf.annual_maxima().len()),
        });
        let failed = outcome.failures.iter().map(|f| StationStatus {
            station: f.station.clone(),
            status: "failed",
            kind: Some(f.kind.as_str()),
            cause: Some(f.cause.clone()),
            n_years: None,
        });
        Self {
            total: outcome.summary.total,
            succeeded: outcome.summary.succeeded,
            failed: outcome.summary.failed,
            by_kind: outcome
                .summary
                .by_kind
                .iter()
                .map(|(k, n)| (k.as_str(), *n))
                .collect(),
            stations: ok.chain(failed).collect(),
        }
    }
}

/// Run the batch pipeline. Returns the process exit code.
pub fn run(args: BatchArgs) -> Result<i32> {
    let _cmd = info_span!("batch").entered();
    // 1. Load project TOML
    let config = PluvioConfig::load(&args.config)?;
    let idf_cfg = convert::build_idf_config(&config)?;
    let settings = OutputSettings {
        dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| config.io.output_dir.clone()),
        format: convert::parse_format(&config.io.format)?,
        writer: convert::build_writer_config(&config.io)?,
    };

    // 2. Collect stations
    let catalog = if args.input_dir.is_empty() {
        convert::build_catalog(&config.io)?
    } else {
        StationCatalog::new(args.input_dir.iter().cloned())
            .with_extensions(config.io.extensions.iter())
    };
    let sources = collect_sources(&args, &catalog)?;
    if sources.is_empty() {
        bail!(
            "no station files found in {}",
            display_dirs(&catalog).join(", ")
        );
    }
    info!(n_stations = sources.len(), "stations collected");

    // 3. Run
    let cache = StationCache::new();
    let outcome =
        run_batch(&sources, Some(&catalog), &cache, &idf_cfg).context("batch run failed")?;

    // 4. Write tables and summary
    let written = write_tables(&outcome.results, &settings)?;
    let report = BatchReport::from(&outcome);
    let json = serde_json::to_string_pretty(&report).context("failed to serialize summary")?;
    let summary_path = settings.dir.join("summary.json");
    std::fs::write(&summary_path, json)
        .with_context(|| format!("failed to write {}", summary_path.display()))?;
    info!(path = %summary_path.display(), "summary written");

    println!(
        "{} stations: {} succeeded, {} failed",
        outcome.summary.total, outcome.summary.succeeded, outcome.summary.failed
    );
    for failure in &outcome.failures {
        println!("  {} [{}]: {}", failure.station, failure.kind, failure.cause);
    }
    for path in written.iter().chain([&summary_path]) {
        println!("wrote {}", path.display());
    }

    Ok(if outcome.all_failed() {
        EXIT_ALL_FAILED
    } else {
        0
    })
}

/// Files under the input directories plus explicit station codes. With
/// neither, every station file in the configured data directories.
fn collect_sources(args: &BatchArgs, catalog: &StationCatalog) -> Result<Vec<StationSource>> {
    let mut sources = Vec::new();
    if !args.input_dir.is_empty() || args.station.is_empty() {
        let files = catalog.list().context("failed to list station files")?;
        sources.extend(files.into_iter().map(StationSource::Path));
    }
    sources.extend(args.station.iter().cloned().map(StationSource::Code));
    Ok(sources)
}

fn display_dirs(catalog: &StationCatalog) -> Vec<String> {
    catalog
        .dirs()
        .iter()
        .map(|d| d.display().to_string())
        .collect()
}
