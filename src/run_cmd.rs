//! Run command: the full pipeline for one station file.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use pluvio_idf::run_station_file;
use pluvio_io::StationCache;

use crate::cli::RunArgs;
use crate::config::PluvioConfig;
use crate::convert;
use crate::output::{OutputSettings, write_tables};

/// Process a single station and write its tables.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();
    // 1. Load project TOML
    let config = PluvioConfig::load(&args.config)?;
    let idf_cfg = convert::build_idf_config(&config)?;
    let settings = OutputSettings {
        dir: args.output_dir.unwrap_or_else(|| config.io.output_dir.clone()),
        format: convert::parse_format(&config.io.format)?,
        writer: convert::build_writer_config(&config.io)?,
    };

    // 2. Station pipeline
    info!(path = %args.input.display(), "processing station");
    let cache = StationCache::new();
    let idf = run_station_file(&args.input, &cache, &idf_cfg)
        .with_context(|| format!("failed to process {}", args.input.display()))?;

    // 3. Write tables
    let written = write_tables(std::slice::from_ref(&idf), &settings)?;

    let params = idf.fit().params();
    println!(
        "station {} ({}): {} annual maxima, {}",
        idf.station(),
        idf.metadata().name(),
        idf.annual_maxima().len(),
        idf.scheme(),
    );
    println!(
        "GEV shape={:.4} loc={:.3} scale={:.3}",
        params.shape(),
        params.loc(),
        params.scale()
    );
    for row in idf.return_periods() {
        println!("  Tr={:>4} years: {:.1} mm", row.return_period, row.depth_mm);
    }
    for path in &written {
        println!("wrote {}", path.display());
    }
    Ok(())
}
