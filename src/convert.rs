//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use crate::config::*;

use pluvio_gev::FitConfig;
use pluvio_idf::{CoefficientTable, IdfConfig};
use pluvio_io::{Compression, StationCatalog, WriterConfig};

/// Which table formats a run writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Parquet,
    Both,
}

impl OutputFormat {
    pub fn csv(self) -> bool {
        matches!(self, Self::Csv | Self::Both)
    }

    pub fn parquet(self) -> bool {
        matches!(self, Self::Parquet | Self::Both)
    }
}

/// Parses an output format name string into the corresponding enum variant.
pub fn parse_format(s: &str) -> Result<OutputFormat> {
    match s.to_lowercase().as_str() {
        "csv" => Ok(OutputFormat::Csv),
        "parquet" => Ok(OutputFormat::Parquet),
        "both" => Ok(OutputFormat::Both),
        other => bail!("unknown output format: {other:?}"),
    }
}

/// Parses a compression algorithm name string into the corresponding enum variant.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        other => bail!("unknown compression: {other:?}"),
    }
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoToml) -> Result<WriterConfig> {
    let cfg = WriterConfig::default()
        .with_compression(parse_compression(&io.compression)?)
        .with_row_group_size(io.row_group_size);
    cfg.validate().context("invalid [io] writer settings")?;
    Ok(cfg)
}

/// Builds a [`StationCatalog`] over the configured data directories.
pub fn build_catalog(io: &IoToml) -> Result<StationCatalog> {
    if io.extensions.is_empty() {
        bail!("[io] extensions must not be empty");
    }
    Ok(StationCatalog::new(io.data_dirs.iter().cloned()).with_extensions(io.extensions.iter()))
}

/// Builds a [`FitConfig`] from the TOML fit configuration.
pub fn build_fit_config(fit: &FitToml) -> Result<FitConfig> {
    let cfg = FitConfig::new()
        .with_max_iters(fit.max_iters)
        .with_sd_tolerance(fit.sd_tolerance)
        .with_n_samples(fit.n_samples)
        .with_seed(fit.seed);
    cfg.validate().context("invalid [fit] settings")?;
    Ok(cfg)
}

/// Builds the disaggregation [`CoefficientTable`]; defaults when unset.
pub fn build_coefficients(disaggregation: &DisaggregationToml) -> Result<CoefficientTable> {
    match &disaggregation.coefficients {
        None => Ok(CoefficientTable::default()),
        Some(values) => {
            CoefficientTable::new(values).context("invalid [disaggregation] coefficients")
        }
    }
}

/// Builds the full [`IdfConfig`] from the fit, disaggregation and batch
/// sections.
pub fn build_idf_config(config: &PluvioConfig) -> Result<IdfConfig> {
    let cfg = IdfConfig::new()
        .with_fit(build_fit_config(&config.fit)?)
        .with_coefficients(build_coefficients(&config.disaggregation)?)
        .with_threads(config.batch.threads);
    cfg.validate().context("invalid [batch] settings")?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names() {
        assert_eq!(parse_format("CSV").unwrap(), OutputFormat::Csv);
        assert!(parse_format("both").unwrap().parquet());
        assert!(parse_format("both").unwrap().csv());
        assert!(!parse_format("parquet").unwrap().csv());
        assert!(parse_format("xlsx").is_err());
    }

    #[test]
    fn compression_names() {
        assert_eq!(parse_compression("zstd").unwrap(), Compression::Zstd);
        assert_eq!(parse_compression("None").unwrap(), Compression::None);
        assert!(parse_compression("gzip").is_err());
    }

    #[test]
    fn default_config_converts() {
        let cfg = build_idf_config(&PluvioConfig::default()).unwrap();
        assert_eq!(cfg.fit().max_iters(), 5000);
        assert_eq!(cfg.fit().seed(), 42);
        assert_eq!(
            cfg.coefficients().as_array(),
            &pluvio_idf::DEFAULT_COEFFICIENTS
        );
        assert_eq!(cfg.threads(), None);
    }

    #[test]
    fn short_coefficient_list_rejected() {
        let toml = DisaggregationToml {
            coefficients: Some(vec![1.0; 5]),
        };
        let err = build_coefficients(&toml).unwrap_err();
        assert!(format!("{err:#}").contains("expected 13"));
    }

    #[test]
    fn zero_threads_rejected() {
        let mut config = PluvioConfig::default();
        config.batch.threads = Some(0);
        assert!(build_idf_config(&config).is_err());
    }

    #[test]
    fn zero_row_group_rejected() {
        let io = IoToml {
            row_group_size: 0,
            ..IoToml::default()
        };
        assert!(build_writer_config(&io).is_err());
    }

    #[test]
    fn empty_extensions_rejected() {
        let io = IoToml {
            extensions: Vec::new(),
            ..IoToml::default()
        };
        assert!(build_catalog(&io).is_err());
    }
}
