use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Pluvio configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluvioConfig {
    /// Input discovery and output settings.
    #[serde(default)]
    pub io: IoToml,

    /// GEV fit settings.
    #[serde(default)]
    pub fit: FitToml,

    /// Sub-daily disaggregation settings.
    #[serde(default)]
    pub disaggregation: DisaggregationToml,

    /// Batch settings.
    #[serde(default)]
    pub batch: BatchToml,
}

impl PluvioConfig {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default = "default_data_dirs")]
    pub data_dirs: Vec<PathBuf>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

fn default_data_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from("rain_datasets"), PathBuf::from("data")]
}
fn default_extensions() -> Vec<String> {
    vec!["csv".to_string(), "txt".to_string()]
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}
fn default_format() -> String {
    "csv".to_string()
}
fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            data_dirs: default_data_dirs(),
            extensions: default_extensions(),
            output_dir: default_output_dir(),
            format: default_format(),
            compression: default_compression(),
            row_group_size: default_row_group_size(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FitToml {
    #[serde(default = "default_max_iters")]
    pub max_iters: u64,
    #[serde(default = "default_sd_tolerance")]
    pub sd_tolerance: f64,
    #[serde(default = "default_n_samples")]
    pub n_samples: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_max_iters() -> u64 {
    5000
}
fn default_sd_tolerance() -> f64 {
    1e-10
}
fn default_n_samples() -> usize {
    100
}
fn default_seed() -> u64 {
    42
}

impl Default for FitToml {
    fn default() -> Self {
        Self {
            max_iters: default_max_iters(),
            sd_tolerance: default_sd_tolerance(),
            n_samples: default_n_samples(),
            seed: default_seed(),
        }
    }
}

/// `None` keeps the built-in coefficient table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisaggregationToml {
    #[serde(default)]
    pub coefficients: Option<Vec<f64>>,
}

/// `threads = None` uses rayon's global pool.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchToml {
    #[serde(default)]
    pub threads: Option<usize>,
}
