//! # pluvio-io
//!
//! Read daily rain-gauge station files and write result tables. Bridges the
//! semicolon-delimited station format into typed, gap-filtered series and
//! renders output tables as CSV or Parquet.
//!
//! ## Station file layout
//!
//! | Lines | Content |
//! |-------|---------|
//! | 1-9 | `key: value` metadata (`nome`, `latitude`, `longitude`, `altitude`, `data_inicial`, `data_final`, ...) |
//! | 10+ | `date;precip;temp;humidity;wind[;]` daily records |
//!
//! ```mermaid
//! graph LR
//!     A["StationCatalog::resolve(code)"] --> B["path"]
//!     B -->|"StationCache::load / read_station"| C["StationFile"]
//!     C --> D["StationMetadata"]
//!     C --> E["StationSeries (complete months)"]
//! ```

mod cache;
mod catalog;
mod error;
mod header;
mod parquet_write;
mod reader;
mod station;
mod table;
mod validate;
mod writer;

pub use cache::StationCache;
pub use catalog::{StationCatalog, station_code};
pub use error::IoError;
pub use header::{HEADER_LINES, parse_header};
pub use reader::{
    StationFile, completeness_filter, parse_station_text, read_station, read_station_records,
};
pub use station::{DailyRecord, StationMetadata, StationSeries};
pub use table::{Column, ColumnData, Table};
pub use writer::{Compression, WriterConfig, write_csv, write_parquet};
