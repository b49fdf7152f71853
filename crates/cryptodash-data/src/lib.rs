//! Market data for the analysis engine.
//!
//! Bars come from CSV files; exchange rates are held in a TTL cache that the
//! caller drives with an explicit clock.

mod cache;
mod csv_source;

pub use cache::RateCache;
pub use csv_source::CsvDataSource;

use std::path::Path;

use cryptodash_core::error::DataError;
use cryptodash_core::types::Bar;

/// Load bars from a CSV file.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<Bar>, DataError> {
    CsvDataSource::new(path)?.load()
}
