//! CLI command implementations.

pub mod correlation;
pub mod indicators;
pub mod performance;
pub mod risk;
pub mod validate;

use anyhow::{Context, Result};
use cryptodash_core::types::OhlcvSeries;
use serde::Serialize;
use std::path::Path;

/// Load a CSV price history into column form.
fn load_series(path: &Path) -> Result<OhlcvSeries> {
    let bars = cryptodash_data::load_csv(path)
        .with_context(|| format!("Failed to load data from {}", path.display()))?;

    if bars.is_empty() {
        anyhow::bail!("No bars in {}", path.display());
    }

    tracing::info!(path = %path.display(), bars = bars.len(), "loaded price history");
    Ok(OhlcvSeries::from_bars(&bars))
}

/// Simple close-to-close returns; one fewer value than `closes`.
fn close_returns(closes: &[f64]) -> Vec<f64> {
    closes.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
