//! Correlation command implementation.

use anyhow::Result;
use cryptodash_risk::CorrelationMatrix;
use serde::Serialize;
use std::path::Path;

use super::{close_returns, load_series, print_json};
use crate::cli::{CorrelationArgs, OutputFormat};

#[derive(Debug, Serialize)]
struct CorrelationReport {
    assets: Vec<String>,
    matrix: CorrelationMatrix,
}

fn asset_label(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Trim every series to the length of the shortest one, keeping the most
/// recent values.
fn align_tails(series: Vec<Vec<f64>>) -> Vec<Vec<f64>> {
    let shortest = series.iter().map(Vec::len).min().unwrap_or(0);
    series
        .into_iter()
        .map(|s| s[s.len() - shortest..].to_vec())
        .collect()
}

pub fn run(args: CorrelationArgs) -> Result<()> {
    let assets: Vec<String> = args.data.iter().map(|p| asset_label(p)).collect();

    let mut returns = Vec::with_capacity(args.data.len());
    for path in &args.data {
        returns.push(close_returns(load_series(path)?.closes()));
    }

    let matrix = CorrelationMatrix::from_returns(&align_tails(returns))?;

    match args.output {
        OutputFormat::Json => print_json(&CorrelationReport { assets, matrix }),
        OutputFormat::Text => {
            let width = assets.iter().map(String::len).max().unwrap_or(0).max(8);
            print!("{:width$}", "");
            for asset in &assets {
                print!(" {asset:>width$}");
            }
            println!();
            for (asset, row) in assets.iter().zip(matrix.rows()) {
                print!("{asset:width$}");
                for value in row {
                    print!(" {value:>width$.4}");
                }
                println!();
            }
            Ok(())
        }
    }
}
