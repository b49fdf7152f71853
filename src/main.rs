//! cryptodash CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use cryptodash_config::load_config;
use cryptodash_telemetry::{setup_logging, LogFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // validate-config reports load errors itself
    if let Commands::ValidateConfig = cli.command {
        return cli::commands::validate::run(cli.config.as_deref());
    }

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;

    let level = cli
        .log_level
        .map(|level| level.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let format = if cli.json_logs || config.logging.is_json() {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    setup_logging(&level, format)?;

    match cli.command {
        Commands::Indicators(args) => cli::commands::indicators::run(args, &config),
        Commands::Risk(args) => cli::commands::risk::run(args, &config),
        Commands::Portfolio(args) => cli::commands::risk::run_portfolio(args),
        Commands::Performance(args) => cli::commands::performance::run(args, &config),
        Commands::Correlation(args) => cli::commands::correlation::run(args),
        Commands::ValidateConfig => Ok(()),
    }
}
