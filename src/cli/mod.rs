//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cryptodash")]
#[command(author, version, about = "Technical indicators and risk analytics for crypto markets")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CRYPTODASH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (overrides the configuration file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the latest technical indicators for a price history
    Indicators(IndicatorsArgs),
    /// Size a single trade and derive its exit levels
    Risk(RiskArgs),
    /// Aggregate risk across open positions
    Portfolio(PortfolioArgs),
    /// Return statistics for a price history
    Performance(PerformanceArgs),
    /// Correlation matrix of several price histories
    Correlation(CorrelationArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct IndicatorsArgs {
    /// Data file (CSV)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct RiskArgs {
    /// Account balance in quote currency
    #[arg(long)]
    pub balance: Decimal,

    /// Entry price
    #[arg(long)]
    pub entry: Decimal,

    /// Stop-loss price
    #[arg(long)]
    pub stop_loss: Decimal,

    /// Percent of the balance to risk
    #[arg(long)]
    pub risk_pct: Option<Decimal>,

    /// Leverage multiplier
    #[arg(long)]
    pub leverage: Option<Decimal>,

    /// Reward:risk ratio for the take-profit
    #[arg(long)]
    pub rr: Option<Decimal>,

    /// Short trade (default is long)
    #[arg(long)]
    pub short: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct PortfolioArgs {
    /// Account balance in quote currency
    #[arg(long)]
    pub balance: Decimal,

    /// Open position as SIZE:STOP_DISTANCE_PCT (repeatable)
    #[arg(short, long = "position", value_parser = commands::risk::parse_position)]
    pub positions: Vec<(Decimal, Decimal)>,
}

#[derive(clap::Args)]
pub struct PerformanceArgs {
    /// Data file (CSV)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Portfolio value for VaR (defaults to the last close)
    #[arg(long)]
    pub portfolio_value: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct CorrelationArgs {
    /// Data files (CSV), one per asset
    #[arg(short, long, num_args = 2.., required = true)]
    pub data: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub output: OutputFormat,
}
