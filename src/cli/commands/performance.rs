//! Performance command implementation.

use anyhow::Result;
use cryptodash_config::AppConfig;
use cryptodash_risk::PerformanceSummary;

use super::{close_returns, load_series, print_json};
use crate::cli::{OutputFormat, PerformanceArgs};

fn fmt_ratio(value: f64) -> String {
    if value.is_infinite() {
        "inf".to_string()
    } else {
        format!("{value:.4}")
    }
}

pub fn run(args: PerformanceArgs, config: &AppConfig) -> Result<()> {
    let series = load_series(&args.data)?;
    let closes = series.closes();
    let returns = close_returns(closes);

    let portfolio_value = args
        .portfolio_value
        .or_else(|| closes.last().copied())
        .unwrap_or(1.0);
    let perf_config = config.risk.performance_config(portfolio_value);

    let summary = PerformanceSummary::compute(&returns, closes, &perf_config)?;

    match args.output {
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Text => {
            println!("Periods:        {}", returns.len());
            println!("Mean return:    {:.6}", summary.mean_return);
            println!("Volatility:     {:.6}", summary.volatility);
            println!(
                "VaR ({}%):      {:.2}",
                perf_config.var_confidence, summary.value_at_risk
            );
            println!("Sharpe:         {}", fmt_ratio(summary.sharpe_ratio));
            println!("Sortino:        {}", fmt_ratio(summary.sortino_ratio));
            println!("Max drawdown:   {:.2}%", summary.max_drawdown_pct);
            println!("Calmar:         {}", fmt_ratio(summary.calmar_ratio));
            Ok(())
        }
    }
}
