//! Trade and portfolio risk commands.

use anyhow::Result;
use cryptodash_config::AppConfig;
use cryptodash_core::types::TradeDirection;
use cryptodash_risk::{aggregate_portfolio_risk, RiskParameters, TradeAssessment};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use super::print_json;
use crate::cli::{OutputFormat, PortfolioArgs, RiskArgs};

/// Parse `SIZE:STOP_DISTANCE_PCT`.
pub fn parse_position(value: &str) -> Result<(Decimal, Decimal), String> {
    let (size, distance) = value
        .split_once(':')
        .ok_or_else(|| format!("expected SIZE:STOP_DISTANCE_PCT, got `{value}`"))?;

    let size = size
        .trim()
        .parse::<Decimal>()
        .map_err(|e| format!("invalid position size `{size}`: {e}"))?;
    let distance = distance
        .trim()
        .parse::<Decimal>()
        .map_err(|e| format!("invalid stop distance `{distance}`: {e}"))?;

    Ok((size, distance))
}

#[derive(Debug, Serialize)]
struct RiskReport {
    #[serde(flatten)]
    params: RiskParameters,
    #[serde(flatten)]
    assessment: TradeAssessment,
}

fn parameters(args: &RiskArgs, config: &AppConfig) -> RiskParameters {
    RiskParameters {
        account_balance: args.balance,
        entry_price: args.entry,
        stop_loss_price: args.stop_loss,
        risk_percentage: args.risk_pct.unwrap_or(config.risk.risk_percent),
        leverage: args.leverage.unwrap_or(config.risk.leverage),
        risk_reward_ratio: args.rr.unwrap_or(config.risk.risk_reward_ratio),
        direction: TradeDirection::from_is_long(!args.short),
    }
}

pub fn run(args: RiskArgs, config: &AppConfig) -> Result<()> {
    let params = parameters(&args, config);
    let assessment = params.assess()?;
    let currency = &config.app.quote_currency;

    match args.output {
        OutputFormat::Json => print_json(&RiskReport { params, assessment }),
        OutputFormat::Text => {
            println!("Direction:          {}", params.direction);
            println!("Risk amount:        {} {currency}", assessment.risk_amount.round_dp(2));
            println!("Position size:      {} {currency}", assessment.position_size.round_dp(2));
            println!("Take profit:        {}", assessment.take_profit_price.round_dp(8));
            println!("Potential profit:   {} {currency}", assessment.potential_profit.round_dp(2));
            println!("Required win rate:  {}%", assessment.required_win_rate.round_dp(2));
            Ok(())
        }
    }
}

pub fn run_portfolio(args: PortfolioArgs) -> Result<()> {
    let (sizes, distances): (Vec<Decimal>, Vec<Decimal>) = args.positions.into_iter().unzip();
    let risk = aggregate_portfolio_risk(&sizes, &distances, args.balance)?;

    info!(positions = sizes.len(), %risk, "portfolio risk computed");
    println!("Portfolio risk: {}% of balance", risk.round_dp(4));
    Ok(())
}
