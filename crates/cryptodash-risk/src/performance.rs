//! Return-series and equity-curve statistics.

use cryptodash_indicators::simd::{mean_simd, population_std_dev, sum_sq_dev_simd};
use serde::{Deserialize, Serialize};

use crate::{reject, RiskError, RiskResult};

fn require_returns(computation: &'static str, returns: &[f64]) -> RiskResult<f64> {
    mean_simd(returns)
        .ok_or_else(|| reject(RiskError::degenerate(computation, "return series is empty")))
}

/// Historical Value-at-Risk.
///
/// Sorts the returns ascending and takes the return at index
/// `floor((100 - confidence) / 100 * n)` (clamped to the last element). The
/// result is its absolute value scaled by `portfolio_value`.
pub fn historical_var(returns: &[f64], confidence: f64, portfolio_value: f64) -> RiskResult<f64> {
    const COMPUTATION: &str = "historical_var";

    if returns.is_empty() {
        return Err(reject(RiskError::degenerate(
            COMPUTATION,
            "return series is empty",
        )));
    }
    if !(confidence > 0.0 && confidence < 100.0) {
        return Err(reject(RiskError::invalid(
            COMPUTATION,
            format!("confidence must be in (0, 100), got {confidence}"),
        )));
    }
    if portfolio_value < 0.0 {
        return Err(reject(RiskError::invalid(
            COMPUTATION,
            format!("portfolio value must not be negative, got {portfolio_value}"),
        )));
    }

    let mut sorted = returns.to_vec();
    sorted.sort_by(f64::total_cmp);

    let index = ((100.0 - confidence) / 100.0 * sorted.len() as f64).floor() as usize;
    let index = index.min(sorted.len() - 1);

    Ok(sorted[index].abs() * portfolio_value)
}

/// Sharpe ratio: `(mean(returns) - risk_free_rate) / stddev(returns)`.
///
/// Uses the population standard deviation. Returns are per period and the
/// risk-free rate must be expressed for the same period.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> RiskResult<f64> {
    const COMPUTATION: &str = "sharpe_ratio";

    let mean = require_returns(COMPUTATION, returns)?;
    let std_dev = (sum_sq_dev_simd(returns, mean) / returns.len() as f64).sqrt();

    if std_dev == 0.0 {
        return Err(reject(RiskError::degenerate(
            COMPUTATION,
            "returns have zero standard deviation",
        )));
    }

    Ok((mean - risk_free_rate) / std_dev)
}

/// Sortino ratio: excess return over the downside deviation.
///
/// Only returns strictly below `target` (default: the risk-free rate)
/// contribute to the deviation, which is averaged over those returns alone.
/// With no such returns the ratio is `f64::INFINITY`.
pub fn sortino_ratio(returns: &[f64], risk_free_rate: f64, target: Option<f64>) -> RiskResult<f64> {
    const COMPUTATION: &str = "sortino_ratio";

    let mean = require_returns(COMPUTATION, returns)?;
    let target = target.unwrap_or(risk_free_rate);

    let downside: Vec<f64> = returns
        .iter()
        .filter(|&&r| r < target)
        .map(|r| r - target)
        .collect();

    if downside.is_empty() {
        return Ok(f64::INFINITY);
    }

    let downside_dev = (sum_sq_dev_simd(&downside, 0.0) / downside.len() as f64).sqrt();
    if downside_dev == 0.0 {
        return Ok(f64::INFINITY);
    }

    Ok((mean - risk_free_rate) / downside_dev)
}

/// Maximum peak-to-trough decline of a value series, in percent.
///
/// Series with one value or none have no drawdown.
pub fn max_drawdown(values: &[f64]) -> RiskResult<f64> {
    const COMPUTATION: &str = "max_drawdown";

    if values.len() <= 1 {
        return Ok(0.0);
    }

    let mut peak = values[0];
    let mut max_dd: f64 = 0.0;

    for &value in values {
        if value > peak {
            peak = value;
        }
        if peak <= 0.0 {
            return Err(reject(RiskError::degenerate(
                COMPUTATION,
                format!("running peak must be positive, got {peak}"),
            )));
        }
        max_dd = max_dd.max((peak - value) / peak);
    }

    Ok(max_dd * 100.0)
}

/// Calmar ratio: annualised mean return over the maximum drawdown fraction.
///
/// The annual return is `mean(returns) * periods_per_year`. A series without
/// drawdown yields `f64::INFINITY`.
pub fn calmar_ratio(returns: &[f64], values: &[f64], periods_per_year: f64) -> RiskResult<f64> {
    const COMPUTATION: &str = "calmar_ratio";

    let mean = require_returns(COMPUTATION, returns)?;
    if periods_per_year <= 0.0 {
        return Err(reject(RiskError::invalid(
            COMPUTATION,
            format!("periods per year must be positive, got {periods_per_year}"),
        )));
    }

    let drawdown = max_drawdown(values)? / 100.0;
    if drawdown == 0.0 {
        return Ok(f64::INFINITY);
    }

    Ok(mean * periods_per_year / drawdown)
}

/// Settings shared by the statistics in [`PerformanceSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Risk-free rate per period
    pub risk_free_rate: f64,
    /// VaR confidence level in percent
    pub var_confidence: f64,
    /// Portfolio value used to scale VaR
    pub portfolio_value: f64,
    /// Periods per year for the Calmar ratio
    pub periods_per_year: f64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.0,
            var_confidence: 95.0,
            portfolio_value: 1.0,
            periods_per_year: 365.0,
        }
    }
}

/// All return-series statistics for one equity curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub mean_return: f64,
    pub volatility: f64,
    pub value_at_risk: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub max_drawdown_pct: f64,
    pub calmar_ratio: f64,
}

impl PerformanceSummary {
    /// Compute every statistic from a return series and the matching values.
    pub fn compute(
        returns: &[f64],
        values: &[f64],
        config: &PerformanceConfig,
    ) -> RiskResult<Self> {
        let mean_return = require_returns("performance_summary", returns)?;
        let volatility = population_std_dev(returns).unwrap_or(0.0);

        Ok(Self {
            mean_return,
            volatility,
            value_at_risk: historical_var(returns, config.var_confidence, config.portfolio_value)?,
            sharpe_ratio: sharpe_ratio(returns, config.risk_free_rate)?,
            sortino_ratio: sortino_ratio(returns, config.risk_free_rate, None)?,
            max_drawdown_pct: max_drawdown(values)?,
            calmar_ratio: calmar_ratio(returns, values, config.periods_per_year)?,
        })
    }
}
