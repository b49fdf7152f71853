//! Risk engine.
//!
//! Trade-level calculations (position sizing, stop-loss and take-profit
//! levels, break-even win rate, aggregate portfolio risk) work in
//! [`rust_decimal::Decimal`]. Series statistics (VaR, Sharpe, Sortino,
//! drawdown, Calmar, correlation) work in `f64`.
//!
//! Invalid parameter combinations are reported as [`RiskError`] values that
//! name the rejecting computation; nothing here returns a silent `NaN`.

mod correlation;
mod exit_levels;
mod performance;
mod portfolio;
mod position_sizer;
mod risk_manager;

pub use correlation::CorrelationMatrix;
pub use exit_levels::{required_win_rate, stop_loss_price, take_profit_price};
pub use performance::{
    calmar_ratio, historical_var, max_drawdown, sharpe_ratio, sortino_ratio, PerformanceConfig,
    PerformanceSummary,
};
pub use portfolio::aggregate_portfolio_risk;
pub use position_sizer::PositionSizer;
pub use risk_manager::{RiskParameters, TradeAssessment};

pub use cryptodash_core::error::{RiskError, RiskResult};

/// Log a rejected input before handing the error back to the caller.
pub(crate) fn reject(err: RiskError) -> RiskError {
    tracing::debug!(computation = err.computation(), error = %err, "risk input rejected");
    err
}

/// Decimal arithmetic left the representable range.
pub(crate) fn overflow(computation: &'static str, quantity: &str) -> RiskError {
    reject(RiskError::degenerate(
        computation,
        format!("{quantity} overflows"),
    ))
}
