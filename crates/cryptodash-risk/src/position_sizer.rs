//! Position sizing from a risk percentage.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{overflow, reject, RiskError, RiskResult};

const COMPUTATION: &str = "position_size";

/// Sizes positions so that hitting the stop-loss loses a fixed share of the
/// account.
///
/// `risk_amount = balance * risk_percent / 100`,
/// `price_delta = |entry - stop_loss| / entry`,
/// `size = risk_amount / price_delta * leverage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSizer {
    risk_percent: Decimal,
    leverage: Decimal,
}

impl PositionSizer {
    /// Create a sizer risking `risk_percent` of the balance per trade.
    pub fn new(risk_percent: Decimal) -> Self {
        Self {
            risk_percent,
            leverage: Decimal::ONE,
        }
    }

    /// Set the leverage multiplier (default 1).
    pub fn with_leverage(mut self, leverage: Decimal) -> Self {
        self.leverage = leverage;
        self
    }

    pub fn risk_percent(&self) -> Decimal {
        self.risk_percent
    }

    pub fn leverage(&self) -> Decimal {
        self.leverage
    }

    /// Amount of the balance put at risk.
    pub fn risk_amount(&self, balance: Decimal) -> RiskResult<Decimal> {
        if balance < Decimal::ZERO {
            return Err(reject(RiskError::invalid(
                COMPUTATION,
                format!("account balance must not be negative, got {balance}"),
            )));
        }
        if self.risk_percent <= Decimal::ZERO || self.risk_percent > dec!(100) {
            return Err(reject(RiskError::invalid(
                COMPUTATION,
                format!("risk percentage must be in (0, 100], got {}", self.risk_percent),
            )));
        }

        balance
            .checked_mul(self.risk_percent)
            .map(|scaled| scaled / dec!(100))
            .ok_or_else(|| overflow(COMPUTATION, "risk amount"))
    }

    /// Position size (in quote currency) for a trade from `entry` to `stop_loss`.
    pub fn position_size(
        &self,
        balance: Decimal,
        entry: Decimal,
        stop_loss: Decimal,
    ) -> RiskResult<Decimal> {
        let risk_amount = self.risk_amount(balance)?;

        if self.leverage <= Decimal::ZERO {
            return Err(reject(RiskError::invalid(
                COMPUTATION,
                format!("leverage must be positive, got {}", self.leverage),
            )));
        }
        if entry <= Decimal::ZERO {
            return Err(reject(RiskError::degenerate(
                COMPUTATION,
                format!("entry price must be positive, got {entry}"),
            )));
        }
        if entry == stop_loss {
            return Err(reject(RiskError::degenerate(
                COMPUTATION,
                "entry price equals stop-loss price",
            )));
        }

        let price_delta = entry
            .checked_sub(stop_loss)
            .and_then(|distance| distance.abs().checked_div(entry))
            .ok_or_else(|| overflow(COMPUTATION, "price delta"))?;

        risk_amount
            .checked_div(price_delta)
            .and_then(|s| s.checked_mul(self.leverage))
            .ok_or_else(|| overflow(COMPUTATION, "position size"))
    }
}

impl Default for PositionSizer {
    fn default() -> Self {
        Self::new(dec!(1))
    }
}
