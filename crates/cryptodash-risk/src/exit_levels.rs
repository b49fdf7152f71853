//! Stop-loss and take-profit levels.

use cryptodash_core::types::TradeDirection;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{overflow, reject, RiskError, RiskResult};

/// Back-solve the stop-loss price that loses `risk_amount` on a position of
/// `position_size`.
///
/// The fractional price move is `risk_amount / position_size`; the stop sits
/// that far below the entry for a long and above it for a short. This is the
/// inverse of [`crate::PositionSizer::position_size`] at leverage 1.
pub fn stop_loss_price(
    entry: Decimal,
    position_size: Decimal,
    risk_amount: Decimal,
    direction: TradeDirection,
) -> RiskResult<Decimal> {
    const COMPUTATION: &str = "stop_loss_price";

    if position_size <= Decimal::ZERO {
        return Err(reject(RiskError::degenerate(
            COMPUTATION,
            format!("position size must be positive, got {position_size}"),
        )));
    }
    if risk_amount <= Decimal::ZERO {
        return Err(reject(RiskError::degenerate(
            COMPUTATION,
            format!("risk amount must be positive, got {risk_amount}"),
        )));
    }
    if entry <= Decimal::ZERO {
        return Err(reject(RiskError::invalid(
            COMPUTATION,
            format!("entry price must be positive, got {entry}"),
        )));
    }

    let stop = risk_amount
        .checked_div(position_size)
        .and_then(|price_delta| entry.checked_mul(price_delta))
        .and_then(|offset| entry.checked_sub(direction.sign() * offset))
        .ok_or_else(|| overflow(COMPUTATION, "stop-loss price"))?;

    if stop <= Decimal::ZERO {
        return Err(reject(RiskError::degenerate(
            COMPUTATION,
            format!("risk amount {risk_amount} exceeds the whole position {position_size}"),
        )));
    }

    Ok(stop)
}

/// Target price `risk_reward_ratio` times the stop distance away from entry,
/// in the profitable direction.
pub fn take_profit_price(
    entry: Decimal,
    stop_loss: Decimal,
    risk_reward_ratio: Decimal,
    direction: TradeDirection,
) -> RiskResult<Decimal> {
    const COMPUTATION: &str = "take_profit_price";

    if risk_reward_ratio < Decimal::ZERO {
        return Err(reject(RiskError::invalid(
            COMPUTATION,
            format!("risk-reward ratio must not be negative, got {risk_reward_ratio}"),
        )));
    }
    if entry == stop_loss {
        return Err(reject(RiskError::degenerate(
            COMPUTATION,
            "entry price equals stop-loss price",
        )));
    }

    entry
        .checked_sub(stop_loss)
        .and_then(|distance| distance.abs().checked_mul(risk_reward_ratio))
        .and_then(|reward| entry.checked_add(direction.sign() * reward))
        .ok_or_else(|| overflow(COMPUTATION, "take-profit price"))
}

/// Break-even win rate in percent for a reward:risk ratio: `100 / (1 + rr)`.
pub fn required_win_rate(risk_reward_ratio: Decimal) -> RiskResult<Decimal> {
    if risk_reward_ratio < Decimal::ZERO {
        return Err(reject(RiskError::invalid(
            "required_win_rate",
            format!("risk-reward ratio must not be negative, got {risk_reward_ratio}"),
        )));
    }

    Decimal::ONE
        .checked_add(risk_reward_ratio)
        .map(|denominator| dec!(100) / denominator)
        .ok_or_else(|| overflow("required_win_rate", "risk-reward ratio"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_profit_long() {
        let target =
            take_profit_price(dec!(50000), dec!(49000), dec!(2), TradeDirection::Long).unwrap();
        assert_eq!(target, dec!(52000));
    }

    #[test]
    fn test_take_profit_short() {
        let target =
            take_profit_price(dec!(50000), dec!(51000), dec!(2), TradeDirection::Short).unwrap();
        assert_eq!(target, dec!(48000));
    }

    #[test]
    fn test_take_profit_rejects_zero_distance() {
        assert!(take_profit_price(dec!(100), dec!(100), dec!(2), TradeDirection::Long).is_err());
    }

    #[test]
    fn test_stop_loss_round_trip() {
        // Position of 5000 risking 100 -> 2% move
        let long = stop_loss_price(dec!(50000), dec!(5000), dec!(100), TradeDirection::Long);
        let short = stop_loss_price(dec!(50000), dec!(5000), dec!(100), TradeDirection::Short);

        assert_eq!(long.unwrap(), dec!(49000));
        assert_eq!(short.unwrap(), dec!(51000));
    }

    #[test]
    fn test_stop_loss_rejects_non_positive_inputs() {
        let zero_size = stop_loss_price(dec!(100), dec!(0), dec!(10), TradeDirection::Long);
        let zero_risk = stop_loss_price(dec!(100), dec!(1000), dec!(0), TradeDirection::Long);

        assert!(matches!(zero_size, Err(RiskError::DegenerateInput { .. })));
        assert!(matches!(zero_risk, Err(RiskError::DegenerateInput { .. })));
    }

    #[test]
    fn test_stop_loss_cannot_cross_zero() {
        let result = stop_loss_price(dec!(100), dec!(50), dec!(60), TradeDirection::Long);
        assert!(result.is_err());
    }

    #[test]
    fn test_overflowing_levels_are_rejected() {
        let stop = stop_loss_price(Decimal::MAX, Decimal::new(1, 10), dec!(1), TradeDirection::Long);
        let target = take_profit_price(dec!(100), dec!(90), Decimal::MAX, TradeDirection::Long);

        assert!(matches!(stop, Err(RiskError::DegenerateInput { .. })));
        assert!(matches!(target, Err(RiskError::DegenerateInput { .. })));
    }

    #[test]
    fn test_required_win_rate_at_max_ratio() {
        let err = required_win_rate(Decimal::MAX).unwrap_err();
        assert_eq!(err.computation(), "required_win_rate");
    }

    #[test]
    fn test_required_win_rate() {
        assert_eq!(required_win_rate(dec!(1)).unwrap(), dec!(50));
        assert_eq!(required_win_rate(dec!(3)).unwrap(), dec!(25));
        assert_eq!(required_win_rate(dec!(0)).unwrap(), dec!(100));
        assert!(required_win_rate(dec!(-0.5)).is_err());
    }
}
