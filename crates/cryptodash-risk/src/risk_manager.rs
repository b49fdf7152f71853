//! Single-trade risk assessment.

use cryptodash_core::types::TradeDirection;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{overflow, required_win_rate, take_profit_price, PositionSizer, RiskResult};

/// Inputs describing one prospective trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskParameters {
    /// Account balance in quote currency
    pub account_balance: Decimal,
    pub entry_price: Decimal,
    pub stop_loss_price: Decimal,
    /// Percent of the balance put at risk
    pub risk_percentage: Decimal,
    pub leverage: Decimal,
    /// Reward multiple of the stop distance
    pub risk_reward_ratio: Decimal,
    #[serde(default)]
    pub direction: TradeDirection,
}

impl Default for RiskParameters {
    fn default() -> Self {
        Self {
            account_balance: Decimal::ZERO,
            entry_price: Decimal::ZERO,
            stop_loss_price: Decimal::ZERO,
            risk_percentage: dec!(1),
            leverage: Decimal::ONE,
            risk_reward_ratio: dec!(2),
            direction: TradeDirection::Long,
        }
    }
}

/// Result of [`RiskParameters::assess`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeAssessment {
    pub risk_amount: Decimal,
    pub position_size: Decimal,
    pub take_profit_price: Decimal,
    /// Break-even win rate in percent
    pub required_win_rate: Decimal,
    /// Reward if the take-profit is hit: `risk_amount * risk_reward_ratio`
    pub potential_profit: Decimal,
}

impl RiskParameters {
    /// Size the trade and derive its exit levels.
    pub fn assess(&self) -> RiskResult<TradeAssessment> {
        let sizer = PositionSizer::new(self.risk_percentage).with_leverage(self.leverage);

        let risk_amount = sizer.risk_amount(self.account_balance)?;
        let position_size =
            sizer.position_size(self.account_balance, self.entry_price, self.stop_loss_price)?;
        let take_profit_price = take_profit_price(
            self.entry_price,
            self.stop_loss_price,
            self.risk_reward_ratio,
            self.direction,
        )?;
        let required_win_rate = required_win_rate(self.risk_reward_ratio)?;
        let potential_profit = risk_amount
            .checked_mul(self.risk_reward_ratio)
            .ok_or_else(|| overflow("trade_assessment", "potential profit"))?;

        tracing::debug!(
            %risk_amount,
            %position_size,
            %take_profit_price,
            direction = %self.direction,
            "trade assessed"
        );

        Ok(TradeAssessment {
            risk_amount,
            position_size,
            take_profit_price,
            required_win_rate,
            potential_profit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RiskError;

    fn long_trade() -> RiskParameters {
        RiskParameters {
            account_balance: dec!(10000),
            entry_price: dec!(50000),
            stop_loss_price: dec!(49000),
            ..Default::default()
        }
    }

    #[test]
    fn test_assess_long() {
        let assessment = long_trade().assess().unwrap();

        assert_eq!(assessment.risk_amount, dec!(100));
        assert_eq!(assessment.position_size, dec!(5000));
        assert_eq!(assessment.take_profit_price, dec!(52000));
        assert_eq!(assessment.potential_profit, dec!(200));
        assert!((assessment.required_win_rate - dec!(33.333333)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_assess_short_with_leverage() {
        let params = RiskParameters {
            stop_loss_price: dec!(51000),
            leverage: dec!(3),
            direction: TradeDirection::Short,
            ..long_trade()
        };
        let assessment = params.assess().unwrap();

        assert_eq!(assessment.position_size, dec!(15000));
        assert_eq!(assessment.take_profit_price, dec!(48000));
    }

    #[test]
    fn test_assess_rejects_flat_stop() {
        let params = RiskParameters {
            stop_loss_price: dec!(50000),
            ..long_trade()
        };
        let err = params.assess().unwrap_err();

        assert!(matches!(err, RiskError::DegenerateInput { .. }));
    }

    #[test]
    fn test_assess_rejects_overflowing_profit() {
        // size (2 * risk) and take-profit (501) fit, risk * 1000 does not
        let params = RiskParameters {
            account_balance: Decimal::MAX / dec!(200),
            entry_price: dec!(1),
            stop_loss_price: dec!(0.5),
            risk_percentage: dec!(100),
            risk_reward_ratio: dec!(1000),
            ..Default::default()
        };
        let err = params.assess().unwrap_err();

        assert!(err.to_string().contains("potential profit overflows"));
    }

    #[test]
    fn test_deserialize_defaults_direction() {
        let json = r#"{
            "account_balance": "1000",
            "entry_price": "10",
            "stop_loss_price": "9",
            "risk_percentage": "2",
            "leverage": "1",
            "risk_reward_ratio": "1"
        }"#;
        let params: RiskParameters = serde_json::from_str(json).unwrap();

        assert_eq!(params.direction, TradeDirection::Long);
        assert_eq!(params.assess().unwrap().required_win_rate, dec!(50));
    }
}
