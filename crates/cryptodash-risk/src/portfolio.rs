//! Aggregate risk across open positions.

use cryptodash_core::error::ensure_same_length;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{overflow, reject, RiskError, RiskResult};

/// Share of the account balance, in percent, lost if every open position
/// hits its stop.
///
/// Each position contributes `size * stop_distance_pct / 100`; the sum is
/// divided by `balance` and expressed as a percentage.
pub fn aggregate_portfolio_risk(
    position_sizes: &[Decimal],
    stop_distances_pct: &[Decimal],
    balance: Decimal,
) -> RiskResult<Decimal> {
    const COMPUTATION: &str = "aggregate_portfolio_risk";

    ensure_same_length(&[
        ("position sizes", position_sizes.len()),
        ("stop distances", stop_distances_pct.len()),
    ])
    .map_err(|reason| {
        reject(RiskError::ShapeMismatch {
            computation: COMPUTATION,
            reason,
        })
    })?;

    if balance <= Decimal::ZERO {
        return Err(reject(RiskError::degenerate(
            COMPUTATION,
            format!("account balance must be positive, got {balance}"),
        )));
    }

    let at_risk = position_sizes
        .iter()
        .zip(stop_distances_pct)
        .try_fold(Decimal::ZERO, |total, (size, distance)| {
            size.checked_mul(*distance)
                .and_then(|loss| total.checked_add(loss / dec!(100)))
        })
        .ok_or_else(|| overflow(COMPUTATION, "amount at risk"))?;

    at_risk
        .checked_div(balance)
        .and_then(|share| share.checked_mul(dec!(100)))
        .ok_or_else(|| overflow(COMPUTATION, "portfolio risk"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_risk() {
        // 5000 * 2% + 2000 * 5% = 200 at risk on 10000
        let risk = aggregate_portfolio_risk(
            &[dec!(5000), dec!(2000)],
            &[dec!(2), dec!(5)],
            dec!(10000),
        )
        .unwrap();

        assert_eq!(risk, dec!(2));
    }

    #[test]
    fn test_no_positions_means_no_risk() {
        assert_eq!(
            aggregate_portfolio_risk(&[], &[], dec!(10000)).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_shape_mismatch() {
        let err = aggregate_portfolio_risk(&[dec!(1)], &[], dec!(10000)).unwrap_err();
        assert!(matches!(err, RiskError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_overflow_is_rejected() {
        let oversized = aggregate_portfolio_risk(&[Decimal::MAX], &[dec!(50)], dec!(10000));
        let tiny_balance =
            aggregate_portfolio_risk(&[dec!(1000000)], &[dec!(100)], Decimal::new(1, 28));

        assert!(matches!(oversized, Err(RiskError::DegenerateInput { .. })));
        assert!(matches!(tiny_balance, Err(RiskError::DegenerateInput { .. })));
    }

    #[test]
    fn test_zero_balance() {
        let err = aggregate_portfolio_risk(&[dec!(1)], &[dec!(1)], dec!(0)).unwrap_err();
        assert!(matches!(err, RiskError::DegenerateInput { .. }));
    }
}
