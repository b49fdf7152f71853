//! Property tests for the indicator engine.
//!
//! These check relationships that must hold for any well-formed input,
//! independent of specific market data.

use approx::assert_relative_eq;
use cryptodash_core::traits::{Indicator, MultiOutputIndicator, OhlcvIndicator};
use cryptodash_core::types::OhlcvSeries;
use cryptodash_indicators::{BollingerBands, Ema, Ichimoku, Macd, Obv, Rsi, Sma, Stochastic};
use proptest::prelude::*;

fn prices(min_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0f64..100_000.0, min_len..200)
}

fn series_and_period() -> impl Strategy<Value = (Vec<f64>, usize)> {
    prices(1).prop_flat_map(|data| {
        let len = data.len();
        (Just(data), 1..=len)
    })
}

proptest! {
    #[test]
    fn sma_window_means((data, period) in series_and_period()) {
        let result = Sma::new(period).calculate(&data);

        prop_assert_eq!(result.len(), data.len() - period + 1);
        for (i, value) in result.iter().enumerate() {
            let window = &data[i..i + period];
            let mean = window.iter().sum::<f64>() / period as f64;
            assert_relative_eq!(*value, mean, max_relative = 1e-9);
        }
    }

    #[test]
    fn ema_seed_is_sma((data, period) in series_and_period()) {
        let ema = Ema::new(period).calculate(&data);
        let sma = Sma::new(period).calculate(&data[..period]);

        prop_assert_eq!(ema.len(), data.len() - period + 1);
        prop_assert_eq!(ema[0], sma[0]);
    }

    #[test]
    fn rsi_is_bounded(data in prices(2), period in 1usize..30) {
        for value in Rsi::new(period).calculate(&data) {
            prop_assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn bollinger_bands_are_ordered(
        (data, period) in series_and_period(),
        multiplier in 0.0f64..5.0,
    ) {
        let bands = BollingerBands::with_params(period, multiplier).calculate(&data);

        for i in 0..bands.len() {
            prop_assert!(bands.upper[i] >= bands.middle[i]);
            prop_assert!(bands.middle[i] >= bands.lower[i]);
        }
    }

    #[test]
    fn macd_lines_share_length(data in prices(1), fast in 1usize..10, gap in 1usize..10, signal in 1usize..10) {
        let macd = Macd::with_periods(fast, fast + gap, signal).calculate(&data);

        prop_assert_eq!(macd.macd.len(), macd.signal.len());
        prop_assert_eq!(macd.signal.len(), macd.histogram.len());
    }

    #[test]
    fn obv_follows_close_direction(
        start in 1.0f64..1000.0,
        steps in prop::collection::vec(0.01f64..10.0, 1..100),
        volume in 0.0f64..1e6,
    ) {
        let rising: Vec<f64> = steps
            .iter()
            .scan(start, |price, step| {
                *price += step;
                Some(*price)
            })
            .collect();
        let falling: Vec<f64> = rising.iter().rev().copied().collect();
        let volumes = vec![volume; rising.len()];

        let up = Obv::new().calculate_cv(&rising, &volumes).unwrap();
        let down = Obv::new().calculate_cv(&falling, &volumes).unwrap();

        prop_assert_eq!(up.len(), rising.len());
        for pair in up.windows(2) {
            prop_assert!(pair[1] >= pair[0]);
        }
        for pair in down.windows(2) {
            prop_assert!(pair[1] <= pair[0]);
        }
    }

    #[test]
    fn stochastic_is_bounded(close in prices(1), spread in 0.0f64..50.0) {
        let high: Vec<f64> = close.iter().map(|c| c + spread).collect();
        let low: Vec<f64> = close.iter().map(|c| c - spread).collect();

        let stoch = Stochastic::with_periods(5, 3, 3)
            .calculate_hlc(&high, &low, &close)
            .unwrap();

        for value in stoch.k.iter().chain(&stoch.d) {
            prop_assert!(value.is_finite());
            prop_assert!(*value >= -1e-9 && *value <= 100.0 + 1e-9);
        }
    }

    #[test]
    fn indicators_are_idempotent(close in prices(60)) {
        let high: Vec<f64> = close.iter().map(|c| c * 1.01).collect();
        let low: Vec<f64> = close.iter().map(|c| c * 0.99).collect();
        let series = OhlcvSeries::from_hlc(high, low, close.clone()).unwrap();

        prop_assert_eq!(Rsi::default().calculate(&close), Rsi::default().calculate(&close));
        prop_assert_eq!(Macd::new().calculate(&close), Macd::new().calculate(&close));
        prop_assert_eq!(
            Ichimoku::new().calculate(&series).unwrap(),
            Ichimoku::new().calculate(&series).unwrap()
        );
    }
}

#[test]
fn sma_documented_example() {
    assert_eq!(Sma::new(3).calculate(&[1.0, 2.0, 3.0, 4.0, 5.0]), vec![2.0, 3.0, 4.0]);
}
