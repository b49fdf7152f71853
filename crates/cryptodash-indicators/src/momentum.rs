//! Momentum indicators.

use cryptodash_core::error::{ensure_same_length, IndicatorError};
use cryptodash_core::traits::{Indicator, MultiOutputIndicator, OhlcvIndicator};
use cryptodash_core::types::OhlcvSeries;
use serde::{Deserialize, Serialize};

use crate::moving_average::{wilder_smooth, Ema, Sma};
use crate::simd::minmax_simd;

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
///
/// When the smoothed average loss is zero the ratio is unbounded and the
/// value saturates at 100.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    fn value(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
        }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        let mut gains = Vec::with_capacity(data.len() - 1);
        let mut losses = Vec::with_capacity(data.len() - 1);

        for pair in data.windows(2) {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else if change < 0.0 {
                gains.push(0.0);
                losses.push(-change);
            } else {
                gains.push(0.0);
                losses.push(0.0);
            }
        }

        let avg_gains = wilder_smooth(&gains, self.period);
        let avg_losses = wilder_smooth(&losses, self.period);

        avg_gains
            .iter()
            .zip(avg_losses.iter())
            .map(|(&gain, &loss)| Self::value(gain, loss))
            .collect()
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 prices for period deltas
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD output: three parallel sequences of equal length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdSeries {
    /// MACD line (fast EMA - slow EMA)
    pub macd: Vec<f64>,
    /// Signal line (EMA of MACD)
    pub signal: Vec<f64>,
    /// Histogram (MACD - Signal)
    pub histogram: Vec<f64>,
}

impl MacdSeries {
    /// Number of aligned points in each line.
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    /// True when the input was too short for a first value.
    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }
}

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum.
#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(
            fast > 0 && slow > 0 && signal > 0,
            "Period must be greater than 0"
        );
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdSeries;

    fn calculate(&self, data: &[f64]) -> MacdSeries {
        let fast_ema = Ema::new(self.fast_period).calculate(data);
        let slow_ema = Ema::new(self.slow_period).calculate(data);

        if slow_ema.is_empty() {
            return MacdSeries::default();
        }

        // The fast EMA starts earlier; keep only its tail that overlaps the slow one.
        let fast_tail = &fast_ema[fast_ema.len() - slow_ema.len()..];

        let macd_line: Vec<f64> = fast_tail
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect();

        let signal = Ema::new(self.signal_period).calculate(&macd_line);
        if signal.is_empty() {
            return MacdSeries::default();
        }

        let macd = macd_line[macd_line.len() - signal.len()..].to_vec();
        let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

        MacdSeries {
            macd,
            signal,
            histogram,
        }
    }

    fn period(&self) -> usize {
        self.slow_period + self.signal_period - 1
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

/// Stochastic oscillator output, aligned on the common tail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StochasticSeries {
    /// %K (smoothed)
    pub k: Vec<f64>,
    /// %D (SMA of %K)
    pub d: Vec<f64>,
}

/// Stochastic oscillator.
///
/// Compares the close to the high/low range over a period. A window whose
/// high equals its low has no range; its raw %K is pinned to 50.
#[derive(Debug, Clone)]
pub struct Stochastic {
    k_period: usize,
    smooth_k: usize,
    smooth_d: usize,
}

impl Stochastic {
    /// Create a new stochastic oscillator with default parameters (14, 3, 3).
    pub fn new() -> Self {
        Self::with_periods(14, 3, 3)
    }

    /// Create with custom periods.
    pub fn with_periods(k_period: usize, smooth_k: usize, smooth_d: usize) -> Self {
        assert!(
            k_period > 0 && smooth_k > 0 && smooth_d > 0,
            "Period must be greater than 0"
        );
        Self {
            k_period,
            smooth_k,
            smooth_d,
        }
    }

    /// Calculate the stochastic from high/low/close columns.
    pub fn calculate_hlc(
        &self,
        high: &[f64],
        low: &[f64],
        close: &[f64],
    ) -> Result<StochasticSeries, IndicatorError> {
        ensure_same_length(&[
            ("high", high.len()),
            ("low", low.len()),
            ("close", close.len()),
        ])
        .map_err(IndicatorError::ShapeMismatch)?;

        if close.len() < self.k_period {
            return Ok(StochasticSeries::default());
        }

        let raw_k: Vec<f64> = (self.k_period - 1..close.len())
            .map(|i| {
                let start = i + 1 - self.k_period;
                let highest = minmax_simd(&high[start..=i]).map_or(f64::NAN, |(_, max)| max);
                let lowest = minmax_simd(&low[start..=i]).map_or(f64::NAN, |(min, _)| min);

                let range = highest - lowest;
                if range == 0.0 {
                    50.0
                } else {
                    (close[i] - lowest) / range * 100.0
                }
            })
            .collect();

        let k = Sma::new(self.smooth_k).calculate(&raw_k);
        let d = Sma::new(self.smooth_d).calculate(&k);
        if d.is_empty() {
            return Ok(StochasticSeries::default());
        }

        let k = k[k.len() - d.len()..].to_vec();
        Ok(StochasticSeries { k, d })
    }
}

impl Default for Stochastic {
    fn default() -> Self {
        Self::new()
    }
}

impl OhlcvIndicator for Stochastic {
    type Output = StochasticSeries;

    fn calculate(&self, series: &OhlcvSeries) -> Result<StochasticSeries, IndicatorError> {
        self.calculate_hlc(series.highs(), series.lows(), series.closes())
    }

    fn period(&self) -> usize {
        self.k_period + self.smooth_k + self.smooth_d - 2
    }

    fn name(&self) -> &str {
        "Stochastic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_bounds() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
            .collect();

        let result = rsi.calculate(&data);
        assert_eq!(result.len(), data.len() - 14);

        for value in &result {
            assert!(*value >= 0.0 && *value <= 100.0);
        }
    }

    #[test]
    fn test_rsi_all_gains_saturates() {
        let rsi = Rsi::new(5);
        let result = rsi.calculate(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|v| (*v - 100.0).abs() < 1e-10));
    }

    #[test]
    fn test_rsi_all_losses() {
        let rsi = Rsi::new(5);
        let result = rsi.calculate(&[7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);

        assert!(!result.is_empty());
        assert!(result[0].abs() < 1e-10);
    }

    #[test]
    fn test_rsi_known_value() {
        // deltas: +2, -1, +2, -1 -> avg gain 1.0, avg loss 0.5 over 4
        let rsi = Rsi::new(4);
        let result = rsi.calculate(&[10.0, 12.0, 11.0, 13.0, 12.0]);

        assert_eq!(result.len(), 1);
        // RS = 2, RSI = 100 - 100/3
        assert!((result[0] - (100.0 - 100.0 / 3.0)).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_flat_series_is_not_nan() {
        let result = Rsi::new(3).calculate(&[5.0; 6]);
        assert!(result.iter().all(|v| *v == 100.0));
    }

    #[test]
    fn test_rsi_insufficient_data() {
        assert!(Rsi::new(5).calculate(&[1.0, 2.0, 3.0, 4.0, 5.0]).is_empty());
    }

    #[test]
    fn test_macd_uptrend() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let result = macd.calculate(&data);

        assert!(!result.is_empty());
        // 50 - 26 + 1 = 25 MACD points, 25 - 9 + 1 = 17 signal points
        assert_eq!(result.len(), 17);
        assert_eq!(result.macd.len(), 17);
        assert_eq!(result.signal.len(), 17);
        assert_eq!(result.histogram.len(), 17);
        assert!(result.macd.iter().all(|m| *m > 0.0));
    }

    #[test]
    fn test_macd_histogram_is_difference() {
        let macd = Macd::with_periods(3, 6, 4);
        let data: Vec<f64> = (0..30)
            .map(|i| 50.0 + (i as f64 * 0.7).sin() * 3.0)
            .collect();
        let result = macd.calculate(&data);

        for i in 0..result.len() {
            let expected = result.macd[i] - result.signal[i];
            assert!((result.histogram[i] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_macd_minimum_length() {
        let macd = Macd::with_periods(2, 4, 3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

        assert_eq!(macd.period(), 6);
        assert_eq!(macd.calculate(&data).len(), 1);
        assert!(macd.calculate(&data[..5]).is_empty());
    }

    #[test]
    fn test_stochastic_bounds() {
        let stoch = Stochastic::new();
        let high: Vec<f64> = (0..30).map(|i| 105.0 + i as f64).collect();
        let low: Vec<f64> = (0..30).map(|i| 95.0 + i as f64).collect();
        let close: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();

        let result = stoch.calculate_hlc(&high, &low, &close).unwrap();
        assert_eq!(result.k.len(), 30 - 14 - 3 - 3 + 3);
        assert_eq!(result.k.len(), result.d.len());

        for (k, d) in result.k.iter().zip(&result.d) {
            assert!(*k >= 0.0 && *k <= 100.0);
            assert!(*d >= 0.0 && *d <= 100.0);
        }
    }

    #[test]
    fn test_stochastic_close_at_high() {
        let stoch = Stochastic::with_periods(5, 1, 3);
        let high = vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0];
        let low = vec![5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
        let close = high.clone();

        let result = stoch.calculate_hlc(&high, &low, &close).unwrap();
        assert!((result.k.last().unwrap() - 100.0).abs() < 1e-10);
        assert!((result.d.last().unwrap() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_stochastic_zero_range_pins_midpoint() {
        let stoch = Stochastic::with_periods(3, 1, 1);
        let flat = vec![10.0; 5];

        let result = stoch.calculate_hlc(&flat, &flat, &flat).unwrap();
        assert_eq!(result.k, vec![50.0; 3]);
    }

    #[test]
    fn test_stochastic_shape_mismatch() {
        let stoch = Stochastic::with_periods(3, 1, 1);
        let result = stoch.calculate_hlc(&[1.0, 2.0, 3.0], &[1.0, 2.0], &[1.0, 2.0, 3.0]);

        assert!(matches!(result, Err(IndicatorError::ShapeMismatch(_))));
    }
}
