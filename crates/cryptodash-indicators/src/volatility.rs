//! Volatility indicators.

use cryptodash_core::error::IndicatorError;
use cryptodash_core::traits::{Indicator, MultiOutputIndicator, OhlcvIndicator};
use cryptodash_core::types::OhlcvSeries;
use serde::{Deserialize, Serialize};

use crate::moving_average::wilder_smooth;
use crate::simd::{sum_simd, sum_sq_dev_simd};

/// Rolling population standard deviation.
#[derive(Debug, Clone)]
pub struct StdDev {
    period: usize,
}

impl StdDev {
    /// Create a new standard deviation indicator.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Mean and population standard deviation of every window.
    fn moments(&self, data: &[f64]) -> Vec<(f64, f64)> {
        if data.len() < self.period {
            return vec![];
        }

        let period_f64 = self.period as f64;
        data.windows(self.period)
            .map(|window| {
                let mean = sum_simd(window) / period_f64;
                let variance = sum_sq_dev_simd(window, mean) / period_f64;
                (mean, variance.sqrt())
            })
            .collect()
    }
}

impl Indicator for StdDev {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        self.moments(data).into_iter().map(|(_, sd)| sd).collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "StdDev"
    }
}

/// Bollinger Bands output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BollingerSeries {
    /// Upper band
    pub upper: Vec<f64>,
    /// Middle band (SMA)
    pub middle: Vec<f64>,
    /// Lower band
    pub lower: Vec<f64>,
}

impl BollingerSeries {
    /// Number of aligned points in each line.
    pub fn len(&self) -> usize {
        self.middle.len()
    }

    /// True when the input was too short for a first value.
    pub fn is_empty(&self) -> bool {
        self.middle.is_empty()
    }

    /// %B of `price` against the bands at `index`; 0.5 when the bands collapse.
    pub fn percent_b(&self, index: usize, price: f64) -> Option<f64> {
        let (upper, lower) = (*self.upper.get(index)?, *self.lower.get(index)?);
        if upper == lower {
            Some(0.5)
        } else {
            Some((price - lower) / (upper - lower))
        }
    }
}

/// Bollinger Bands.
///
/// Consists of a middle band (SMA) with upper and lower bands
/// at a specified number of standard deviations.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands with default parameters (20, 2.0).
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    /// Create Bollinger Bands with custom parameters.
    pub fn with_params(period: usize, multiplier: f64) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        assert!(multiplier >= 0.0, "Multiplier must not be negative");
        Self { period, multiplier }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Outputs = BollingerSeries;

    fn calculate(&self, data: &[f64]) -> BollingerSeries {
        let moments = StdDev::new(self.period).moments(data);

        let mut bands = BollingerSeries {
            upper: Vec::with_capacity(moments.len()),
            middle: Vec::with_capacity(moments.len()),
            lower: Vec::with_capacity(moments.len()),
        };

        for (mean, std_dev) in moments {
            let width = self.multiplier * std_dev;
            bands.upper.push(mean + width);
            bands.middle.push(mean);
            bands.lower.push(mean - width);
        }

        bands
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }
}

/// Average True Range (ATR).
///
/// Measures market volatility by decomposing the entire range
/// of an asset price for that period. Output index 0 corresponds to
/// input bar `period`, since the first bar has no previous close.
#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
}

impl Atr {
    /// Create a new ATR indicator.
    ///
    /// Common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Calculate ATR from high/low/close columns.
    pub fn calculate_hlc(
        &self,
        high: &[f64],
        low: &[f64],
        close: &[f64],
    ) -> Result<Vec<f64>, IndicatorError> {
        let series = OhlcvSeries::from_hlc(high.to_vec(), low.to_vec(), close.to_vec())?;
        self.calculate(&series)
    }
}

impl Default for Atr {
    fn default() -> Self {
        Self::new(14)
    }
}

impl OhlcvIndicator for Atr {
    type Output = Vec<f64>;

    fn calculate(&self, series: &OhlcvSeries) -> Result<Vec<f64>, IndicatorError> {
        Ok(wilder_smooth(&series.true_ranges(), self.period))
    }

    fn period(&self) -> usize {
        self.period + 1
    }

    fn name(&self) -> &str {
        "ATR"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_dev() {
        let std_dev = StdDev::new(3);
        let result = std_dev.calculate(&[2.0, 4.0, 6.0, 8.0, 10.0]);

        assert_eq!(result.len(), 3);
        // First window: [2, 4, 6], mean = 4, variance = (4+0+4)/3 = 8/3
        assert!((result[0] - (8.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_atr_hlc() {
        let atr = Atr::new(3);
        let high = vec![10.0, 11.0, 12.0, 11.0, 13.0, 14.0];
        let low = vec![8.0, 9.0, 10.0, 9.0, 11.0, 12.0];
        let close = vec![9.0, 10.0, 11.0, 10.0, 12.0, 13.0];

        let result = atr.calculate_hlc(&high, &low, &close).unwrap();

        // True ranges: 2, 2, 2, 3, 2 -> seed 2, then (2*2+3)/3, then (7/3*2+2)/3
        assert_eq!(result.len(), 3);
        assert!((result[0] - 2.0).abs() < 1e-12);
        assert!((result[1] - 7.0 / 3.0).abs() < 1e-12);
        assert!((result[2] - (14.0 / 3.0 + 2.0) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_atr_shape_mismatch() {
        let result = Atr::new(2).calculate_hlc(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], &[1.0]);
        assert!(matches!(result, Err(IndicatorError::ShapeMismatch(_))));
    }

    #[test]
    fn test_atr_insufficient_data() {
        let result = Atr::new(5).calculate_hlc(&[2.0; 5], &[1.0; 5], &[1.5; 5]).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_bollinger_bands_order() {
        let bb = BollingerBands::new();
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.1).sin() * 5.0)
            .collect();

        let result = bb.calculate(&data);
        assert_eq!(result.len(), 11);

        for i in 0..result.len() {
            assert!(result.upper[i] > result.middle[i]);
            assert!(result.middle[i] > result.lower[i]);
        }
    }

    #[test]
    fn test_bollinger_known_window() {
        let bb = BollingerBands::with_params(8, 2.0);
        let data = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];

        let result = bb.calculate(&data);
        // mean 5, population std dev 2
        assert!((result.middle[0] - 5.0).abs() < 1e-12);
        assert!((result.upper[0] - 9.0).abs() < 1e-12);
        assert!((result.lower[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bollinger_percent_b() {
        let bb = BollingerBands::with_params(5, 2.0);
        let result = bb.calculate(&[100.0; 5]);

        assert_eq!(result.len(), 1);
        // Constant price collapses the bands
        assert_eq!(result.percent_b(0, 100.0), Some(0.5));
        assert_eq!(result.percent_b(1, 100.0), None);
    }
}
