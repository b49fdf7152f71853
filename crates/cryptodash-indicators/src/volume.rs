//! Volume-based indicators.
//!
//! Both indicators here are running accumulators: they emit one value per
//! input bar and need no warmup.

use cryptodash_core::error::{ensure_same_length, IndicatorError};
use cryptodash_core::traits::OhlcvIndicator;
use cryptodash_core::types::OhlcvSeries;

/// On-Balance Volume (OBV).
///
/// Starts at 0 on the first bar, then adds the bar's volume when the close
/// rises, subtracts it when the close falls and carries the total on a flat
/// close.
#[derive(Debug, Clone, Default)]
pub struct Obv;

impl Obv {
    pub fn new() -> Self {
        Self
    }

    /// Calculate OBV from close and volume columns.
    pub fn calculate_cv(&self, close: &[f64], volume: &[f64]) -> Result<Vec<f64>, IndicatorError> {
        ensure_same_length(&[("close", close.len()), ("volume", volume.len())])
            .map_err(IndicatorError::ShapeMismatch)?;

        let mut result = Vec::with_capacity(close.len());
        let mut obv = 0.0;

        for i in 0..close.len() {
            if i > 0 {
                if close[i] > close[i - 1] {
                    obv += volume[i];
                } else if close[i] < close[i - 1] {
                    obv -= volume[i];
                }
            }
            result.push(obv);
        }

        Ok(result)
    }
}

impl OhlcvIndicator for Obv {
    type Output = Vec<f64>;

    fn calculate(&self, series: &OhlcvSeries) -> Result<Vec<f64>, IndicatorError> {
        self.calculate_cv(series.closes(), series.volumes())
    }

    fn period(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "OBV"
    }
}

/// Volume-Weighted Average Price (VWAP).
///
/// Cumulative `typical_price * volume` over cumulative volume. While the
/// cumulative volume is still zero the bar's typical price is emitted.
#[derive(Debug, Clone, Default)]
pub struct Vwap;

impl Vwap {
    pub fn new() -> Self {
        Self
    }

    /// Calculate VWAP from high/low/close/volume columns.
    pub fn calculate_hlcv(
        &self,
        high: &[f64],
        low: &[f64],
        close: &[f64],
        volume: &[f64],
    ) -> Result<Vec<f64>, IndicatorError> {
        let series = OhlcvSeries::new(
            close.to_vec(),
            high.to_vec(),
            low.to_vec(),
            close.to_vec(),
            volume.to_vec(),
        )?;
        self.calculate(&series)
    }
}

impl OhlcvIndicator for Vwap {
    type Output = Vec<f64>;

    fn calculate(&self, series: &OhlcvSeries) -> Result<Vec<f64>, IndicatorError> {
        let mut cumulative_pv = 0.0;
        let mut cumulative_volume = 0.0;

        let result = series
            .typical_prices()
            .into_iter()
            .zip(series.volumes())
            .map(|(typical, &volume)| {
                cumulative_pv += typical * volume;
                cumulative_volume += volume;

                if cumulative_volume == 0.0 {
                    typical
                } else {
                    cumulative_pv / cumulative_volume
                }
            })
            .collect();

        Ok(result)
    }

    fn period(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "VWAP"
    }
}
