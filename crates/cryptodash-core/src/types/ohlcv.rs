//! OHLCV (Open, High, Low, Close, Volume) data types.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_same_length, IndicatorError};

/// A single OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Traded volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Calculate the typical price (HLC average).
    #[inline]
    pub fn typical_price(&self) -> f64 {
        typical_price(self.high, self.low, self.close)
    }

    /// Calculate the true range (used for ATR).
    pub fn true_range(&self, prev_close: Option<f64>) -> f64 {
        match prev_close {
            Some(pc) => true_range(self.high, self.low, pc),
            None => self.high - self.low,
        }
    }
}

/// `(high + low + close) / 3`.
#[inline]
pub(crate) fn typical_price(high: f64, low: f64, close: f64) -> f64 {
    (high + low + close) / 3.0
}

/// `max(high - low, |high - prev_close|, |low - prev_close|)`.
#[inline]
pub(crate) fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    let hl = high - low;
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();
    hl.max(hc).max(lc)
}

/// Parallel OHLCV series in chronological order.
///
/// All five columns always have the same length, so index `i` refers to the
/// same bar in every column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OhlcvSeries {
    open: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
    volume: Vec<f64>,
}

impl OhlcvSeries {
    /// Build a series from parallel columns.
    pub fn new(
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
        volume: Vec<f64>,
    ) -> Result<Self, IndicatorError> {
        ensure_same_length(&[
            ("open", open.len()),
            ("high", high.len()),
            ("low", low.len()),
            ("close", close.len()),
            ("volume", volume.len()),
        ])
        .map_err(IndicatorError::ShapeMismatch)?;

        Ok(Self {
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Build a series from high/low/close only. Open is set to close and
    /// volume to zero.
    pub fn from_hlc(high: Vec<f64>, low: Vec<f64>, close: Vec<f64>) -> Result<Self, IndicatorError> {
        let open = close.clone();
        let volume = vec![0.0; close.len()];
        Self::new(open, high, low, close, volume)
    }

    /// Split bars into columns.
    pub fn from_bars(bars: &[Bar]) -> Self {
        let mut series = Self {
            open: Vec::with_capacity(bars.len()),
            high: Vec::with_capacity(bars.len()),
            low: Vec::with_capacity(bars.len()),
            close: Vec::with_capacity(bars.len()),
            volume: Vec::with_capacity(bars.len()),
        };

        for bar in bars {
            series.open.push(bar.open);
            series.high.push(bar.high);
            series.low.push(bar.low);
            series.close.push(bar.close);
            series.volume.push(bar.volume);
        }

        series
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.close.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    pub fn opens(&self) -> &[f64] {
        &self.open
    }

    pub fn highs(&self) -> &[f64] {
        &self.high
    }

    pub fn lows(&self) -> &[f64] {
        &self.low
    }

    pub fn closes(&self) -> &[f64] {
        &self.close
    }

    pub fn volumes(&self) -> &[f64] {
        &self.volume
    }

    /// Typical price of every bar.
    pub fn typical_prices(&self) -> Vec<f64> {
        self.high
            .iter()
            .zip(&self.low)
            .zip(&self.close)
            .map(|((&h, &l), &c)| typical_price(h, l, c))
            .collect()
    }

    /// True range of every bar after the first.
    pub fn true_ranges(&self) -> Vec<f64> {
        (1..self.len())
            .map(|i| true_range(self.high[i], self.low[i], self.close[i - 1]))
            .collect()
    }
}

impl FromIterator<Bar> for OhlcvSeries {
    fn from_iter<T: IntoIterator<Item = Bar>>(iter: T) -> Self {
        let bars: Vec<Bar> = iter.into_iter().collect();
        Self::from_bars(&bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_calculations() {
        let bar = Bar::new(1000, 100.0, 110.0, 95.0, 105.0, 1_000_000.0);

        assert!((bar.typical_price() - 103.333333).abs() < 0.001);
    }

    #[test]
    fn test_bar_true_range() {
        let bar = Bar::new(1000, 100.0, 110.0, 95.0, 105.0, 1_000_000.0);

        // Without previous close
        assert!((bar.true_range(None) - 15.0).abs() < 0.001);

        // Gap down from previous close widens the range
        assert!((bar.true_range(Some(90.0)) - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_series_rejects_ragged_columns() {
        let result = OhlcvSeries::new(
            vec![1.0, 2.0],
            vec![1.0, 2.0],
            vec![1.0],
            vec![1.0, 2.0],
            vec![1.0, 2.0],
        );

        assert!(matches!(result, Err(IndicatorError::ShapeMismatch(_))));
    }

    #[test]
    fn test_series_from_bars() {
        let bars = vec![
            Bar::new(1, 100.0, 101.0, 99.0, 100.5, 1000.0),
            Bar::new(2, 100.5, 102.0, 100.0, 101.5, 2000.0),
        ];
        let series = OhlcvSeries::from_bars(&bars);

        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), &[100.5, 101.5]);
        assert_eq!(series.volumes(), &[1000.0, 2000.0]);
        assert_eq!(series.highs(), &[101.0, 102.0]);
    }

    #[test]
    fn test_series_true_ranges() {
        let series = OhlcvSeries::from_hlc(
            vec![10.0, 12.0, 11.0],
            vec![8.0, 10.0, 7.0],
            vec![9.0, 11.0, 8.0],
        )
        .unwrap();

        // bar 1: max(2, |12-9|, |10-9|) = 3; bar 2: max(4, |11-11|, |7-11|) = 4
        assert_eq!(series.true_ranges(), vec![3.0, 4.0]);
    }
}
