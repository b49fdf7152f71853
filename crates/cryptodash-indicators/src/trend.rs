//! Trend indicators.

use cryptodash_core::error::IndicatorError;
use cryptodash_core::traits::OhlcvIndicator;
use cryptodash_core::types::OhlcvSeries;
use serde::{Deserialize, Serialize};

use crate::simd::minmax_simd;

/// Ichimoku Cloud lines.
///
/// Each line keeps its own length: a rolling line over period `p` has
/// `len - p + 1` values, Senkou Span A follows the Kijun-sen length and the
/// Chikou Span holds the leading `len - displacement` closes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IchimokuSeries {
    pub tenkan_sen: Vec<f64>,
    pub kijun_sen: Vec<f64>,
    pub senkou_span_a: Vec<f64>,
    pub senkou_span_b: Vec<f64>,
    pub chikou_span: Vec<f64>,
}

/// Ichimoku Kinko Hyo.
#[derive(Debug, Clone)]
pub struct Ichimoku {
    tenkan_period: usize,
    kijun_period: usize,
    senkou_b_period: usize,
    displacement: usize,
}

impl Ichimoku {
    /// Create with the conventional parameters (9, 26, 52, 26).
    pub fn new() -> Self {
        Self::with_periods(9, 26, 52, 26)
    }

    pub fn with_periods(
        tenkan_period: usize,
        kijun_period: usize,
        senkou_b_period: usize,
        displacement: usize,
    ) -> Self {
        assert!(
            tenkan_period > 0 && kijun_period > 0 && senkou_b_period > 0,
            "Period must be greater than 0"
        );
        Self {
            tenkan_period,
            kijun_period,
            senkou_b_period,
            displacement,
        }
    }

    /// Calculate the cloud from high/low/close columns.
    pub fn calculate_hlc(
        &self,
        high: &[f64],
        low: &[f64],
        close: &[f64],
    ) -> Result<IchimokuSeries, IndicatorError> {
        let series = OhlcvSeries::from_hlc(high.to_vec(), low.to_vec(), close.to_vec())?;
        self.calculate(&series)
    }
}

impl Default for Ichimoku {
    fn default() -> Self {
        Self::new()
    }
}

/// Rolling `(max high + min low) / 2` over `period` bars.
fn rolling_midpoint(high: &[f64], low: &[f64], period: usize) -> Vec<f64> {
    if high.len() < period {
        return vec![];
    }

    high.windows(period)
        .zip(low.windows(period))
        .filter_map(|(h, l)| {
            let (_, highest) = minmax_simd(h)?;
            let (lowest, _) = minmax_simd(l)?;
            Some((highest + lowest) / 2.0)
        })
        .collect()
}

impl OhlcvIndicator for Ichimoku {
    type Output = IchimokuSeries;

    fn calculate(&self, series: &OhlcvSeries) -> Result<IchimokuSeries, IndicatorError> {
        let (high, low, close) = (series.highs(), series.lows(), series.closes());

        let tenkan_sen = rolling_midpoint(high, low, self.tenkan_period);
        let kijun_sen = rolling_midpoint(high, low, self.kijun_period);
        let senkou_span_b = rolling_midpoint(high, low, self.senkou_b_period);

        // Span A is defined where both lines exist: their common tail.
        let overlap = tenkan_sen.len().min(kijun_sen.len());
        let senkou_span_a = tenkan_sen[tenkan_sen.len() - overlap..]
            .iter()
            .zip(&kijun_sen[kijun_sen.len() - overlap..])
            .map(|(t, k)| (t + k) / 2.0)
            .collect();

        let chikou_span = close[..close.len().saturating_sub(self.displacement)].to_vec();

        Ok(IchimokuSeries {
            tenkan_sen,
            kijun_sen,
            senkou_span_a,
            senkou_span_b,
            chikou_span,
        })
    }

    fn period(&self) -> usize {
        self.tenkan_period
            .max(self.kijun_period)
            .max(self.senkou_b_period)
    }

    fn name(&self) -> &str {
        "Ichimoku"
    }
}
