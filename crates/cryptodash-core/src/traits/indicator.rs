//! Indicator trait definitions.

use crate::error::IndicatorError;
use crate::types::OhlcvSeries;

/// Trait for technical indicators over a single price series.
///
/// Implementations are stateless: the same input always produces the same
/// output, and nothing is retained between calls.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically close prices)
    ///
    /// # Returns
    /// A vector of indicator values. Index 0 corresponds to input index
    /// `period() - 1`. Input shorter than `period()` yields an empty vector.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}

/// Multi-output indicator (e.g., Bollinger Bands, MACD).
///
/// Produces one record of named parallel sequences.
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type containing multiple series.
    type Outputs;

    /// Calculate indicator series for the given data.
    fn calculate(&self, data: &[f64]) -> Self::Outputs;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}

/// OHLCV indicator that uses bar data beyond the close.
pub trait OhlcvIndicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values from a validated OHLCV series.
    fn calculate(&self, series: &OhlcvSeries) -> Result<Self::Output, IndicatorError>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}
