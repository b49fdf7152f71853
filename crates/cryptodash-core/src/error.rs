//! Error types for the analytics engines.

use thiserror::Error;

/// Indicator calculation errors.
///
/// Short input is not an error for most indicators: they return an empty or
/// shorter series instead. `InsufficientData` is produced only by
/// [`crate::traits::Indicator::validate_data`] for callers that want a hard
/// check up front.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
}

/// Risk calculation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    #[error("Degenerate input for {computation}: {reason}")]
    DegenerateInput {
        computation: &'static str,
        reason: String,
    },

    #[error("Shape mismatch in {computation}: {reason}")]
    ShapeMismatch {
        computation: &'static str,
        reason: String,
    },

    #[error("Invalid parameter for {computation}: {reason}")]
    InvalidParameter {
        computation: &'static str,
        reason: String,
    },
}

impl RiskError {
    pub fn degenerate(computation: &'static str, reason: impl Into<String>) -> Self {
        RiskError::DegenerateInput {
            computation,
            reason: reason.into(),
        }
    }

    pub fn invalid(computation: &'static str, reason: impl Into<String>) -> Self {
        RiskError::InvalidParameter {
            computation,
            reason: reason.into(),
        }
    }

    /// Name of the computation that rejected its input.
    pub fn computation(&self) -> &'static str {
        match self {
            RiskError::DegenerateInput { computation, .. }
            | RiskError::ShapeMismatch { computation, .. }
            | RiskError::InvalidParameter { computation, .. } => computation,
        }
    }
}

/// Data source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Data file not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for risk calculations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Check that every named series has the same length as the first one.
///
/// Returns a description of the first offending series, suitable for wrapping
/// into either [`IndicatorError::ShapeMismatch`] or [`RiskError::ShapeMismatch`].
pub fn ensure_same_length(series: &[(&str, usize)]) -> Result<(), String> {
    let Some(&(first_name, expected)) = series.first() else {
        return Ok(());
    };

    for &(name, len) in &series[1..] {
        if len != expected {
            return Err(format!(
                "{name} has {len} values but {first_name} has {expected}"
            ));
        }
    }

    Ok(())
}
