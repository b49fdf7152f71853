//! Core types and traits for the analytics engines.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, OhlcvSeries)
//! - Trade direction used by the risk calculations
//! - Core traits for indicators
//! - The error taxonomy shared by the indicator and risk engines

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ensure_same_length, DataError, IndicatorError, RiskError, RiskResult};
pub use traits::*;
pub use types::*;
