//! Core traits for the analytics engines.

mod indicator;

pub use indicator::{Indicator, MultiOutputIndicator, OhlcvIndicator};
