//! Core data types for the analytics engines.

mod direction;
mod ohlcv;

pub use direction::TradeDirection;
pub use ohlcv::{Bar, OhlcvSeries};
