//! Technical indicators over OHLCV series.
//!
//! This crate provides the indicator engine:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD, Stochastic)
//! - Volatility indicators (Bollinger Bands, ATR, Standard Deviation)
//! - Volume indicators (OBV, VWAP)
//! - Trend indicators (Ichimoku Cloud)
//!
//! Every indicator is a small configuration value; computing it never mutates
//! the indicator or the input, so calls may run concurrently across symbols.
//! Windowed reductions go through the [`simd`] helpers.

pub mod momentum;
pub mod moving_average;
pub mod simd;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use momentum::{Macd, MacdSeries, Rsi, Stochastic, StochasticSeries};
pub use moving_average::{Ema, Sma};
pub use trend::{Ichimoku, IchimokuSeries};
pub use volatility::{Atr, BollingerBands, BollingerSeries, StdDev};
pub use volume::{Obv, Vwap};
