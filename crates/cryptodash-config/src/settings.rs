//! Configuration structures.

use cryptodash_risk::PerformanceConfig;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl SettingsError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        SettingsError::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub indicators: IndicatorSettings,
    #[serde(default)]
    pub risk: RiskSettings,
}

impl AppConfig {
    /// Check every section for values the engines would reject.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.indicators.validate()?;
        self.risk.validate()
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    /// Quote currency used when printing money amounts
    pub quote_currency: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "cryptodash".to_string(),
            quote_currency: "USD".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Indicator parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IndicatorSettings {
    pub sma_period: usize,
    pub ema_period: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_multiplier: f64,
    pub stochastic_k: usize,
    pub stochastic_smooth_k: usize,
    pub stochastic_d: usize,
    pub atr_period: usize,
    pub ichimoku_tenkan: usize,
    pub ichimoku_kijun: usize,
    pub ichimoku_senkou_b: usize,
    pub ichimoku_displacement: usize,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            sma_period: 20,
            ema_period: 20,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_multiplier: 2.0,
            stochastic_k: 14,
            stochastic_smooth_k: 3,
            stochastic_d: 3,
            atr_period: 14,
            ichimoku_tenkan: 9,
            ichimoku_kijun: 26,
            ichimoku_senkou_b: 52,
            ichimoku_displacement: 26,
        }
    }
}

impl IndicatorSettings {
    fn validate(&self) -> Result<(), SettingsError> {
        let periods = [
            ("indicators.sma_period", self.sma_period),
            ("indicators.ema_period", self.ema_period),
            ("indicators.rsi_period", self.rsi_period),
            ("indicators.macd_fast", self.macd_fast),
            ("indicators.macd_slow", self.macd_slow),
            ("indicators.macd_signal", self.macd_signal),
            ("indicators.bollinger_period", self.bollinger_period),
            ("indicators.stochastic_k", self.stochastic_k),
            ("indicators.stochastic_smooth_k", self.stochastic_smooth_k),
            ("indicators.stochastic_d", self.stochastic_d),
            ("indicators.atr_period", self.atr_period),
            ("indicators.ichimoku_tenkan", self.ichimoku_tenkan),
            ("indicators.ichimoku_kijun", self.ichimoku_kijun),
            ("indicators.ichimoku_senkou_b", self.ichimoku_senkou_b),
        ];

        if let Some((key, _)) = periods.iter().find(|(_, period)| *period == 0) {
            return Err(SettingsError::invalid(key, "period must be greater than 0"));
        }

        if self.macd_fast >= self.macd_slow {
            return Err(SettingsError::invalid(
                "indicators.macd_fast",
                format!(
                    "fast period {} must be shorter than slow period {}",
                    self.macd_fast, self.macd_slow
                ),
            ));
        }

        if self.bollinger_multiplier.is_nan() || self.bollinger_multiplier < 0.0 {
            return Err(SettingsError::invalid(
                "indicators.bollinger_multiplier",
                format!("must not be negative, got {}", self.bollinger_multiplier),
            ));
        }

        Ok(())
    }
}

/// Risk engine defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RiskSettings {
    /// Percent of the balance risked per trade
    pub risk_percent: Decimal,
    pub leverage: Decimal,
    pub risk_reward_ratio: Decimal,
    /// VaR confidence in percent
    pub var_confidence: f64,
    /// Risk-free rate per period
    pub risk_free_rate: f64,
    pub periods_per_year: f64,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            risk_percent: dec!(1),
            leverage: dec!(1),
            risk_reward_ratio: dec!(2),
            var_confidence: 95.0,
            risk_free_rate: 0.0,
            periods_per_year: 365.0,
        }
    }
}

impl RiskSettings {
    fn validate(&self) -> Result<(), SettingsError> {
        if self.risk_percent <= Decimal::ZERO || self.risk_percent > dec!(100) {
            return Err(SettingsError::invalid(
                "risk.risk_percent",
                format!("must be in (0, 100], got {}", self.risk_percent),
            ));
        }
        if self.leverage <= Decimal::ZERO {
            return Err(SettingsError::invalid(
                "risk.leverage",
                format!("must be positive, got {}", self.leverage),
            ));
        }
        if self.risk_reward_ratio < Decimal::ZERO {
            return Err(SettingsError::invalid(
                "risk.risk_reward_ratio",
                format!("must not be negative, got {}", self.risk_reward_ratio),
            ));
        }
        if !(self.var_confidence > 0.0 && self.var_confidence < 100.0) {
            return Err(SettingsError::invalid(
                "risk.var_confidence",
                format!("must be in (0, 100), got {}", self.var_confidence),
            ));
        }
        if self.periods_per_year.is_nan() || self.periods_per_year <= 0.0 {
            return Err(SettingsError::invalid(
                "risk.periods_per_year",
                format!("must be positive, got {}", self.periods_per_year),
            ));
        }
        Ok(())
    }

    /// Statistics settings for a portfolio of the given value.
    pub fn performance_config(&self, portfolio_value: f64) -> PerformanceConfig {
        PerformanceConfig {
            risk_free_rate: self.risk_free_rate,
            var_confidence: self.var_confidence,
            portfolio_value,
            periods_per_year: self.periods_per_year,
        }
    }
}
