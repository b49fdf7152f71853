//! Validate configuration command.

use anyhow::Result;
use cryptodash_config::load_config;
use std::path::Path;

pub fn run(config_path: Option<&Path>) -> Result<()> {
    match config_path {
        Some(path) => println!("Validating configuration: {}", path.display()),
        None => println!("Validating built-in defaults and environment overrides"),
    }

    match load_config(config_path) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Quote currency: {}", config.app.quote_currency);
            println!("Log level: {}", config.logging.level);
            println!(
                "MACD: {}/{}/{}",
                config.indicators.macd_fast, config.indicators.macd_slow, config.indicators.macd_signal
            );
            println!("Risk per trade: {}%", config.risk.risk_percent);
            println!("Leverage: {}x", config.risk.leverage);
            println!("VaR confidence: {}%", config.risk.var_confidence);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
