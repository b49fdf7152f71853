//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, IndicatorSettings, LoggingConfig, RiskSettings, SettingsError,
};

use config::{Config, Environment, File};
use std::path::Path;

/// Prefix for environment overrides, e.g. `CRYPTODASH__RISK__LEVERAGE=3`.
pub const ENV_PREFIX: &str = "CRYPTODASH";

/// Load configuration from an optional TOML file and the environment, then
/// validate it.
///
/// Missing keys fall back to [`AppConfig::default`].
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, SettingsError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config: AppConfig = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    config.validate()?;
    Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(text: &str) -> Result<AppConfig, SettingsError> {
    let config: AppConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}
