//! Configuration loader with layered sources.

use crate::{AppConfig, CacheConfig, CACHE_ENABLED_ENV};
use config::{Config, ConfigError, Environment, File};
use shopkit_core::ShopkitError;
use std::path::Path;
use tracing::{debug, info};

/// Loads configuration from layered sources.
///
/// Sources are applied in order:
/// 1. `config/default.toml` - Default values
/// 2. `config/{environment}.toml` - Environment-specific overrides
/// 3. `config/local.toml` - Local overrides (not committed)
/// 4. Environment variables with `SHOPKIT_` prefix
///
/// The cache feature flag is then re-read directly from the environment
/// so that only an exact `"true"` enables it.
pub fn load_config(config_dir: &str) -> Result<AppConfig, ShopkitError> {
    // Load .env file if present
    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env file found or error loading it: {}", e);
    }

    let environment = std::env::var("SHOPKIT_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

    info!("Loading configuration for environment: {}", environment);

    let mut builder = Config::builder();

    let default_path = format!("{}/default.toml", config_dir);
    if Path::new(&default_path).exists() {
        debug!("Loading default config from: {}", default_path);
        builder = builder.add_source(File::with_name(&default_path).required(false));
    }

    let env_path = format!("{}/{}.toml", config_dir, environment);
    if Path::new(&env_path).exists() {
        debug!("Loading environment config from: {}", env_path);
        builder = builder.add_source(File::with_name(&env_path).required(false));
    }

    let local_path = format!("{}/local.toml", config_dir);
    if Path::new(&local_path).exists() {
        debug!("Loading local config from: {}", local_path);
        builder = builder.add_source(File::with_name(&local_path).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("SHOPKIT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build().map_err(config_error_to_shopkit_error)?;

    let mut app_config: AppConfig = config
        .try_deserialize()
        .map_err(config_error_to_shopkit_error)?;

    // The feature flag is stricter than normal bool parsing: anything but
    // the exact string "true" disables caching.
    if std::env::var(CACHE_ENABLED_ENV).is_ok() {
        app_config.cache.enabled = CacheConfig::enabled_from_env();
    }

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Loads configuration from the default location (`./config`).
pub fn from_default_location() -> Result<AppConfig, ShopkitError> {
    load_config("./config")
}

/// Validates the configuration.
fn validate_config(config: &AppConfig) -> Result<(), ShopkitError> {
    if config.cache.enabled && config.cache.url.is_empty() {
        return Err(ShopkitError::Configuration(
            "Cache URL is required when caching is enabled".to_string(),
        ));
    }

    if config.cache.key_prefix.is_empty() {
        return Err(ShopkitError::Configuration(
            "Cache key prefix must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn config_error_to_shopkit_error(err: ConfigError) -> ShopkitError {
    ShopkitError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.app.name, "shopkit");
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.url, "redis://localhost:6379");
    }

    #[test]
    fn test_validate_rejects_empty_url_when_enabled() {
        let mut config = AppConfig::default();
        config.cache.enabled = true;
        config.cache.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_prefix() {
        let mut config = AppConfig::default();
        config.cache.key_prefix = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }
}
