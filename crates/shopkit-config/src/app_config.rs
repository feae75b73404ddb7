//! Application configuration structures.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable controlling the cache feature flag.
///
/// Caching is enabled only when this variable is exactly `"true"`; any
/// other value (or absence) disables every cache operation.
pub const CACHE_ENABLED_ENV: &str = "SHOPKIT_CACHE_ENABLED";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Telemetry configuration.
    #[serde(default)]
    pub telemetry: shopkit_core::TelemetryConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "shopkit".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Cache backing-store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Redis URL.
    #[serde(default = "default_cache_url")]
    pub url: String,

    /// Enable caching. Defaults to disabled; flipped on only by an exact
    /// `"true"` in [`CACHE_ENABLED_ENV`] or explicit configuration.
    #[serde(default)]
    pub enabled: bool,

    /// Prefix applied to every key this application writes, so the store
    /// can be shared with unrelated keyspaces.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Per-operation wait bound in milliseconds.
    #[serde(default = "default_op_timeout_ms")]
    pub op_timeout_ms: u64,

    /// Initial connect bound in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: default_cache_url(),
            enabled: false,
            key_prefix: default_key_prefix(),
            op_timeout_ms: default_op_timeout_ms(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_cache_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_key_prefix() -> String {
    "shopkit:cache".to_string()
}

fn default_op_timeout_ms() -> u64 {
    1000
}

fn default_connect_timeout_secs() -> u64 {
    3
}

impl CacheConfig {
    /// Returns the per-operation wait bound as a Duration.
    #[must_use]
    pub const fn op_timeout(&self) -> Duration {
        Duration::from_millis(self.op_timeout_ms)
    }

    /// Returns the connect bound as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Interprets a raw feature-flag value. Only the exact string `"true"`
    /// enables caching; `"TRUE"`, `"1"`, etc. do not.
    #[must_use]
    pub fn flag_enabled(raw: &str) -> bool {
        raw == "true"
    }

    /// Reads the feature flag from the process environment.
    #[must_use]
    pub fn enabled_from_env() -> bool {
        std::env::var(CACHE_ENABLED_ENV)
            .map(|raw| Self::flag_enabled(&raw))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_defaults() {
        let config = CacheConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.key_prefix, "shopkit:cache");
        assert_eq!(config.op_timeout(), Duration::from_millis(1000));
        assert_eq!(config.connect_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_flag_requires_exact_true() {
        assert!(CacheConfig::flag_enabled("true"));
        assert!(!CacheConfig::flag_enabled("TRUE"));
        assert!(!CacheConfig::flag_enabled("True"));
        assert!(!CacheConfig::flag_enabled("1"));
        assert!(!CacheConfig::flag_enabled("yes"));
        assert!(!CacheConfig::flag_enabled(""));
    }
}
