//! Configuration loading
//!
//! Settings are resolved in this priority order:
//! 1. Command-line arguments (applied by the binary)
//! 2. Environment variables (`BIKETAG_*`)
//! 3. TOML config file (explicit path, or the platform config directory)
//! 4. Built-in defaults

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const ENV_IMGUR_CLIENT_ID: &str = "BIKETAG_IMGUR_CLIENT_ID";
pub const ENV_ALBUM_HASH: &str = "BIKETAG_ALBUM_HASH";
pub const ENV_SUBREDDIT: &str = "BIKETAG_SUBREDDIT";
pub const ENV_GOOGLE_API_KEY: &str = "BIKETAG_GOOGLE_API_KEY";
pub const ENV_LOG_LEVEL: &str = "BIKETAG_LOG_LEVEL";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BikeTagConfig {
    /// Imgur application client id (sent as `Authorization: Client-ID ...`)
    #[serde(default)]
    pub imgur_client_id: Option<String>,

    /// Album holding the game's tag images
    #[serde(default)]
    pub album_hash: Option<String>,

    /// Subreddit searched for BikeTag posts
    #[serde(default)]
    pub subreddit: Option<String>,

    /// Google Places API key; geocoding is disabled without it
    #[serde(default)]
    pub google_api_key: Option<String>,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub geocoder: GeocoderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Cache timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry time-to-live in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Sweep interval in seconds (advisory)
    #[serde(default = "default_check_period_secs")]
    pub check_period_secs: u64,
}

/// Geocoding lookup settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Request timeout in milliseconds
    #[serde(default = "default_geocoder_timeout_ms")]
    pub timeout_ms: u64,

    /// Google Places `locationbias` parameter
    #[serde(default = "default_location_bias")]
    pub location_bias: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_ttl_secs() -> u64 {
    600
}

fn default_check_period_secs() -> u64 {
    450
}

fn default_geocoder_timeout_ms() -> u64 {
    1000
}

fn default_location_bias() -> String {
    "circle:60660@41.8781,-87.6298".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            check_period_secs: default_check_period_secs(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn check_period(&self) -> Duration {
        Duration::from_secs(self.check_period_secs)
    }

    /// Reject timings the cache cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.check_period_secs == 0 {
            return Err(Error::Config(
                "cache.check_period_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_geocoder_timeout_ms(),
            location_bias: default_location_bias(),
        }
    }
}

impl GeocoderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl BikeTagConfig {
    /// Load configuration from TOML and apply environment overrides
    ///
    /// An explicit `path` must exist. Without one, the platform config file
    /// (`~/.config/biketag/config.toml` on Linux) is used when present;
    /// otherwise built-in defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(default_path) if default_path.exists() => Self::from_file(&default_path)?,
                Some(default_path) => {
                    warn!(
                        path = %default_path.display(),
                        "Config file not found, using built-in defaults"
                    );
                    Self::default()
                }
                None => {
                    warn!("Could not determine config directory, using built-in defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read config {} failed: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Parse TOML content
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
        config.cache.validate()?;
        Ok(config)
    }

    /// Overlay non-empty `BIKETAG_*` environment variables
    pub fn apply_env_overrides(&mut self) {
        if let Some(value) = env_value(ENV_IMGUR_CLIENT_ID) {
            self.imgur_client_id = Some(value);
        }
        if let Some(value) = env_value(ENV_ALBUM_HASH) {
            self.album_hash = Some(value);
        }
        if let Some(value) = env_value(ENV_SUBREDDIT) {
            self.subreddit = Some(value);
        }
        if let Some(value) = env_value(ENV_GOOGLE_API_KEY) {
            self.google_api_key = Some(value);
        }
        if let Some(value) = env_value(ENV_LOG_LEVEL) {
            self.logging.level = value;
        }
    }

    /// Geocoding is enabled only with a usable API key
    pub fn geocoding_enabled(&self) -> bool {
        self.google_api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Platform config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("biketag").join("config.toml"))
}

fn env_value(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => {
            debug!(variable = name, "Applying environment override");
            Some(value)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BikeTagConfig::default();
        assert_eq!(config.cache.ttl_secs, 600);
        assert_eq!(config.cache.check_period_secs, 450);
        assert_eq!(config.geocoder.timeout(), Duration::from_millis(1000));
        assert_eq!(config.logging.level, "info");
        assert!(!config.geocoding_enabled());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = BikeTagConfig::from_toml_str(
            r#"
            album_hash = "Y9PKtpI"

            [cache]
            ttl_secs = 60
            "#,
        )
        .unwrap();

        assert_eq!(config.album_hash.as_deref(), Some("Y9PKtpI"));
        assert_eq!(config.cache.ttl(), Duration::from_secs(60));
        assert_eq!(config.cache.check_period(), Duration::from_secs(450));
        assert_eq!(config.geocoder.location_bias, "circle:60660@41.8781,-87.6298");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = BikeTagConfig::from_toml_str("cache = [");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_check_period_rejected() {
        let result = BikeTagConfig::from_toml_str("[cache]\ncheck_period_secs = 0");
        assert!(matches!(result, Err(Error::Config(ref m)) if m.contains("check_period_secs")));
    }

    #[test]
    fn test_blank_api_key_disables_geocoding() {
        let config = BikeTagConfig {
            google_api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!config.geocoding_enabled());
    }
}
