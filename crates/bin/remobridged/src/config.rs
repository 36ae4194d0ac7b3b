//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `remobridge.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values. The cloud access token never lives in the
//! file; it is read from the environment only.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Cloud API settings.
    pub cloud: CloudConfig,
    /// Refresh cycle settings.
    pub sync: SyncConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Cloud API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Base URL of the cloud API.
    pub base_url: String,
}

/// Refresh cycle configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Seconds between inventory refreshes.
    pub interval_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `remobridge.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if a
    /// value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("remobridge.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("REMOBRIDGE_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("REMOBRIDGE_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("REMOBRIDGE_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("REMOBRIDGE_CLOUD_BASE_URL") {
            self.cloud.base_url = val;
        }
        if let Ok(val) = std::env::var("REMOBRIDGE_SYNC_INTERVAL_SECS") {
            if let Ok(secs) = val.parse() {
                self.sync.interval_secs = secs;
            }
        }
        if let Ok(val) = std::env::var("REMOBRIDGE_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.sync.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "sync interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Read the cloud access token from the environment.
    ///
    /// `REMOBRIDGE_ACCESS_TOKEN` wins; `ACCESS_TOKEN` is accepted as a
    /// fallback.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when neither variable is set or
    /// the value is empty.
    pub fn access_token(&self) -> Result<String, ConfigError> {
        let token = std::env::var("REMOBRIDGE_ACCESS_TOKEN")
            .or_else(|_| std::env::var("ACCESS_TOKEN"))
            .unwrap_or_default();
        if token.is_empty() {
            return Err(ConfigError::Validation(
                "REMOBRIDGE_ACCESS_TOKEN must be set".to_string(),
            ));
        }
        Ok(token)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 51826,
        }
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            base_url: remobridge_adapter_cloud_http::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { interval_secs: 60 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "remobridged=info,remobridge=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
