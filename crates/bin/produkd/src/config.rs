//! Configuration loading: an ordered list of sources resolved once at startup.
//!
//! Built-in defaults come first, then `produk.toml` in the working directory
//! (optional, every field optional), then environment variables. Each source
//! overrides what the previous ones set. The result is never mutated after
//! [`Config::load`] returns.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

const CONFIG_FILE: &str = "produk.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Persistence settings.
    pub storage: StorageConfig,
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

/// Which repository implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Relational table through the `SQLite` adapter.
    Sqlite,
    /// Volatile in-process collection.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::Validation(format!(
                "unknown storage backend {other:?}"
            ))),
        }
    }
}

/// Persistence configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Repository implementation.
    pub backend: StorageBackend,
    /// `SQLite` connection URL or file path.
    pub url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// Startup connection attempts before giving up.
    pub connect_attempts: u32,
    /// Seconds to wait between two startup attempts.
    pub retry_delay_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// One place configuration values can come from.
#[derive(Debug, Clone)]
pub enum Source {
    /// A TOML file; a missing file contributes nothing.
    File(PathBuf),
    /// Process environment variables.
    Environment,
}

impl Config {
    /// Resolve the default source list against the real process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if a
    /// value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let sources = [Source::File(PathBuf::from(CONFIG_FILE)), Source::Environment];
        Self::resolve(&sources, |key| std::env::var(key).ok())
    }

    /// Apply `sources` in order on top of the defaults, then validate.
    ///
    /// # Errors
    ///
    /// Returns the first read, parse or validation failure.
    pub fn resolve<F>(sources: &[Source], env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        for source in sources {
            match source {
                Source::File(path) => {
                    if let Some(parsed) = Self::from_file(path)? {
                        config = parsed;
                    }
                }
                Source::Environment => config.apply_env(&env)?,
            }
        }
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)
                .map(Some)
                .map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env<F>(&mut self, env: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = env("PRODUK_HOST") {
            self.server.host = val;
        }
        // The bare names are the conventional PaaS variables; the prefixed
        // ones win when both are set.
        for key in ["PORT", "PRODUK_PORT"] {
            if let Some(val) = env(key) {
                self.server.port = val
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Validation(format!("{key} must be a port number")))?;
            }
        }
        for key in ["DB_CONN", "PRODUK_DATABASE_URL"] {
            if let Some(val) = env(key) {
                self.storage.url = val;
            }
        }
        if let Some(val) = env("PRODUK_STORAGE") {
            self.storage.backend = val.parse()?;
        }
        for key in ["PRODUK_LOG", "RUST_LOG"] {
            if let Some(val) = env(key) {
                self.logging.filter = val;
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.storage.max_connections == 0 {
            return Err(ConfigError::Validation(
                "max_connections must be non-zero".to_string(),
            ));
        }
        if self.storage.connect_attempts == 0 {
            return Err(ConfigError::Validation(
                "connect_attempts must be non-zero".to_string(),
            ));
        }
        if self.storage.backend == StorageBackend::Sqlite && self.storage.url.is_empty() {
            return Err(ConfigError::Validation(
                "storage url must be set for the sqlite backend".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Settings for the `SQLite` adapter.
    #[must_use]
    pub fn sqlite(&self) -> produk_adapter_storage_sqlite_sqlx::Config {
        let mut config = produk_adapter_storage_sqlite_sqlx::Config::new(&self.storage.url);
        config.max_connections = self.storage.max_connections;
        config.connect_attempts = self.storage.connect_attempts;
        config.retry_delay = Duration::from_secs(self.storage.retry_delay_secs);
        config
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            url: "sqlite:produk.db?mode=rwc".to_string(),
            max_connections: 2,
            connect_attempts: 5,
            retry_delay_secs: 3,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "produkd=info,produk=info,tower_http=debug".to_string(),
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
