use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{defaults, envconfig::EnvConfig, validate};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        <Self as EnvConfig>::from_env()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.general.host, self.general.port)
    }
}

impl EnvConfig for AppConfig {
    fn validate(&self) -> Result<()> {
        validate::validate(self)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    pub host: String,
    pub port: u16,
    pub enable_docs_in_release: bool,
}

impl GeneralConfig {
    /// The route catalog is always served in debug builds.
    pub fn docs_enabled(&self) -> bool {
        cfg!(debug_assertions) || self.enable_docs_in_release
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_HOST.to_string(),
            port: defaults::DEFAULT_PORT,
            enable_docs_in_release: defaults::DEFAULT_ENABLE_DOCS_IN_RELEASE,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub rust_log: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: defaults::DEFAULT_RUST_LOG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_idle: u32,
    pub connect_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: defaults::DEFAULT_DB_MAX_CONNECTIONS,
            min_idle: defaults::DEFAULT_DB_MIN_IDLE,
            connect_timeout_secs: defaults::DEFAULT_DB_CONNECT_TIMEOUT_SECS,
        }
    }
}
