use std::{collections::HashMap, sync::Arc};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use sea_orm::{ConnectOptions, DatabaseConnection};
use tracing::info;

use crate::config::DatabaseConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbProviderId {
    Postgres,
    MySql,
    Sqlite,
}

impl DbProviderId {
    pub fn as_str(self) -> &'static str {
        match self {
            DbProviderId::Postgres => "postgres",
            DbProviderId::MySql => "mysql",
            DbProviderId::Sqlite => "sqlite",
        }
    }
}

#[async_trait]
pub trait DbProvider: Send + Sync {
    fn id(&self) -> DbProviderId;
    fn supports_url(&self, url: &str) -> bool;
    async fn connect(&self, cfg: &DatabaseConfig) -> Result<DatabaseConnection>;
    async fn post_connect(&self, _db: &DatabaseConnection, _cfg: &DatabaseConfig) -> Result<()> {
        Ok(())
    }
}

/// Pool settings shared by every backend.
pub fn connect_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut options = ConnectOptions::new(cfg.url.trim().to_string());
    options
        .max_connections(cfg.max_connections)
        .min_connections(cfg.min_idle)
        .connect_timeout(cfg.connect_timeout())
        .sqlx_logging(false);
    options
}

pub struct DbProviders {
    providers: HashMap<DbProviderId, Arc<dyn DbProvider>>,
}

impl DbProviders {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn DbProvider>) -> Result<Self> {
        self.add(provider)?;
        Ok(self)
    }

    pub fn add(&mut self, provider: Arc<dyn DbProvider>) -> Result<()> {
        let id = provider.id();
        if self.providers.contains_key(&id) {
            bail!("database provider already registered: {}", id.as_str());
        }
        self.providers.insert(id, provider);
        Ok(())
    }

    pub fn provider_for_url(&self, url: &str) -> Result<Arc<dyn DbProvider>> {
        self.providers
            .values()
            .find(|provider| provider.supports_url(url))
            .cloned()
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "unsupported database url '{}'; expected scheme postgres://, postgresql://, mysql://, mariadb://, or sqlite:",
                    redact_url(url)
                )
            })
    }

    /// Resolves the provider for `cfg.url`, opens the pool and runs the
    /// provider's post-connect setup.
    pub async fn connect(&self, cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
        let provider = self.provider_for_url(&cfg.url)?;
        let id = provider.id().as_str();
        info!(provider = id, url = %redact_url(&cfg.url), "connecting to database");

        let db = provider
            .connect(cfg)
            .await
            .with_context(|| format!("failed to connect to {id} database"))?;
        provider
            .post_connect(&db, cfg)
            .await
            .with_context(|| format!("failed to prepare {id} connection"))?;
        Ok(db)
    }
}

impl Default for DbProviders {
    fn default() -> Self {
        Self::new()
    }
}

fn redact_url(url: &str) -> String {
    let trimmed = url.trim();
    if let Some((scheme, _)) = trimmed.split_once("://") {
        format!("{scheme}://<redacted>")
    } else if let Some((scheme, _)) = trimmed.split_once(':') {
        format!("{scheme}:<redacted>")
    } else {
        "<invalid-url>".to_string()
    }
}
