use anyhow::Context;
use sea_orm::DatabaseConnection;
use tracing::info;

use super::providers;
use crate::config::DatabaseConfig;

const ENTITY_MODULES: &str = "todo_server::db::entities::*";

/// Opens the pool for the configured backend and brings the schema in line
/// with the entity definitions.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = providers::default_registry()?.connect(cfg).await?;

    info!("syncing database schema from entities");
    db.get_schema_registry(ENTITY_MODULES)
        .sync(&db)
        .await
        .context("failed to sync database schema")?;
    Ok(db)
}
