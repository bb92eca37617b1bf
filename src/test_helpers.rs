use std::sync::Arc;

use axum::Router;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};

use crate::{
    config::{AppConfig, DatabaseConfig},
    db::connection,
    middleware::catch_panic_layer,
    routes::router,
    state::AppState,
};

pub const SQLITE_MEMORY_URL: &str = "sqlite::memory:";

pub fn test_config(url: &str) -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            max_connections: 1,
            min_idle: 1,
            ..DatabaseConfig::with_url(url)
        },
        ..AppConfig::default()
    }
}

/// Fresh in-memory SQLite database with the schema synced.
pub async fn sqlite_state() -> Arc<AppState> {
    let cfg = test_config(SQLITE_MEMORY_URL);
    let db = connection::connect(&cfg.database)
        .await
        .expect("connect to in-memory sqlite");
    AppState::new(cfg, db)
}

pub fn mock_state(db: DatabaseConnection) -> Arc<AppState> {
    AppState::new(test_config(SQLITE_MEMORY_URL), db)
}

pub fn empty_mock_state() -> Arc<AppState> {
    mock_state(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
}

pub fn test_router(state: Arc<AppState>) -> Router {
    router(state).layer(catch_panic_layer())
}
