use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use tower_http::trace::TraceLayer;

use todo_server::{
    config::{AppConfig, LoggingConfig},
    db::connection,
    logging::init_tracing,
    middleware::catch_panic_layer,
    routes::router,
    state::AppState,
};

#[tokio::main]
async fn main() {
    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            init_tracing(&LoggingConfig::default());
            tracing::error!("failed to load config: {err:#}");
            std::process::exit(1);
        }
    };
    init_tracing(&cfg.logging);

    if let Err(err) = run(cfg).await {
        tracing::error!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = connection::connect(&cfg.database).await?;
    let state = AppState::new(cfg, db);

    let app = Router::new()
        .merge(router(state.clone()))
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = state
        .config
        .bind_address()
        .parse()
        .context("invalid host/port")?;
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
