use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

pub mod docs;
pub mod route_list;
pub mod todos;

pub fn router(state: Arc<AppState>) -> Router {
    let router = Router::new().merge(todos::router(state.clone()));

    if state.config.general.docs_enabled() {
        router.merge(docs::router())
    } else {
        router
    }
}
