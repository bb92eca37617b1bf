use axum::{Router, routing::get};

use super::route_list::{self, RouteInfo};
use crate::response::{ApiResult, JsonResponse};

pub fn router() -> Router {
    Router::new().route("/docs/routes", get(list_routes))
}

async fn list_routes() -> ApiResult<&'static [RouteInfo]> {
    JsonResponse::ok(route_list::routes())
}
