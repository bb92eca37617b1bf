use serde::Serialize;

/// One `.route(...)` registration found in `src/routes` at build time.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RouteInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub handler: &'static str,
    pub source: &'static str,
}

include!(concat!(env!("OUT_DIR"), "/routes_generated.rs"));

pub fn routes() -> &'static [RouteInfo] {
    ROUTES
}
