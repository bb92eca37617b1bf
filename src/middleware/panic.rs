use std::any::Any;

use axum::response::Response;
use tower_http::catch_panic::CatchPanicLayer;

use crate::response::{internal_error_body, log_app_error};

pub fn catch_panic_layer() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(panic_to_json)
}

fn panic_to_json(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic"
    };

    log_app_error(&format!("handler panicked: {details}"));
    internal_error_body(details)
}
