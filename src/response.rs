use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{error::AppError, models::ValidationError};

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

pub type ApiResult<T> = Result<JsonResponse<T>, AppError>;

/// A JSON body sent verbatim (no envelope) with an explicit charset.
#[derive(Debug)]
pub struct JsonResponse<T: Serialize> {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: T,
}

impl<T: Serialize> JsonResponse<T> {
    pub fn ok(body: T) -> ApiResult<T> {
        Ok(Self {
            status: StatusCode::OK,
            location: None,
            body,
        })
    }

    pub fn created(location: impl Into<String>, body: T) -> ApiResult<T> {
        Ok(Self {
            status: StatusCode::CREATED,
            location: Some(location.into()),
            body,
        })
    }
}

impl<T: Serialize> IntoResponse for JsonResponse<T> {
    fn into_response(self) -> Response {
        let mut response = json_body(self.status, &self.body);
        if let Some(location) = self.location {
            match HeaderValue::try_from(location) {
                Ok(value) => {
                    response.headers_mut().insert(header::LOCATION, value);
                }
                Err(err) => {
                    return AppError::internal(format!("invalid location header: {err}"))
                        .into_response();
                }
            }
        }
        response
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(message) => {
                tracing::debug!(%message, "not found");
                StatusCode::NOT_FOUND.into_response()
            }
            AppError::Validation(errors) => {
                tracing::debug!(count = errors.len(), "request failed validation");
                json_body(StatusCode::BAD_REQUEST, &errors)
            }
            AppError::BadRequest(message) => {
                tracing::debug!(%message, "bad request");
                json_body(
                    StatusCode::BAD_REQUEST,
                    &[ValidationError::general(message)],
                )
            }
            AppError::Internal(message) => {
                log_app_error(&message);
                internal_error_body(&message)
            }
        }
    }
}

pub fn log_app_error(message: &str) {
    tracing::error!(status = StatusCode::INTERNAL_SERVER_ERROR.as_u16(), %message, "request failed");
}

/// 500 body; the underlying message is only exposed in debug builds.
pub(crate) fn internal_error_body(details: &str) -> Response {
    let message = if cfg!(debug_assertions) {
        format!("internal server error: {details}")
    } else {
        "internal server error".to_string()
    };

    json_body(
        StatusCode::INTERNAL_SERVER_ERROR,
        &ErrorBody {
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            message,
        },
    )
}

fn json_body<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
            bytes,
        )
            .into_response(),
        Err(err) => {
            log_app_error(&format!("failed to serialize response: {err}"));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
                r#"{"status":500,"message":"internal server error"}"#,
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body,
        http::{StatusCode, header},
        response::IntoResponse,
    };
    use serde_json::json;

    use super::{JSON_CONTENT_TYPE, JsonResponse};
    use crate::{error::AppError, models::ValidationError};

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should read");
        serde_json::from_slice(&bytes).expect("body should be json")
    }

    #[tokio::test]
    async fn created_sets_location_and_charset() {
        let response = JsonResponse::created("/todos/3", json!({ "id": 3 }))
            .expect("response")
            .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/todos/3");
        assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_CONTENT_TYPE);
        assert_eq!(body_json(response).await, json!({ "id": 3 }));
    }

    #[tokio::test]
    async fn not_found_has_empty_body() {
        let response = AppError::not_found("Todo not found (id=1)").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should read");
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn validation_errors_render_as_array() {
        let response = AppError::validation(vec![ValidationError::field(
            "percentComplete",
            "Percent Complete must be between 0 and 100.",
        )])
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_CONTENT_TYPE);
        assert_eq!(
            body_json(response).await,
            json!([{
                "memberNames": ["percentComplete"],
                "errorMessage": "Percent Complete must be between 0 and 100."
            }])
        );
    }

    #[tokio::test]
    async fn bad_request_uses_the_validation_shape() {
        let response = AppError::bad_request("Expected request with `Content-Type: application/json`")
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body[0]["memberNames"], json!([]));
        assert!(body[0]["errorMessage"].as_str().unwrap().contains("Content-Type"));
    }

    #[tokio::test]
    async fn internal_errors_carry_status_and_message() {
        let response = AppError::internal("Database error: gone").into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["status"], 500);
        assert!(body["message"].as_str().unwrap().starts_with("internal server error"));
    }
}
