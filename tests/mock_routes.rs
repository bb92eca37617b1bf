use axum::{
    body::{self, Body},
    http::{Request, StatusCode, header},
};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
use serde_json::Value;
use tower::ServiceExt;

use todo_server::{
    response::JSON_CONTENT_TYPE,
    test_helpers::{empty_mock_state, mock_state, test_router},
};

#[tokio::test]
async fn database_failure_is_an_internal_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection reset".to_string())])
        .into_connection();
    let app = test_router(mock_state(db));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/todos")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        JSON_CONTENT_TYPE
    );
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], 500);
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn validation_runs_before_the_database_is_touched() {
    let app = test_router(empty_mock_state());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/todos")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"title":"","percentComplete":101}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    let errors = json.as_array().expect("array body");
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0]["errorMessage"], "The Title field is required.");
}
